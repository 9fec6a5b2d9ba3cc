//! Source record discovery.
//!
//! Harvested records land as one XML file per record, possibly nested in
//! per-set subdirectories. Discovery walks the whole tree and returns a
//! sorted list so batch runs are deterministic.

use std::io;
use std::path::{Path, PathBuf};

/// Recursively collect every `*.xml` file under `root`, sorted by path.
pub fn discover(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(root, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
        {
            found.push(path);
        }
    }
    Ok(())
}
