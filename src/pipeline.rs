//! Batch pipeline — the driver that feeds the engine.
//!
//! Discovers source records, converts and normalizes each one on a bounded
//! pool of worker tasks, and writes one canonical JSON document per record.
//! A record that fails anywhere (unreadable file, malformed XML, a
//! [`NormalizationFailure`]) is logged with its path and skipped; the batch
//! always runs to completion.
//!
//! [`NormalizationFailure`]: recanon_core::NormalizationFailure

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tokio::task::JoinSet;

use recanon_core::Normalizer;
use recanon_ingest::{files, xml};

/// Schema the source records are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceSchema {
    /// OAI DataCite records; normalized directly through the active profile.
    Datacite,
    /// Dublin Core (`oai_dc`) records; mapped onto a DataCite resource first.
    Dc,
    /// DDI 2.5 codebook records; mapped onto a DataCite resource first.
    Ddi25,
}

/// One batch run's parameters.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory walked recursively for `*.xml` source records.
    pub input: PathBuf,
    /// Directory receiving one `<stem>.json` document per record.
    pub output: PathBuf,
    pub schema: SourceSchema,
    /// Upper bound on concurrently processed records.
    pub jobs: usize,
    /// Also write each intermediate parsed tree as `<file>.xml.json`.
    pub emit_tree: bool,
}

/// What a finished batch did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
}

/// Run one batch to completion. Only setup problems (unreadable input
/// directory, uncreatable output directory) abort the run; per-record
/// problems are logged and counted as skipped.
pub async fn run(options: BatchOptions, normalizer: Normalizer) -> Result<BatchSummary> {
    let sources = files::discover(&options.input)
        .with_context(|| format!("discovering records under {}", options.input.display()))?;
    tokio::fs::create_dir_all(&options.output)
        .await
        .with_context(|| format!("creating output directory {}", options.output.display()))?;
    tracing::info!(records = sources.len(), jobs = options.jobs, "batch started");

    let normalizer = Arc::new(normalizer);
    let options = Arc::new(options);
    let mut workers = JoinSet::new();
    let mut summary = BatchSummary::default();

    for path in sources {
        if workers.len() >= options.jobs.max(1) {
            if let Some(outcome) = workers.join_next().await {
                tally(&mut summary, outcome);
            }
        }
        workers.spawn(process_record(
            path,
            Arc::clone(&normalizer),
            Arc::clone(&options),
        ));
    }
    while let Some(outcome) = workers.join_next().await {
        tally(&mut summary, outcome);
    }

    tracing::info!(
        processed = summary.processed,
        skipped = summary.skipped,
        "batch complete"
    );
    Ok(summary)
}

fn tally(summary: &mut BatchSummary, outcome: Result<bool, tokio::task::JoinError>) {
    match outcome {
        Ok(true) => summary.processed += 1,
        Ok(false) => summary.skipped += 1,
        Err(error) => {
            tracing::error!(error = %error, "worker task failed");
            summary.skipped += 1;
        }
    }
}

#[tracing::instrument(skip_all, fields(record = %path.display()))]
async fn process_record(
    path: PathBuf,
    normalizer: Arc<Normalizer>,
    options: Arc<BatchOptions>,
) -> bool {
    match convert_record(&path, &normalizer, &options).await {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(error = format!("{error:#}"), "skipping record");
            false
        }
    }
}

async fn convert_record(
    path: &Path,
    normalizer: &Normalizer,
    options: &BatchOptions,
) -> Result<()> {
    let source = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let tree = xml::to_tree(&source).with_context(|| format!("parsing {}", path.display()))?;

    if options.emit_tree {
        let name = format!("{}.json", path.file_name().unwrap_or_default().to_string_lossy());
        tokio::fs::write(options.output.join(name), serde_json::to_string(&tree)?)
            .await
            .context("writing intermediate tree")?;
    }

    let record = match options.schema {
        SourceSchema::Datacite => normalizer.normalize_document(&tree)?,
        SourceSchema::Dc => normalizer.normalize(&recanon_schemas::dc::to_resource(&tree))?,
        SourceSchema::Ddi25 => normalizer.normalize(&recanon_schemas::ddi::to_resource(&tree))?,
    };

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let target = options.output.join(format!("{stem}.json"));
    tokio::fs::write(&target, serde_json::to_string_pretty(&record)?)
        .await
        .with_context(|| format!("writing {}", target.display()))?;
    tracing::debug!(output = %target.display(), "record normalized");
    Ok(())
}
