use std::path::PathBuf;

use clap::Parser;

use recanon::{pipeline, BatchOptions, SourceSchema};
use recanon_core::{Normalizer, ProfileSet};

#[derive(Parser)]
#[command(name = "recanon", about = "Normalize harvested metadata records into canonical JSON")]
struct Cli {
    /// Directory walked recursively for source XML records.
    #[arg(short, long)]
    input: PathBuf,

    /// Directory receiving one canonical JSON document per record.
    #[arg(short, long)]
    output: PathBuf,

    /// Schema the source records are expressed in.
    #[arg(long, value_enum, default_value_t = SourceSchema::Datacite)]
    schema: SourceSchema,

    /// Normalization profile to apply; defaults to the one matching --schema.
    #[arg(long)]
    profile: Option<String>,

    /// Concurrent worker tasks. Defaults to the available CPU count.
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Also write each intermediate parsed tree as `<file>.xml.json`.
    #[arg(long)]
    emit_tree: bool,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    anyhow::ensure!(
        cli.input.is_dir(),
        "input {} is not a directory",
        cli.input.display()
    );

    let profiles = ProfileSet::load()?;
    let profile_name = cli.profile.clone().unwrap_or_else(|| {
        match cli.schema {
            SourceSchema::Datacite => "datacite",
            // Mappers emit compact-keyed resource trees.
            SourceSchema::Dc | SourceSchema::Ddi25 => "datacite-compact",
        }
        .to_string()
    });
    let profile = profiles.get(&profile_name).cloned().ok_or_else(|| {
        anyhow::anyhow!(
            "unknown profile `{profile_name}`; available: {}",
            profiles.names().join(", ")
        )
    })?;

    let jobs = cli.jobs.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(4)
    });

    let summary = pipeline::run(
        BatchOptions {
            input: cli.input,
            output: cli.output,
            schema: cli.schema,
            jobs,
            emit_tree: cli.emit_tree,
        },
        Normalizer::new(profile),
    )
    .await?;

    if summary.skipped > 0 {
        tracing::warn!(skipped = summary.skipped, "some records were skipped; see log above");
    }
    Ok(())
}
