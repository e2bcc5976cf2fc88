use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sqlfp::{index_paths, AnalysisReport, SqlfpConfig};

#[derive(Parser)]
#[command(
    name = "sqlfp",
    version,
    about = "Split SQL scripts, canonicalize statements and group exact duplicates"
)]
struct Cli {
    /// Files or directories to scan (overrides `input.paths`).
    paths: Vec<PathBuf>,

    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report destination (overrides `output.path`).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source file extension without the dot (overrides `input.extension`).
    #[arg(long)]
    extension: Option<String>,

    /// Canonicalize statements in parallel.
    #[arg(long)]
    parallel: bool,

    /// Write single-line JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    /// Log level or filter directive (overrides `logging.level`).
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<SqlfpConfig> {
        let mut config = match &self.config {
            Some(path) => SqlfpConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SqlfpConfig::default(),
        };

        if !self.paths.is_empty() {
            config.input.paths = self.paths.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(extension) = &self.extension {
            config.input.extension = extension.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        config.pipeline.use_parallel |= self.parallel;
        config.output.pretty &= !self.compact;
        config.logging.json |= self.json_logs;

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(config: &SqlfpConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_tracing(&config);

    let (index, source_ids) = index_paths(
        config.input.paths.as_slice(),
        &config.input.extension,
        &config.pipeline,
    )?;

    let report = AnalysisReport::from_index(&index, source_ids.as_slice());
    report
        .write_json(&config.output.path, config.output.pretty)
        .with_context(|| format!("writing report {}", config.output.path.display()))?;

    let summary = &report.summary;
    println!(
        "{} statements in {} sources -> {} distinct fingerprints ({} duplicated); report: {}",
        summary.statements,
        summary.sources,
        summary.groups,
        summary.duplicate_groups,
        config.output.path.display()
    );

    Ok(())
}
