use anyhow::Context;
use clap::{Parser, ValueEnum};
use partsort::input::{load_records, read_records};
use partsort::{Linkage, Metric, OrderingConfig, OrderingEngine, Scaling, SortField, Strategy};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One identifier per line
    Ids,
    /// The full ordering outcome as JSON
    Json,
}

/// Order catalog parts for label printing
#[derive(Parser, Debug)]
#[command(name = "partsort")]
#[command(about = "Order catalog parts so similar parts print next to each other", long_about = None)]
struct Args {
    /// JSON array of part records (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON ordering configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// hierarchical, spectral, greedy, fuzzy or alphabetical
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Cluster linkage: average, single or complete
    #[arg(long)]
    linkage: Option<Linkage>,

    /// Field for alphabetical ordering
    #[arg(long)]
    sort_field: Option<SortField>,

    /// Distance metric: euclidean, manhattan or cosine
    #[arg(long)]
    metric: Option<Metric>,

    /// Feature scaling: min_max or z_score
    #[arg(long)]
    scaling: Option<Scaling>,

    /// Largest batch ordered by clustering or spectral strategies
    #[arg(long)]
    max_matrix_size: Option<usize>,

    /// Strategy used above --max-matrix-size: greedy or alphabetical
    #[arg(long)]
    oversize_fallback: Option<Strategy>,

    /// Image fingerprint components kept per part
    #[arg(long)]
    fingerprint_dim: Option<usize>,

    /// Number of similarity groups to report
    #[arg(long)]
    groups: Option<usize>,

    /// Cut similarity groups at this distance instead of a group count
    #[arg(long, conflicts_with = "groups")]
    group_threshold: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Ids)]
    format: OutputFormat,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn ordering_config(&self) -> anyhow::Result<OrderingConfig> {
        let mut config = match &self.config {
            Some(path) => OrderingConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => OrderingConfig::default(),
        };

        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(linkage) = self.linkage {
            config.linkage = linkage;
        }
        if let Some(field) = self.sort_field {
            config.sort_field = field;
        }
        if let Some(metric) = self.metric {
            config.metric = metric;
        }
        if let Some(scaling) = self.scaling {
            config.scaling = scaling;
        }
        if let Some(max) = self.max_matrix_size {
            config.max_matrix_size = max;
        }
        if let Some(fallback) = self.oversize_fallback {
            config.oversize_fallback = fallback;
        }
        if let Some(dim) = self.fingerprint_dim {
            config.fingerprint_dim = dim;
        }
        if let Some(k) = self.groups {
            config.group_count = Some(k);
            config.group_threshold = None;
        }
        if let Some(t) = self.group_threshold {
            config.group_threshold = Some(t);
            config.group_count = None;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.ordering_config()?;
    debug!(?config, "resolved configuration");

    let records = match &args.input {
        Some(path) => load_records(path)?,
        None => read_records(std::io::stdin().lock()).context("failed to read records from stdin")?,
    };
    info!("Loaded {} part records", records.len());

    let engine = OrderingEngine::new(config)?;
    let outcome = engine.order(&records)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Ids => {
            for id in outcome.ids() {
                writeln!(out, "{}", id)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &outcome)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
