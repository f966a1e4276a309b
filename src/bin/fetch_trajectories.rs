//! Fetch Horizons ephemerides for a list of small bodies and write their Cartesian
//! trajectories as JSON.
//!
//! ```text
//! fetch_trajectories --catalog sbdb.csv --start 2006-01-01 --stop 2007-01-20 -o traj.json
//! fetch_trajectories --des 54481740 --des 20000433 --start 2023-01-01 --stop 2023-03-01 --step 6h
//! ```
use std::{io::Write, time::Duration};

use camino::Utf8PathBuf;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ephem_traj::{
    constants::{DEFAULT_CENTER, DEFAULT_STEP, DEFAULT_TIMEOUT_SECS, HORIZONS_API_URL},
    trajectories::catalog_reader::read_catalog_file,
    AssemblerConfig, Concurrency, DecodeMode, EphemEnv, EphemError, HorizonsClient, TableLayout,
    TimeWindow, TrajectoryAssembler,
};

type Result<T> = std::result::Result<T, EphemError>;

#[derive(Parser, Debug)]
#[command(name = "fetch_trajectories")]
#[command(about = "Fetch small-body trajectories from JPL Horizons")]
#[command(version)]
struct Args {
    /// Designator to fetch (repeatable)
    #[arg(long = "des", required_unless_present = "catalog")]
    designators: Vec<String>,

    /// CSV catalog whose first column lists designators (header row skipped)
    #[arg(long)]
    catalog: Option<Utf8PathBuf>,

    /// First date of the table (e.g. 2006-01-01)
    #[arg(long)]
    start: String,

    /// Last date of the table
    #[arg(long)]
    stop: String,

    /// Table step (1d, 6h, 30m, 1mo, 1y)
    #[arg(long, default_value = DEFAULT_STEP)]
    step: String,

    /// Row decoding: sexagesimal, decimal or cartesian
    #[arg(long, default_value = "sexagesimal")]
    mode: DecodeMode,

    /// Field index of RA (or x in cartesian mode), overrides the mode default
    #[arg(long)]
    first_field: Option<usize>,

    /// Field index of Dec in decimal mode, defaults to the field after RA
    #[arg(long)]
    dec_field: Option<usize>,

    /// Number of leading fields joined into the timestamp
    #[arg(long, default_value_t = 1)]
    timestamp_fields: usize,

    /// Maximum number of requests in flight (1 = sequential)
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Horizons API endpoint or a proxy forwarding to it
    #[arg(long, env = "HORIZONS_API_URL", default_value = HORIZONS_API_URL)]
    api_url: String,

    /// Observation center code
    #[arg(long, default_value = DEFAULT_CENTER)]
    center: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Output JSON file, stdout when absent
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,
}

fn decode_mode(args: &Args) -> DecodeMode {
    match (args.mode, args.first_field) {
        (DecodeMode::Sexagesimal { .. }, Some(ra_field)) => DecodeMode::Sexagesimal { ra_field },
        (DecodeMode::Decimal { .. }, Some(ra_field)) => DecodeMode::Decimal {
            ra_field,
            dec_field: args.dec_field.unwrap_or(ra_field.saturating_add(1)),
        },
        (DecodeMode::Decimal { ra_field, dec_field }, None) => DecodeMode::Decimal {
            ra_field,
            dec_field: args.dec_field.unwrap_or(dec_field),
        },
        (DecodeMode::Cartesian { .. }, Some(x_field)) => DecodeMode::Cartesian { x_field },
        (mode, None) => mode,
    }
}

/// The public Horizons API only serves observer tables, never precomputed vectors.
fn cartesian_on_public_api(mode: DecodeMode, api_url: &str) -> bool {
    matches!(mode, DecodeMode::Cartesian { .. })
        && api_url.trim_end_matches('/') == HORIZONS_API_URL
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut designators = args.designators.clone();
    if let Some(catalog) = &args.catalog {
        let from_catalog = read_catalog_file(catalog)?;
        info!(catalog = %catalog, count = from_catalog.len(), "catalog loaded");
        designators.extend(from_catalog);
    }
    if designators.is_empty() {
        warn!("catalog lists no designator, nothing to fetch");
    }

    let window = TimeWindow::new(&args.start, &args.stop, Some(&args.step))?;

    let env = EphemEnv::builder()
        .api_url(args.api_url.clone())
        .center(args.center.clone())
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    let concurrency = match args.concurrency {
        0 | 1 => Concurrency::Sequential,
        n => Concurrency::Bounded(n),
    };
    let mode = decode_mode(&args);
    if cartesian_on_public_api(mode, &args.api_url) {
        warn!(
            api_url = %args.api_url,
            "cartesian mode expects an endpoint serving precomputed vectors, the public Horizons table holds RA/Dec"
        );
    }
    let layout = TableLayout::new(mode).with_timestamp_fields(args.timestamp_fields);
    let config = AssemblerConfig::default()
        .with_layout(layout)
        .with_concurrency(concurrency);

    let assembler = TrajectoryAssembler::new(HorizonsClient::new(env), config);
    let trajectories = assembler.assemble(&designators, &window).await;

    let json = serde_json::to_string_pretty(&trajectories)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path, count = trajectories.len(), "trajectories written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
