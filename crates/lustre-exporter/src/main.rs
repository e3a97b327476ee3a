//! lustre_exporter - Prometheus exporter for Lustre filesystem metrics.
//!
//! Reads Lustre statistics from procfs, sysfs and `lctl` on every scrape and
//! serves them over HTTP, or prints a single scrape with `--once`.

mod exposition;
mod handlers;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use clap::{Parser, ValueEnum};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use lustre_core::collector::{RealFs, Scraper};
use lustre_core::config::{Config, EnableLevel, LctlMode, Levels};

use handlers::{AppState, SharedState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Prometheus exporter for Lustre filesystem metrics.
#[derive(Parser, Debug)]
#[command(name = "lustre_exporter", about = "Prometheus exporter for Lustre filesystems", version)]
struct Args {
    /// Address to listen on for web interface and telemetry.
    #[arg(long = "web.listen-address", default_value = "0.0.0.0:9169", env = "LUSTRE_EXPORTER_LISTEN")]
    listen_address: String,

    /// Path under which to expose metrics.
    #[arg(long = "web.telemetry-path", default_value = "/metrics", value_parser = parse_telemetry_path)]
    telemetry_path: String,

    /// OST metrics level: extended, core or disabled.
    #[arg(long = "collector.ost", default_value = "extended")]
    ost: EnableLevel,

    /// MDT metrics level. Changelog metrics need extended.
    #[arg(long = "collector.mdt", default_value = "extended")]
    mdt: EnableLevel,

    /// MGS metrics level.
    #[arg(long = "collector.mgs", default_value = "extended")]
    mgs: EnableLevel,

    /// MDS metrics level.
    #[arg(long = "collector.mds", default_value = "extended")]
    mds: EnableLevel,

    /// Client metrics level.
    #[arg(long = "collector.client", default_value = "extended")]
    client: EnableLevel,

    /// Generic (sptlrpc) metrics level.
    #[arg(long = "collector.generic", default_value = "extended")]
    generic: EnableLevel,

    /// LNET metrics level.
    #[arg(long = "collector.lnet", default_value = "extended")]
    lnet: EnableLevel,

    /// Health status metrics level.
    #[arg(long = "collector.health", default_value = "extended")]
    health: EnableLevel,

    /// Root of the procfs tree.
    #[arg(long, default_value = "/proc")]
    proc_path: PathBuf,

    /// Root of the sysfs tree.
    #[arg(long, default_value = "/sys")]
    sys_path: PathBuf,

    /// Read captured `lctl get_param` output from this directory instead of
    /// running lctl.
    #[arg(long, value_name = "DIR")]
    lctl_fixture: Option<PathBuf>,

    /// Scrape once, print the result and exit.
    #[arg(long)]
    once: bool,

    /// Output format for --once.
    #[arg(long, value_enum, default_value = "text", requires = "once")]
    format: OutputFormat,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Accepts absolute URL paths only.
fn parse_telemetry_path(s: &str) -> Result<String, String> {
    let s = s.trim();
    if !s.starts_with('/') {
        return Err(format!("telemetry path '{}' must start with '/'", s));
    }
    Ok(s.to_string())
}

impl Args {
    fn config(&self) -> Config {
        Config {
            levels: Levels {
                ost: self.ost,
                mdt: self.mdt,
                mgs: self.mgs,
                mds: self.mds,
                client: self.client,
                generic: self.generic,
                lnet: self.lnet,
                health: self.health,
            },
            proc_path: self.proc_path.clone(),
            sys_path: self.sys_path.clone(),
            lctl: match &self.lctl_fixture {
                Some(dir) => LctlMode::Fixture(dir.clone()),
                None => LctlMode::Command,
            },
        }
    }
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["lustre_exporter", "lustre_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let config = args.config();
    info!("lustre_exporter {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Levels: ost={}, mdt={}, mgs={}, mds={}, client={}, generic={}, lnet={}, health={}",
        config.levels.ost,
        config.levels.mdt,
        config.levels.mgs,
        config.levels.mds,
        config.levels.client,
        config.levels.generic,
        config.levels.lnet,
        config.levels.health
    );

    let scraper = match Scraper::new(Arc::new(RealFs::new()), &config) {
        Ok(scraper) => scraper,
        Err(e) => {
            error!("Failed to initialize sources: {}", e);
            process::exit(1);
        }
    };
    info!("Sources: {}", scraper.source_names().join(", "));

    if args.once {
        let rendered = match args.format {
            OutputFormat::Text => exposition::render_text(&scraper).map_err(|e| e.to_string()),
            OutputFormat::Json => exposition::render_json(&scraper).map_err(|e| e.to_string()),
        };
        match rendered {
            Ok(output) => print!("{}", output),
            Err(e) => {
                error!("Failed to render scrape: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to build tokio runtime: {}", e);
            process::exit(1);
        }
    };
    runtime.block_on(serve(args, scraper));
}

fn router(state: SharedState) -> Router {
    let mut app = Router::new().route(&state.telemetry_path, get(handlers::handle_metrics));
    if state.telemetry_path != "/" {
        app = app.route("/", get(handlers::handle_landing));
    }
    app.with_state(state)
}

async fn serve(args: Args, scraper: Scraper) {
    let addr: SocketAddr = match args.listen_address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid listen address {}: {}", args.listen_address, e);
            process::exit(1);
        }
    };

    let state: SharedState = Arc::new(AppState {
        scraper,
        telemetry_path: args.telemetry_path,
    });
    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            process::exit(1);
        }
    };
    info!(%addr, "listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        process::exit(1);
    }
    info!("lustre_exporter stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lustre_exporter"]).unwrap();
        assert_eq!(args.listen_address, "0.0.0.0:9169");
        assert_eq!(args.telemetry_path, "/metrics");
        assert!(!args.once);

        let config = args.config();
        assert_eq!(config.levels, Levels::default());
        assert_eq!(config.proc_path, PathBuf::from("/proc"));
        assert_eq!(config.sys_path, PathBuf::from("/sys"));
        assert_eq!(config.lctl, LctlMode::Command);
    }

    #[test]
    fn test_collector_levels() {
        let args = Args::try_parse_from([
            "lustre_exporter",
            "--collector.ost=core",
            "--collector.client",
            "disabled",
            "--collector.lnet=Extended",
        ])
        .unwrap();
        let levels = args.config().levels;
        assert_eq!(levels.ost, EnableLevel::Core);
        assert_eq!(levels.client, EnableLevel::Disabled);
        assert_eq!(levels.lnet, EnableLevel::Extended);
        assert_eq!(levels.mdt, EnableLevel::Extended);
    }

    #[test]
    fn test_invalid_level_rejected() {
        assert!(Args::try_parse_from(["lustre_exporter", "--collector.ost=verbose"]).is_err());
    }

    #[test]
    fn test_once_with_fixture() {
        let args = Args::try_parse_from([
            "lustre_exporter",
            "--once",
            "--format",
            "json",
            "--lctl-fixture",
            "/tmp/lctl",
            "--proc-path",
            "/tmp/proc",
        ])
        .unwrap();
        assert!(args.once);
        assert_eq!(args.format, OutputFormat::Json);

        let config = args.config();
        assert_eq!(config.lctl, LctlMode::Fixture(PathBuf::from("/tmp/lctl")));
        assert_eq!(config.proc_path, PathBuf::from("/tmp/proc"));
    }

    #[test]
    fn test_telemetry_path_must_be_absolute() {
        assert!(Args::try_parse_from(["lustre_exporter", "--web.telemetry-path", "metrics"]).is_err());
        let args = Args::try_parse_from(["lustre_exporter", "--web.telemetry-path", "/lustre"]).unwrap();
        assert_eq!(args.telemetry_path, "/lustre");
    }

    #[test]
    fn test_format_requires_once() {
        assert!(Args::try_parse_from(["lustre_exporter", "--format", "json"]).is_err());
    }

    #[test]
    fn test_router_builds_with_root_telemetry_path() {
        let scraper = Scraper::with_sources(Vec::new());
        let state = Arc::new(AppState {
            scraper,
            telemetry_path: "/".to_string(),
        });
        let _ = router(state);
    }
}
