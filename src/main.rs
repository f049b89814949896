//! # Hosts Intercept
//!
//! Operator CLI for the hosts-table interceptor.
//!
//! Runs one build pass (mirror refresh per the configured interval, cache
//! fallback, mandatory override file), installs the interceptor into a
//! resolution chain, and resolves the given `HOST[:PORT]` arguments through
//! it.
//!
//! ## Usage
//!
//! ```bash
//! # Refresh the mirror cache and report the table size
//! hosts-intercept -d /var/lib/hosts-intercept
//!
//! # Resolve hostnames through the chain
//! hosts-intercept -d /var/lib/hosts-intercept example.com api.example.com:8443
//!
//! # Increase verbosity
//! hosts-intercept -vv example.com
//! ```

use clap::Parser;
use hosts_intercept::builder::{BuildEnv, SystemClock};
use hosts_intercept::chain::{DnsRequest, ResolutionChain};
use hosts_intercept::config::YamlConfigStore;
use hosts_intercept::files::DirStore;
use hosts_intercept::interceptor;
use hosts_intercept::logging::{self, LogFormat};
use hosts_intercept::mirror::HttpMirrorFetcher;
use std::path::PathBuf;
use tracing::{error, info};

/// Resolve hostnames against a locally-maintained hosts table.
#[derive(Parser, Debug)]
#[command(name = "hosts-intercept")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding hosts.txt and hosts-cache.txt
    #[arg(short, long, env = "HOSTS_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Path to the settings file (defaults to <data-dir>/settings.yaml)
    #[arg(short, long, env = "HOSTS_SETTINGS")]
    settings: Option<PathBuf>,

    /// Log format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Log destination: stdout, stderr, or a file path
    #[arg(long, default_value = "stdout")]
    log_output: String,

    /// Increase verbosity (-v debug, -vv trace, -vvv trace+deps)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,

    /// Hostnames to resolve, as HOST[:PORT] (port defaults to 80)
    targets: Vec<String>,
}

impl Args {
    /// Converts verbosity flags to a log level.
    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Whether to include verbose dependency logging.
    fn trace_deps(&self) -> bool {
        self.verbose >= 3
    }
}

/// Application entry point.
#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = match logging::init_logging(
        args.log_level(),
        args.log_format,
        &args.log_output,
        args.trace_deps(),
    ) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %args.data_dir.display(),
        "Starting hosts-intercept"
    );

    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(|| args.data_dir.join("settings.yaml"));

    let mut config = match YamlConfigStore::load(&settings_path) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, path = %settings_path.display(), "Failed to load settings");
            std::process::exit(1);
        }
    };

    let files = DirStore::new(&args.data_dir);
    let fetcher = HttpMirrorFetcher::new();
    let clock = SystemClock;

    let mut chain = ResolutionChain::new(true);
    let mut env = BuildEnv {
        config: &mut config,
        files: &files,
        fetcher: &fetcher,
        clock: &clock,
    };

    if !interceptor::install(&mut chain, &mut env).await {
        info!("No interceptor registered");
    }

    for target in &args.targets {
        let (host, port) = split_host_port(target, 80);
        let mut request = DnsRequest::new(host, port);
        chain.resolve(&mut request);

        match request.response() {
            Some(address) => println!("{} -> {}", target, address),
            None => println!("{} -> (no override)", target),
        }
    }
}

/// Splits a `HOST[:PORT]` argument, using `default_port` when no port is given.
fn split_host_port(target: &str, default_port: u16) -> (String, u16) {
    if let Some(colon) = target.rfind(':') {
        // Bracketed IPv6 targets keep their brackets on the host side
        if target.starts_with('[') {
            if let Some(bracket) = target.find(']') {
                if colon > bracket {
                    let port = target[colon + 1..].parse().unwrap_or(default_port);
                    return (target[..colon].to_string(), port);
                }
            }
            return (target.to_string(), default_port);
        }

        if let Ok(port) = target[colon + 1..].parse() {
            return (target[..colon].to_string(), port);
        }
    }

    (target.to_string(), default_port)
}
