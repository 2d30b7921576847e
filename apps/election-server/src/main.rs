use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use db::{ConnectOpts, DbHandle};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig, ServerConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use api_ingress::{ApiIngress, ApiIngressConfig};
use election::{Election, ElectionOptions};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MEMORY_DSN: &str = "sqlite::memory:";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps in-memory DSNs as "sqlite::memory:".
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> Result<String> {
    if dsn.eq_ignore_ascii_case(MEMORY_DSN) || dsn.eq_ignore_ascii_case("sqlite://:memory:") {
        return Ok(MEMORY_DSN.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Election tracker API server
#[derive(Parser)]
#[command(name = "election-server")]
#[command(about = "Election tracker REST API over candidates and parties")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    /// Insert demo parties and candidates into an empty database
    #[arg(long)]
    seed: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
        seed: cli.seed,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Election server starting");

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, &args),
    }
}

/// DSN to open: the configured one, or memory with `--mock`.
fn resolve_dsn(db_config: &DatabaseConfig, args: &CliArgs, base_dir: &Path) -> Result<String> {
    if args.mock {
        return Ok(MEMORY_DSN.to_string());
    }

    let dsn = db_config.url.trim();
    if dsn.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    DbHandle::detect(dsn)?;

    // Absolutize sqlite DSNs to avoid cwd issues
    if dsn.starts_with("sqlite://") {
        absolutize_sqlite_dsn(dsn, base_dir)
    } else {
        Ok(dsn.to_string())
    }
}

async fn connect_database(config: &AppConfig, args: &CliArgs) -> Result<DbHandle> {
    let db_config = config.database.clone().unwrap_or_default();
    let base_dir = PathBuf::from(&config.server.home_dir);
    let dsn = resolve_dsn(&db_config, args, &base_dir)?;

    let connect_opts = ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms))),
        create_sqlite_dirs: true,
        ..Default::default()
    };

    let redacted = db::redact_credentials_in_dsn(&dsn);
    tracing::info!("Connecting to database: {}", redacted);
    let db = DbHandle::connect(&dsn, connect_opts)
        .await
        .with_context(|| format!("Failed to connect to database {redacted}"))?;
    tracing::info!("Connected DB backend: {:?}", db.engine());
    Ok(db)
}

async fn bind_addr(server: &ServerConfig) -> Result<SocketAddr> {
    tokio::net::lookup_host((server.host.as_str(), server.port))
        .await
        .with_context(|| format!("Invalid bind address '{}:{}'", server.host, server.port))?
        .next()
        .ok_or_else(|| anyhow!("Bind address '{}' did not resolve", server.host))
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");

    let ingress_cfg: ApiIngressConfig = config.module_config("api_ingress")?;
    let addr = bind_addr(&config.server).await?;

    // Startup DB failure is fatal: nothing is bound yet.
    let db = connect_database(&config, &args).await?;
    let election = Election::init(&db, ElectionOptions { seed: args.seed }).await?;

    let ingress = ApiIngress::new(ingress_cfg);
    let router = ingress.build_router(election.register_rest(axum::Router::new()));

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if let Err(e) = runtime::wait_for_shutdown().await {
                tracing::error!("Signal handling failed: {e:#}");
            }
            cancel.cancel();
        }
    });

    tracing::info!("Server running on port {}", addr.port());
    let served = ingress.serve(router, addr, cancel).await;

    db.close().await;
    tracing::info!("Election server stopped");
    served
}

fn check_config(config: AppConfig, args: &CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let _: ApiIngressConfig = config.module_config("api_ingress")?;
    let db_config = config.database.clone().unwrap_or_default();
    resolve_dsn(&db_config, args, Path::new(&config.server.home_dir))?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
