use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use viewlift::codegen::{default_output_path, CodeGenConfig};
use viewlift::config::{ConnectionOptions, DbConfig};
use viewlift::error::ViewliftError;
use viewlift::introspect::ViewFilter;
use viewlift::schema::Schema;

/// Generate Rust record types and row iterators for MySQL views
#[derive(Parser, Debug)]
#[command(name = "viewlift")]
#[command(version, about, long_about = None)]
struct Cli {
    /// MySQL server hostname [env: DB_HOST] [default: localhost]
    #[arg(long)]
    host: Option<String>,

    /// MySQL port [env: DB_PORT] [default: 3306]
    #[arg(long)]
    port: Option<u16>,

    /// MySQL server username [env: DB_USER]
    #[arg(long)]
    username: Option<String>,

    /// MySQL user password [env: DB_PASSWORD]
    #[arg(long)]
    password: Option<String>,

    /// Database whose views are generated [env: DB_NAME]
    #[arg(long)]
    database: Option<String>,

    /// Module name wrapping the generated code
    #[arg(long, default_value = "main")]
    package: String,

    /// Output file (default: <snake_case_database>_views.rs)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to .env file for connection config
    #[arg(long, default_value = "./.env")]
    env_file: PathBuf,

    /// Comma-separated list of views to include (default: all)
    #[arg(long, value_delimiter = ',')]
    views: Option<Vec<String>>,

    /// Comma-separated list of views to exclude
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        if let Some(ViewliftError::Usage(message)) = e.downcast_ref::<ViewliftError>() {
            eprintln!("viewlift: {}\n", message);
            eprintln!("{}", Cli::command().render_help());
            std::process::exit(2);
        }
        debug!(error = ?e, "Fatal error");
        eprintln!("viewlift: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    info!("viewlift v{}", env!("CARGO_PKG_VERSION"));

    let options = ConnectionOptions {
        host: cli.host,
        port: cli.port,
        user: cli.username,
        password: cli.password,
        database: cli.database,
    };
    let config = DbConfig::load(&cli.env_file, options)?;
    debug!(connection = ?config.redacted_connection_string(), "Loaded configuration");

    let filter = ViewFilter {
        include: cli.views,
        exclude: cli.exclude,
    };
    if filter.include.is_some() || filter.exclude.is_some() {
        debug!(filter = ?filter, "View filter configured");
    }

    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(&config.database));
    let codegen_config = CodeGenConfig::new(output).with_package(cli.package);
    codegen_config.validate()?;
    debug!(codegen_config = ?codegen_config, "Code generation config");

    let schema = generate_mysql(&config, &filter, &codegen_config)?;

    info!(
        views = schema.views.len(),
        output = ?codegen_config.output_path,
        "Done"
    );
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "mysql")]
fn generate_mysql(
    config: &DbConfig,
    filter: &ViewFilter,
    codegen_config: &CodeGenConfig,
) -> Result<Schema> {
    use viewlift::MySqlIntrospector;

    info!(connection = ?config.redacted_connection_string(), "Connecting to MySQL");

    let mut conn = mysql::Conn::new(config.mysql_opts())
        .map_err(|e| ViewliftError::Connection(e.to_string()))
        .with_context(|| {
            format!(
                "Failed to connect to MySQL at {}",
                config.redacted_connection_string()
            )
        })?;

    info!("Connected to database");

    let mut introspector = MySqlIntrospector::mysql(&mut conn);
    let schema = viewlift::generate(&mut introspector, &config.database, filter, codegen_config)
        .context("Failed to generate view code")?;

    Ok(schema)
}

#[cfg(not(feature = "mysql"))]
fn generate_mysql(
    _config: &DbConfig,
    _filter: &ViewFilter,
    _codegen_config: &CodeGenConfig,
) -> Result<Schema> {
    anyhow::bail!("MySQL support not enabled. Rebuild with --features mysql")
}
