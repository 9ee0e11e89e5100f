//! CLI entry point for dbconnect.
//!
//! Lists the databases registered in the parameter store, prints their
//! connection URIs, and opens their documentation.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dbconnect::docs::open_docs;
use dbconnect::infra::{AwsClients, SystemBrowser};
use dbconnect::resolver::DEFAULT_NAMESPACE;
use dbconnect::{ConnectionRequest, ConnectionResolver, Overrides};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "dbconnect")]
#[command(about = "Connect to named databases using credentials from AWS", long_about = None)]
struct Cli {
    /// Parameter store namespace (first path segment)
    #[arg(long, env = "DBCONNECT_NAMESPACE", default_value = DEFAULT_NAMESPACE, global = true)]
    namespace: String,

    /// AWS region to use instead of the default provider chain
    #[arg(long, global = true)]
    region: Option<String>,

    /// JSON file of per-database overrides ({"db": {"field": "value"}})
    #[arg(long, value_name = "FILE", global = true)]
    overrides: Option<String>,

    /// Ignore DBCONNECT_* environment overrides
    #[arg(long, default_value_t = false, global = true)]
    no_env_overrides: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the databases that can be connected to
    List,
    /// Print the connection URI for a database
    Url {
        #[arg(value_name = "DATABASE")]
        database: String,

        /// Print the password instead of ***
        #[arg(long, default_value_t = false)]
        show_password: bool,

        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Open the documentation for a database
    Docs {
        #[arg(value_name = "DATABASE")]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/dbconnect.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("dbconnect.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut overrides = if cli.no_env_overrides {
        Overrides::none()
    } else {
        Overrides::from_env()
    };
    if let Some(path) = &cli.overrides {
        overrides = overrides.load(path)?;
        info!(path = %path, "Loaded override file");
    }

    let aws = AwsClients::load(cli.region).await;
    let resolver = ConnectionResolver::new(Arc::new(aws.parameters))
        .with_namespace(&cli.namespace)
        .with_overrides(overrides)
        .with_credential_exchange(Arc::new(aws.identity), Arc::new(aws.credentials));

    match cli.command {
        Commands::List => {
            for name in resolver.list_databases().await? {
                println!("{name}");
            }
        }
        Commands::Url {
            database,
            show_password,
            json,
        } => {
            let request = resolver.build_connection_uri(&database).await?;
            print_request(&request, show_password, json)?;
        }
        Commands::Docs { database } => {
            open_docs(&resolver, &SystemBrowser, &database).await?;
        }
    }

    Ok(())
}

fn print_request(request: &ConnectionRequest, show_password: bool, json: bool) -> Result<()> {
    let uri = if show_password {
        request.uri.to_string()
    } else {
        request.uri.redacted()
    };

    if json {
        let connect_args: serde_json::Map<String, serde_json::Value> = request
            .connect_args()
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
            .collect();
        let out = serde_json::json!({
            "database": request.database,
            "backend": request.backend,
            "uri": uri,
            "connect_args": connect_args,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{uri}");
        for (key, value) in request.connect_args() {
            println!("{key}={value}");
        }
    }
    Ok(())
}
