use std::{process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use gallery_api::{
    db::connection_string::{DatabaseUrl, HostTopology},
    diagnostics::{probe_connection, resolve_host, DnsOutcome, FailureKind},
    settings::{AppConfig, AppEnvironment},
    telemetry::init_tracing,
};

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Verifies the configured connection string and tries a `SELECT 1`.
/// Usage: `gallery-dbcheck [DATABASE_URL]`.
#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(&AppEnvironment::Development);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nFAILED: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let database_url = load_database_url()?;

    println!("Connection string components:");
    println!("  scheme:    {}", database_url.scheme());
    println!("  username:  {}", database_url.username());
    println!("  password:  {}", database_url.masked_password().unwrap_or_else(|| "(none)".to_string()));
    println!("  host:      {}", database_url.host());
    println!("  port:      {}", database_url.port());
    println!("  database:  {}", database_url.database());
    if let Some(query) = database_url.query() {
        println!("  options:   {query}");
    }

    let topology = database_url.topology();
    println!("\nTopology: {topology}");
    if topology == HostTopology::Custom {
        println!("  port {} is neither the direct (5432) nor the pooler (6543) port", database_url.port());
    }

    let warnings = database_url.warnings();
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &warnings {
            println!("  - {warning}");
        }
    }

    println!("\nResolving {}...", database_url.host());
    let dns = resolve_host(database_url.host(), database_url.port()).await;
    println!("  {dns}");
    if let DnsOutcome::Failed(_) = dns {
        print_hints(FailureKind::Dns);
        anyhow::bail!("could not resolve {}", database_url.host());
    }

    println!("\nConnecting...");
    match probe_connection(&database_url, PROBE_TIMEOUT).await {
        Ok(value) => {
            println!("  SELECT 1 returned {value}");
            println!("\nDatabase connection OK.");
            Ok(())
        }
        Err(e) => {
            let kind = FailureKind::classify(&e.to_string());
            println!("  {kind}: {e}");
            print_hints(kind);
            Err(e).context("connection probe failed")
        }
    }
}

fn load_database_url() -> Result<DatabaseUrl> {
    if let Some(raw) = std::env::args().nth(1) {
        return DatabaseUrl::parse(&raw).context("invalid connection string argument");
    }

    let config = AppConfig::new().context("failed to load configuration")?;
    config.database().context("invalid configured connection string")
}

fn print_hints(kind: FailureKind) {
    println!("\nPossible fixes:");
    for hint in kind.hints() {
        println!("  - {hint}");
    }
}
