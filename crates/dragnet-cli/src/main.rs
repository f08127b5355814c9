use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use dragnet_config::DragnetConfig;
use dragnet_postgres::PgExecutor;
use dragnet_query::{OperatorTable, QueryCatalog, QueryCompiler, SchemaCatalog, SemanticType};
use dragnet_web::{start_server, AppState};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = cli.effective_log_level();
    let env_filter = format!(
        "dragnet_cli={0},dragnet_web={0},dragnet_query={0},dragnet_postgres={0},dragnet_config={0}",
        level
    );
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .init();

    // Load configuration with CLI overrides
    let mut config = DragnetConfig::load_or_default(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.bind_address = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(url) = cli.database_url {
        config.database.url = Some(url);
    }

    let schema = schema_catalog(&config)?;
    let compiler = QueryCompiler::new(Arc::new(OperatorTable::builtin()), Arc::new(schema));

    let executor = PgExecutor::connect(&config.database.connection_string())
        .await
        .context("failed to connect to the database")?;
    info!("Database connection established");

    let state = AppState::new(compiler, Arc::new(executor), QueryCatalog::builtin());
    start_server(&config.server, state).await?;

    Ok(())
}

/// Builds the compiler's type catalog from `[schema.types]`, rejecting
/// any declaration whose type name the operator table does not know.
fn schema_catalog(config: &DragnetConfig) -> Result<SchemaCatalog> {
    let mut entries = Vec::with_capacity(config.schema.types.len());
    for (path, type_name) in &config.schema.types {
        let ty = SemanticType::from_str(type_name)
            .map_err(|err| anyhow::anyhow!("schema declaration '{path}': {err}"))?;
        entries.push((path.clone(), ty));
    }
    Ok(SchemaCatalog::from_entries(entries))
}
