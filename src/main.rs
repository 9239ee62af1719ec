//! Command line client for path-chained API calls.
//!
//! ```text
//! api-tree --config client.toml --params '{"id": 7}' user/info/getP
//! ```

use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use api_tree::config::{load_config, ClientConfig};
use api_tree::observability::logging::init_logging;
use api_tree::routing::{BoundCall, Params};
use api_tree::transport::ReqwestTransport;
use api_tree::{Dispatcher, RequestConfig, ResponseEnvelope, RouteTree};

#[derive(Parser)]
#[command(name = "api-tree")]
#[command(about = "Invoke an API endpoint by its chained path", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured base URL.
    #[arg(short, long)]
    base_url: Option<String>,

    /// Session key sent in the Session-Key header.
    #[arg(short, long)]
    session: Option<String>,

    /// Query parameters as a JSON object.
    #[arg(short, long)]
    params: Option<String>,

    /// Request body as JSON.
    #[arg(long)]
    body: Option<String>,

    /// Show the loading indicator events.
    #[arg(long)]
    loading: bool,

    /// Chained path, e.g. `user/info/getP`.
    path: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if cli.session.is_some() {
        config.session.token = cli.session.clone();
    }

    init_logging(&config.observability);

    tracing::info!(
        base_url = %config.base_url,
        whitelist = config.auth_whitelist.len(),
        timeout_secs = config.transport.timeout_secs,
        "Configuration loaded"
    );

    let params: Params = match &cli.params {
        Some(raw) => serde_json::from_str(raw)?,
        None => Params::new(),
    };
    let body: Option<Value> = cli
        .body
        .as_deref()
        .map(|raw| serde_json::from_str(raw))
        .transpose()?;

    let transport = Arc::new(ReqwestTransport::new(&config.transport)?);
    let dispatcher = Dispatcher::new(config, transport);
    let api = RouteTree::new(Arc::new(dispatcher));

    let node = api
        .path(&cli.path)
        .ok_or_else(|| format!("path '{}' has no segments", cli.path))?;
    tracing::info!(
        url = %node.spec().url,
        verb = %node.spec().verb,
        shape = ?node.spec().shape,
        "Resolved endpoint"
    );

    let request_config = RequestConfig::new().show_loading(cli.loading);
    let response: ResponseEnvelope = match node.call() {
        BoundCall::ParamsOnly(call) => call.call(params, request_config).await?,
        BoundCall::BodyOnly(call) => call.call(body, request_config).await?,
        BoundCall::NoArgs(call) => call.call(request_config).await?,
        BoundCall::ParamsAndBody(call) => call.call(params, body, request_config).await?,
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
