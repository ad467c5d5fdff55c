#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Run one uLogin sign-in against in-memory stores and print the account.
//!
//! ```text
//! ulogin-auth-cli --config ulogin.yaml --host example.com --field token=abc
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use auth_driver::AuthDriverModule;
use auth_driver::config::AuthDriverConfig;
use auth_driver_sdk::{AuthRequest, SubmittedFields};
use clap::Parser;
use modkit_security::ActorSession;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ulogin_auth_plugin::infra::{InMemoryResourceStore, InMemoryUserStore};
use ulogin_auth_plugin::{ULoginPlugin, ULoginPluginConfig};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// YAML configuration of the plugin. `ULOGIN_*` variables override it.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Submitted form field as `name=value`. Repeatable, order is kept.
    #[arg(long = "field", short = 'f', value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Host the submission was made to.
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Driver to authenticate with. Defaults to the host's default driver.
    #[arg(long)]
    driver: Option<String>,

    /// Emit logs as JSON.
    #[arg(long)]
    json_logs: bool,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    let config = ULoginPluginConfig::load(args.config.as_deref())
        .context("failed to load uLogin plugin configuration")?;

    let resources = Arc::new(InMemoryResourceStore::new());
    let users = Arc::new(InMemoryUserStore::new(resources.clone()));
    let plugin = ULoginPlugin::from_config(config, users, resources)?;
    let module = AuthDriverModule::init(AuthDriverConfig::default(), &[&plugin])?;

    let driver = args
        .driver
        .as_deref()
        .unwrap_or_else(|| module.default_driver());
    let fields: SubmittedFields = args.fields.into_iter().collect();
    let request = AuthRequest::new(fields, args.host);
    let mut session = ActorSession::anonymous();

    let account = module
        .client()
        .authenticate(driver, &mut session, &request)
        .await?;
    info!(account_id = %account.id, driver, "sign-in succeeded");

    println!("{}", serde_json::to_string_pretty(&account)?);
    Ok(())
}
