//! `sync` command: run the catalog pipeline and write the resulting nodes.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use shifter_core::{AppConfig, CatalogConfig, CatalogNode, CatalogOptions};
use shifter_stripe::StripeClient;

/// Builds the catalog configuration for this run from the optional options
/// file, with defaults applied.
pub(crate) fn load_catalog_config(config: &AppConfig) -> anyhow::Result<CatalogConfig> {
    let options = match &config.catalog_path {
        Some(path) => shifter_core::load_catalog_options(path)
            .with_context(|| format!("loading catalog options from {}", path.display()))?,
        None => CatalogOptions::default(),
    };
    Ok(CatalogConfig::apply_defaults(options))
}

pub(crate) async fn run_sync(
    config: &AppConfig,
    pretty: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let catalog = load_catalog_config(config)?;
    let client = StripeClient::with_base_url(
        &config.stripe_api_secret,
        &config.stripe_api_version,
        config.request_timeout_secs,
        &config.stripe_base_url,
    )?;

    tracing::info!(
        node_type = %catalog.node_type,
        extra_ids = catalog.additional_product_ids.len(),
        "starting catalog sync"
    );
    let nodes = shifter_catalog::run(&client, &catalog, config.fetch_concurrency).await?;

    let rendered = render_nodes(&nodes, pretty)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing nodes to {}", path.display()))?;
            tracing::info!(path = %path.display(), nodes = nodes.len(), "wrote catalog nodes");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Serializes nodes as a JSON array followed by a newline.
pub(crate) fn render_nodes(nodes: &[CatalogNode], pretty: bool) -> anyhow::Result<String> {
    let mut rendered = if pretty {
        serde_json::to_string_pretty(nodes)?
    } else {
        serde_json::to_string(nodes)?
    };
    rendered.push('\n');
    Ok(rendered)
}
