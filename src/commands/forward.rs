//! Forward command implementation.

use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use tracing::info;

use super::{emit, load_domains};
use crate::config::Config;
use crate::render::ForwardScript;

/// Run the forward command
pub async fn run(config: &Config, output: Option<&Path>, dry_run: bool) -> Result<()> {
    let domains = load_domains(config).await?;

    let script = ForwardScript {
        source_url: &config.source_url,
        forward_to: &config.forward.forward_to,
        comment: &config.forward.comment,
        generated_at: Utc::now(),
    }
    .render(&domains);

    let path = output.unwrap_or(config.forward.output.as_path());
    info!(
        "Forwarding to {} with comment \"{}\"",
        config.forward.forward_to.join(","),
        config.forward.comment
    );

    emit(&script, path, domains.len(), dry_run)
}
