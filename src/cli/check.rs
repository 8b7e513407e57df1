//! `gaffer check config`.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::app::config::DEFAULT_CONFIG_FILE;
use crate::app::Config;
use crate::error::Result;

/// Validate the configuration and show the effective settings.
pub fn execute_config(path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(path)?;
    let shown = match path {
        Some(path) => path.display().to_string(),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => DEFAULT_CONFIG_FILE.to_string(),
        None => "(defaults)".to_string(),
    };
    let source = match &config.source.snapshot_path {
        Some(snapshot) => format!("snapshot {}", snapshot.display()),
        None => config.source.base_url.clone(),
    };

    if output::is_json() {
        return output::json_output(&json!({
            "command": "check.config",
            "valid": true,
            "config": shown,
            "source": source,
            "solver_time_limit_secs": config.solver.time_limit_secs,
            "budget": config.squad.budget,
            "horizon": config.squad.horizon,
            "penalty_per_transfer": config.transfers.penalty_per_transfer,
            "log_level": config.logging.level,
        }));
    }

    output::section("Configuration Check");
    output::field("Config", &shown);
    output::success("Configuration is valid");

    output::section("Summary");
    output::field("Source", source);
    output::field("Solver limit", format!("{}s", config.solver.time_limit_secs));
    output::field("Budget", output::money(config.squad.budget));
    output::field("Horizon", config.squad.horizon);
    output::field(
        "Transfer hit",
        format!("{} pts", config.transfers.penalty_per_transfer),
    );
    output::field("Logging", format!("{} ({})", config.logging.level, config.logging.format));

    Ok(())
}
