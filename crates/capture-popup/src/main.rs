//! Dry-run a popup gesture against an in-memory browser
//!
//! Usage: `capture-popup <scenario.toml>`; prints the resolution report
//! as JSON.

use capture_popup_config::PopupConfig;
use clap::Parser;
use std::path::PathBuf;

mod logger;
mod scenario;

use scenario::Scenario;

#[derive(Debug, Parser)]
#[command(name = "capture-popup", version, about = "Dry-run a popup gesture against an in-memory browser")]
struct Cli {
    /// Scenario file with the browser state and the gesture to run
    scenario: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match logger::init() {
        Ok(log_file) => log::info!("Starting capture-popup, logging to {}", log_file.display()),
        Err(e) => eprintln!("Logging disabled: {:#}", e),
    }

    let config = PopupConfig::load();
    let level = logger::apply_configured_level(config.log_level.as_deref());
    log::debug!("Log level: {}", level);

    let scenario = Scenario::load(&cli.scenario)?;

    let report = scenario::run(scenario, config).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    log::info!("Exiting capture-popup");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scenario_path_is_required() {
        let cli = Cli::try_parse_from(["capture-popup", "click.toml"]).unwrap();
        assert_eq!(cli.scenario, PathBuf::from("click.toml"));

        assert!(Cli::try_parse_from(["capture-popup"]).is_err());
    }
}
