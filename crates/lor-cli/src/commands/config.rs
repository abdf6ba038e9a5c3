//! Configuration management commands.

use crate::cli::ConfigCommand;
use crate::output::{info, success};
use crate::CliConfig;

/// Runs a config command.
pub fn run_config(cmd: ConfigCommand, config: &mut CliConfig) -> crate::CliResult<()> {
    match cmd {
        ConfigCommand::Show => show_config(config),
        ConfigCommand::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            success(&format!("Set {} = {}", key, value));
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", CliConfig::config_path()?.display());
            Ok(())
        }
    }
}

/// Shows the current configuration.
fn show_config(config: &CliConfig) -> crate::CliResult<()> {
    info(&format!(
        "Configuration file: {}",
        CliConfig::config_path()?.display()
    ));
    println!();
    println!("server_url: {}", config.server_url);
    println!("storage_dir: {}", config.effective_storage_dir()?.display());
    println!("timeout_secs: {}", config.timeout_secs);
    println!("output_format: {:?}", config.output_format);
    Ok(())
}
