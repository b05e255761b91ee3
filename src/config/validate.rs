// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SupervisorError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SupervisorError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.commands))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_shell(cfg)?;
    validate_commands("pre", &cfg.commands.pre)?;
    validate_commands("run", &cfg.commands.run)?;
    validate_commands("post", &cfg.commands.post)?;
    Ok(())
}

fn validate_shell(cfg: &RawConfigFile) -> Result<()> {
    if let Some(shell) = &cfg.config.shell {
        if shell.trim().is_empty() {
            return Err(SupervisorError::ConfigError(
                "[config].shell must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_commands(group: &str, commands: &[String]) -> Result<()> {
    for (index, cmd) in commands.iter().enumerate() {
        if cmd.trim().is_empty() {
            return Err(SupervisorError::ConfigError(format!(
                "[commands].{group}[{index}] is empty"
            )));
        }
    }
    Ok(())
}
