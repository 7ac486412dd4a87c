use crate::commands::{CmdMessage, CmdResult, StudentDbPaths};
use crate::config::{ConfigKey, StudentDbConfig};
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(ConfigKey),
    Set(ConfigKey, String),
}

pub fn run(paths: &StudentDbPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = StudentDbConfig::load(&paths.home)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {
            result.add_message(CmdMessage::info(format!(
                "Database file: {}",
                paths.database.display()
            )));
        }
        ConfigAction::ShowKey(key) => {
            result.add_message(CmdMessage::info(format!(
                "{} = {}",
                key.name(),
                config.get(key)
            )));
        }
        ConfigAction::Set(key, value) => {
            config.set(key, &value)?;
            config.save(&paths.home)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key.name(),
                config.get(key)
            )));
        }
    }

    Ok(result.with_config(config))
}
