use clap::Subcommand;
use fitlog_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the configuration as JSON
    Show,
    /// Set a config value
    Set {
        /// Config key (e.g. "clock.warning_window_min")
        key: String,
        /// New value
        value: String,
    },
    /// Reset config to defaults
    Reset,
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    let bad = |e: &dyn std::fmt::Display| format!("invalid value for {key}: {e}");
    match key {
        "clock.warning_window_min" => {
            config.clock.warning_window_min = value.parse().map_err(|e| bad(&e))?;
        }
        "clock.tick_period_secs" => {
            config.clock.tick_period_secs = value.parse().map_err(|e| bad(&e))?;
        }
        "notifications.enabled" => {
            config.notifications.enabled = value.parse().map_err(|e| bad(&e))?;
        }
        "notifications.volume" => {
            config.notifications.volume = value.parse().map_err(|e| bad(&e))?;
        }
        "notifications.custom_sound" => {
            config.notifications.custom_sound = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
        _ => return Err(format!("unknown key: {key}")),
    }
    Ok(())
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            apply(&mut config, &key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_updates_known_keys() {
        let mut config = Config::default();
        apply(&mut config, "clock.warning_window_min", "15").unwrap();
        assert_eq!(config.clock.warning_window_min, 15);
        apply(&mut config, "notifications.enabled", "false").unwrap();
        assert!(!config.notifications.enabled);
    }

    #[test]
    fn apply_rejects_unknown_key_and_bad_value() {
        let mut config = Config::default();
        assert!(apply(&mut config, "nope", "1").is_err());
        assert!(apply(&mut config, "notifications.volume", "loud").is_err());
    }
}
