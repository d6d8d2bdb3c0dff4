#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    Autosave,
    AutosaveDelay,
    ConfigFile,
    File,
    QuietInterval,
    StatusTimeout,
    SyntaxThemeDark,
    SyntaxThemeLight,
    Theme,
}

impl ConfigKey {
    pub fn is_special(&self) -> bool {
        return *self == ConfigKey::ConfigFile || *self == ConfigKey::File;
    }
}

fn find_arg<'a>(cmd: &'a Command, key: ConfigKey) -> Option<&'a clap::Arg> {
    let name = key.to_string();
    return cmd
        .get_arguments()
        .find(|e| return e.get_long() == Some(name.as_str()));
}

fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
    if let Some(arg) = find_arg(cmd, key) {
        return arg
            .get_possible_values()
            .iter()
            .map(|e| return e.get_name().to_string())
            .collect::<Vec<String>>();
    }

    return vec![];
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn get_u64(key: ConfigKey) -> Result<u64> {
        return Config::parse_u64(key, &Config::get(key));
    }

    fn parse_u64(key: ConfigKey, val: &str) -> Result<u64> {
        return val.parse::<u64>().with_context(|| {
            return format!("Config value for '{key}' must be a whole number, got '{val}'");
        });
    }

    pub fn get_bool(key: ConfigKey) -> bool {
        return Config::get(key) == "true";
    }

    pub fn default(key: ConfigKey) -> String {
        let config_path = dirs::config_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("markpad/config.toml");

        let res = match key {
            ConfigKey::Autosave => "true",
            ConfigKey::AutosaveDelay => "5",
            ConfigKey::QuietInterval => "300",
            ConfigKey::StatusTimeout => "3000",
            ConfigKey::SyntaxThemeDark => "base16-ocean.dark",
            ConfigKey::SyntaxThemeLight => "InspiredGitHub",
            ConfigKey::Theme => "light",

            // Special
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
            ConfigKey::File => "",
        };

        return res.to_string();
    }

    pub fn log_dir() -> path::PathBuf {
        if let Ok(dir) = env::var("MARKPAD_LOG_DIR") {
            return path::PathBuf::from(dir);
        }

        return dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("markpad");
    }

    pub fn parse_toml(cmd: &Command, toml_str: &str) -> Result<Vec<(ConfigKey, String)>> {
        let doc = toml_str.parse::<toml_edit::Document>()?;
        let mut values = vec![];

        for key in ConfigKey::iter().filter(|key| return !key.is_special()) {
            let item = match doc.get(&key.to_string()) {
                Some(item) => item,
                None => continue,
            };

            let val = if let Some(val_int) = item.as_integer() {
                if val_int < 0 {
                    bail!(format!("config.toml has an invalid value for key '{key}': {val_int}\nValue must not be negative"));
                }
                val_int.to_string()
            } else if let Some(val_bool) = item.as_bool() {
                val_bool.to_string()
            } else if let Some(val_str) = item.as_str() {
                val_str.to_string()
            } else {
                bail!(format!("config.toml has an unsupported value type for key '{key}'"));
            };

            if val.is_empty() {
                continue;
            }

            let possible_values = possible_values(cmd, key);
            if !possible_values.is_empty() && !possible_values.contains(&val) {
                bail!(format!(
                    "config.toml has an invalid value for key '{key}': {val}\nPossible values are: {}",
                    possible_values.join(", ")
                ));
            }

            values.push((key, val));
        }

        return Ok(values);
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            for (key, val) in Config::parse_toml(&cmd, &toml_str)? {
                Config::set(key, &val);
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            theme = Config::get(ConfigKey::Theme),
            autosave = Config::get(ConfigKey::Autosave),
            autosave_delay = Config::get(ConfigKey::AutosaveDelay),
            quiet_interval = Config::get(ConfigKey::QuietInterval),
            status_timeout = Config::get(ConfigKey::StatusTimeout),
            file = Config::get(ConfigKey::File),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key.is_special() {
                    return None;
                }

                let arg = find_arg(&cmd, key)?;
                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let possible_values = possible_values(&cmd, key);
                if !possible_values.is_empty() {
                    description = format!(
                        "{description} [possible values: {}]",
                        possible_values.join(", ")
                    );
                }

                let val = Config::default(key);
                let line = if val.parse::<u64>().is_ok() || val == "true" || val == "false" {
                    format!("{key} = {val}")
                } else {
                    format!("{key} = \"{val}\"")
                };

                return Some(format!("# {description}\n{line}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
