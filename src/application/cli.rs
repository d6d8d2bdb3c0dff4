#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::configuration::Preferences;
use crate::domain::models::Button;
use crate::domain::services::extract_toc;
use crate::domain::services::SyntectHighlighter;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn help_text() -> String {
    let buttons = Button::iter()
        .map(|button| return format!("- {}", button.label()))
        .collect::<Vec<String>>()
        .join("\n");

    return format!(
        r#"
TOOLBAR:
{buttons}

HOTKEYS:
- CTRL+S / CMD+S: Save.
- CTRL+SHIFT+S / CMD+SHIFT+S: Save as.
- CTRL+N / CMD+N: New document.
- CTRL+O / CMD+O: Open a file.
- CTRL+UP / CTRL+DOWN / Mouse wheel: Scroll the preview.
- CTRL+C / CTRL+Q: Quit. Pending edits are sent to the document and autosaved when enabled.
"#
    )
    .trim()
    .to_string();
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_recent() -> Command {
    return Command::new("recent").about("Lists recently opened and saved files, newest first.");
}

fn subcommand_toc() -> Command {
    return Command::new("toc")
        .about("Prints a table of contents for a markdown file.")
        .arg(
            Arg::new("path")
                .value_name("FILE")
                .help("Markdown file to read.")
                .required(true),
        );
}

async fn print_toc(file_path: &str) -> Result<()> {
    let content = fs::read_to_string(file_path)
        .await
        .with_context(|| return format!("Failed to read {file_path}"))?;
    let toc = extract_toc(&content)?;
    if !toc.is_empty() {
        println!("{toc}");
    }

    return Ok(());
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for markpad")
        .hide(true)
        .subcommand(
            Command::new("syntax-themes").about("List all supported code highlighting themes.")
        )
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running markpad with environment variable RUST_LOG=markpad")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("TOOLBAR:") || line.starts_with("HOTKEYS:") {
                return Paint::new(line).underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    let themes = SyntectHighlighter::theme_names();

    return Command::new("markpad")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_recent())
        .subcommand(subcommand_toc())
        .subcommand(subcommand_debug())
        .arg(
            Arg::new(ConfigKey::File.to_string())
                .value_name("FILE")
                .num_args(1)
                .help("Markdown file to open on start.")
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("MARKPAD_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::Theme.to_string())
                .short('t')
                .long(ConfigKey::Theme.to_string())
                .env("MARKPAD_THEME")
                .num_args(1)
                .help(format!("Initial color theme of the editor and preview. [default: {}]", Config::default(ConfigKey::Theme)))
                .value_parser(PossibleValuesParser::new(["light", "dark"])),
        )
        .arg(
            Arg::new(ConfigKey::Autosave.to_string())
                .long(ConfigKey::Autosave.to_string())
                .env("MARKPAD_AUTOSAVE")
                .num_args(1)
                .help(format!("Save the open file automatically after edits. [default: {}]", Config::default(ConfigKey::Autosave)))
                .value_parser(PossibleValuesParser::new(["true", "false"])),
        )
        .arg(
            Arg::new(ConfigKey::AutosaveDelay.to_string())
                .long(ConfigKey::AutosaveDelay.to_string())
                .env("MARKPAD_AUTOSAVE_DELAY")
                .num_args(1)
                .help(format!("Seconds without edits before an autosave. [default: {}]", Config::default(ConfigKey::AutosaveDelay))),
        )
        .arg(
            Arg::new(ConfigKey::QuietInterval.to_string())
                .long(ConfigKey::QuietInterval.to_string())
                .env("MARKPAD_QUIET_INTERVAL")
                .num_args(1)
                .help(format!("Milliseconds without typing before edits are sent to the document and the preview refreshes. [default: {}]", Config::default(ConfigKey::QuietInterval))),
        )
        .arg(
            Arg::new(ConfigKey::StatusTimeout.to_string())
                .long(ConfigKey::StatusTimeout.to_string())
                .env("MARKPAD_STATUS_TIMEOUT")
                .num_args(1)
                .help(format!("Milliseconds a status message stays visible. [default: {}]", Config::default(ConfigKey::StatusTimeout))),
        )
        .arg(
            Arg::new(ConfigKey::SyntaxThemeDark.to_string())
                .long(ConfigKey::SyntaxThemeDark.to_string())
                .env("MARKPAD_SYNTAX_THEME_DARK")
                .num_args(1)
                .help(format!("Code block highlighting theme used in dark mode. [default: {}]", Config::default(ConfigKey::SyntaxThemeDark)))
                .value_parser(PossibleValuesParser::new(themes.clone())),
        )
        .arg(
            Arg::new(ConfigKey::SyntaxThemeLight.to_string())
                .long(ConfigKey::SyntaxThemeLight.to_string())
                .env("MARKPAD_SYNTAX_THEME_LIGHT")
                .num_args(1)
                .help(format!("Code block highlighting theme used in light mode. [default: {}]", Config::default(ConfigKey::SyntaxThemeLight)))
                .value_parser(PossibleValuesParser::new(themes)),
        );
}

/// Handles subcommands and loads configuration. Returns whether the editor
/// should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("syntax-themes", _)) => {
                    println!("{}", SyntectHighlighter::theme_names().join("\n"));
                }
                Some(("log-path", _)) => {
                    let log_path = Config::log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("recent", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            for path in Preferences::from_config().recent_files().await? {
                println!("{}", path.to_string_lossy());
            }

            return Ok(false);
        }
        Some(("toc", subcmd_matches)) => {
            if let Some(file_path) = subcmd_matches.get_one::<String>("path") {
                print_toc(file_path).await?;
            }

            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
