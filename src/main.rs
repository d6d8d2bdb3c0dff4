#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;
use anyhow::Result;
use domain::models::Action;
use domain::models::Event;
use domain::models::Notification;
use domain::services::SessionController;
use domain::services::SessionParts;
use domain::services::SessionService;
use domain::services::SessionSettings;
use domain::services::SyntectHighlighter;
use infrastructure::backends::local::LocalDocument;
use infrastructure::backends::local::LocalSettings;
use infrastructure::editors::terminal::TerminalEditor;
use infrastructure::views::terminal::TerminalDialogs;
use infrastructure::views::terminal::TerminalView;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::configuration::Preferences;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! markpad has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

struct Launch {
    settings: SessionSettings,
    local: LocalSettings,
    highlighter: SyntectHighlighter,
    initial_file: Option<PathBuf>,
}

fn launch_from_config() -> Result<Launch> {
    let dark_mode = Config::get(ConfigKey::Theme) == "dark";
    let autosave_enabled = Config::get_bool(ConfigKey::Autosave);

    let file = Config::get(ConfigKey::File);
    let initial_file = if file.is_empty() {
        None
    } else {
        Some(PathBuf::from(file))
    };

    return Ok(Launch {
        settings: SessionSettings {
            quiet_interval: Duration::from_millis(Config::get_u64(ConfigKey::QuietInterval)?),
            status_timeout: Duration::from_millis(Config::get_u64(ConfigKey::StatusTimeout)?),
            dark_mode,
            autosave_enabled,
        },
        local: LocalSettings {
            dark_mode,
            autosave_enabled,
            autosave_delay: Duration::from_secs(Config::get_u64(ConfigKey::AutosaveDelay)?),
        },
        highlighter: SyntectHighlighter::new(
            &Config::get(ConfigKey::SyntaxThemeDark),
            &Config::get(ConfigKey::SyntaxThemeLight),
        )?,
        initial_file,
    });
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let file_appender = tracing_appender::rolling::never(Config::log_dir(), "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("markpad")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    match cli::parse().await {
        Ok(true) => (),
        Ok(false) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    }

    let launch = match launch_from_config() {
        Ok(launch) => launch,
        Err(err) => {
            handle_error(err);
            return;
        }
    };

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    let (notification_tx, notification_rx) = mpsc::unbounded_channel::<Notification>();

    let backend = LocalDocument::new(
        notification_tx,
        Arc::new(TerminalDialogs::new(event_tx.clone())),
        launch.local,
    )
    .with_preferences(Arc::new(Preferences::from_config()));
    let controller = SessionController::new(
        SessionParts {
            backend: Arc::new(backend),
            notifications: notification_rx,
            view: Arc::new(TerminalView::new(event_tx.clone())),
            editor: Arc::new(TerminalEditor::new(event_tx)),
            highlighter: Arc::new(launch.highlighter),
        },
        launch.settings,
    );

    let initial_file = launch.initial_file;
    let session = tokio::spawn(async move {
        return SessionService::start(controller, initial_file, &mut action_rx).await;
    });

    let ui_res = ui::start(
        action_tx,
        event_rx,
        launch.settings.dark_mode,
        launch.settings.autosave_enabled,
    )
    .await;
    if ui_res.is_err() {
        ui::destruct_terminal_for_panic();
    }

    // The UI has dropped its action sender, so the session flushes pending
    // edits and shuts the backend down before returning. This runs before
    // any UI error is reported, since reporting exits the process.
    let session_res = match session.await {
        Ok(res) => res,
        Err(err) => Err(err.into()),
    };

    if let Err(err) = ui_res {
        handle_error(err);
    }
    if let Err(err) = session_res {
        handle_error(err);
    }

    process::exit(0);
}
