//! ado-review-tui - Terminal dashboard for Azure DevOps pull requests
//!
//! Lists the active pull requests of a project where you are a reviewer,
//! with toggles for drafts, your own requests and requests you do not review.

mod app;
mod azure;
mod config;
mod credentials;
mod error;
mod state;
mod ui;

use anyhow::Result;
use app::{AppEvent, Command, DashboardApp, ErrorApp, Model};
use azure::{AzureConnector, ClientSettings, Connector};
use clap::{Parser, Subcommand};
use config::TuiConfig;
use credentials::{
    ensure_secret, reset_all, CredentialRetryMachine, KeyringStore, Prompter, SecretKind,
    SecretStore, TerminalPrompter,
};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::StartupError;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::Theme;

#[derive(Debug, Parser)]
#[command(name = "ado-review-tui", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Forget the stored PAT, organization and project, then prompt for new ones
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ado_review_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = TuiConfig::load_or_default();
    let store = KeyringStore;
    let prompter = TerminalPrompter;

    if matches!(cli.command, Some(CliCommand::Reset)) {
        let failures = reset_all(&store);
        for (kind, err) in &failures {
            eprintln!("Failed to delete stored {}: {err}", kind.label());
        }
        if failures.is_empty() {
            println!("Stored PAT, organization and project were deleted.");
        }
    }

    let connector = AzureConnector::new(ClientSettings::from_config(&config));

    let mut model = match start(&config, &store, &prompter, &connector).await {
        Ok(model) => model,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, model.as_mut());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Resolve credentials, connect, and pick the screen to show
async fn start(
    config: &TuiConfig,
    store: &dyn SecretStore,
    prompter: &dyn Prompter,
    connector: &dyn Connector,
) -> Result<Box<dyn Model>, StartupError> {
    let organization = ensure_secret(store, prompter, SecretKind::Organization)?;
    let project = ensure_secret(store, prompter, SecretKind::Project)?;

    let connected = CredentialRetryMachine::new(store, prompter, connector)
        .run(&organization, &project)
        .await?;

    let theme = Theme::default();
    let model: Box<dyn Model> = match connected.api.current_user_id().await {
        Ok(user_id) => Box::new(DashboardApp::new(
            connected.requests,
            user_id,
            config.ignored_reviewer_ids(),
            theme,
        )),
        Err(err) => {
            tracing::error!("Could not determine the current user: {err}");
            Box::new(ErrorApp::new(err.to_string(), theme))
        }
    };
    Ok(model)
}

/// Read events until the model asks to quit, redrawing after each one
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    model: &mut dyn Model,
) -> Result<()> {
    let size = terminal.size()?;
    let mut command = model.init();
    if command != Command::Quit {
        command = model.update(AppEvent::Resize(size.width, size.height));
    }

    loop {
        if command == Command::Quit {
            return Ok(());
        }

        terminal.draw(|frame| model.view(frame))?;

        command = match event::read()? {
            Event::Key(key) => model.update(AppEvent::Key(key)),
            Event::Resize(width, height) => model.update(AppEvent::Resize(width, height)),
            _ => Command::None,
        };
    }
}
