//! Forms TUI - Terminal User Interface for the forms API

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use forms_tui::api::{ApiClient, ApiClientTrait};
use forms_tui::app::App;
use forms_tui::config::TuiConfig;
use forms_tui::logging;
use forms_tui::state::Mode;
use forms_tui::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Poll interval while the stats counters animate (~60fps)
const ANIMATION_POLL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "forms-tui")]
#[command(about = "Terminal client for managing projects, forms and submissions")]
#[command(version)]
struct Cli {
    /// Start in the admin controller
    #[arg(long, conflicts_with = "user")]
    admin: bool,

    /// Start in the user controller (default)
    #[arg(long)]
    user: bool,

    /// API base URL (overrides config file and FORMS_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

impl Cli {
    fn mode(&self, config: &TuiConfig) -> Mode {
        if self.admin {
            Mode::Admin
        } else if self.user {
            Mode::User
        } else {
            config.mode()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    logging::setup_logging(logging::log_dir().as_deref())?;

    let config = TuiConfig::load()?.with_env();
    let mode = cli.mode(&config);
    let api_url = cli.api_url.as_deref().unwrap_or(config.api_url());
    let client = ApiClient::new(api_url, config.session_cookie.clone());
    tracing::info!(api_url = client.base_url(), ?mode, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Arc::new(client), mode);
    app.start();
    let result = run_app(&mut terminal, &mut app).await;

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

async fn run_app<B, C>(terminal: &mut Terminal<B>, app: &mut App<C>) -> Result<()>
where
    B: ratatui::backend::Backend,
    C: ApiClientTrait + 'static,
{
    loop {
        let size = terminal.size()?;
        app.terminal_size = Some((size.height, size.width));

        app.drain_outcomes();
        let now = Instant::now();
        app.tick(now);

        terminal.draw(|frame| ui::draw(frame, app))?;

        let poll = if app.state.stats.is_animating(now) {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };

        if event::poll(poll)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key)?,
                Event::Resize(width, height) => {
                    app.terminal_size = Some((height, width));
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        // Let spawned requests make progress between frames
        tokio::task::yield_now().await;
    }
}
