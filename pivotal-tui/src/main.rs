//! Pivotal TUI: interactive trend dashboard for one symbol.
//!
//! Reads `pivotal.toml` from the platform config directory (all fields
//! optional), fetches the configured symbol and runs until `q`.

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pivotal_core::DashboardConfig;
use pivotal_tui::{AppState, input, ui};

fn main() -> Result<()> {
    init_logging()?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let config_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pivotal")
        .join("pivotal.toml");
    let config = DashboardConfig::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let provider = config
        .build_provider()
        .context("initializing data provider")?;
    info!(symbol = %config.symbol, provider = provider.name(), "starting dashboard");

    let mut app = AppState::new(config, provider);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // First frame goes up before the initial fetch blocks.
    terminal.draw(|f| ui::draw(f, &app))?;
    app.refresh();

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }
    }
    Ok(())
}

/// Log to a file so output never lands on the alternate screen.
fn init_logging() -> Result<()> {
    let path = std::env::temp_dir().join("pivotal-tui.log");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
