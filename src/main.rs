//! Incidents TUI - terminal client for incident reports
//!
//! Lists, filters, pages, creates, advances and deletes incidents held by a
//! remote REST service.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use incidents_tui::api::{ApiClient, Status};
use incidents_tui::app::App;
use incidents_tui::config::{DeleteRefresh, Settings, DEFAULT_SERVER, DEFAULT_TIMEOUT_SECS};
use incidents_tui::{logging, screens, ui};

/// Incidents TUI - browse and triage incident reports
#[derive(Parser, Debug)]
#[command(name = "incidents")]
#[command(about = "Terminal UI for incident reports")]
struct Args {
    /// Incidents collection URL; `status` and `page_size` query parameters
    /// seed the initial view
    #[arg(default_value = DEFAULT_SERVER)]
    server: String,

    /// Only show incidents with this status (open, in_progress, resolved)
    #[arg(short, long)]
    status: Option<Status>,

    /// Incidents per page (1-100, server default otherwise)
    #[arg(short, long)]
    page_size: Option<u32>,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// List refresh strategy after a successful delete
    #[arg(long, value_enum, default_value_t = DeleteRefresh::Reload)]
    after_delete: DeleteRefresh,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::from_url(
        &args.server,
        args.status,
        args.page_size,
        args.timeout,
        args.after_delete,
    )?;
    let _log_guard = logging::init(args.verbose)?;
    tracing::info!(?settings, "Starting");

    let client = ApiClient::new(&settings.base_url, settings.timeout)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&settings, Arc::new(client));
    app.state.set_terminal_height(terminal.size()?.height);
    app.load_page(1);

    // Main loop
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
        if let Some(path) = logging::log_file_path() {
            eprintln!("Log: {}", path.display());
        }
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply finished requests
        app.poll_background();
        app.tick(Instant::now());

        terminal.draw(|f| ui::draw(f, app))?;

        // Handle input (with timeout so background results keep flowing)
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = screens::handle_input(app, key);
                    app.dispatch(action);
                }
                Event::Resize(_, height) => app.state.set_terminal_height(height),
                _ => {}
            }
        }

        if app.state.should_quit {
            return Ok(());
        }

        // Let spawned requests make progress between frames
        tokio::task::yield_now().await;
    }
}
