use reel::adapters::{FileAssetStore, ManifestWatcher, SystemLauncher, TracingAnalytics, DEFAULT_DEBOUNCE};
use reel::app::{App, AppMessage};
use reel::cli::{parse_args, run_cli_command, RunOptions};
use reel::config::Config;
use reel::downloads::DownloadsScope;
use reel::traits::AssetSource;
use reel::{logging, ui};

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

fn main() -> Result<()> {
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("reel: {}\n\n{}", e, reel::cli::USAGE);
            std::process::exit(2);
        }
    };
    let Some(options) = run_cli_command(command) else {
        return Ok(());
    };

    color_eyre::install()?;

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let config = Config::load(&options)?;
    let data_dir = config.resolved_data_dir()?;
    let log_path = logging::init(&data_dir, &config.log_filter)?;
    info!(version = reel::cli::VERSION, log = %log_path.display(), "starting reel");

    let store = Arc::new(FileAssetStore::open(&data_dir)?);
    let scope = initial_scope(&options, store.as_ref());

    let runtime = tokio::runtime::Runtime::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = runtime.block_on(async {
        let source: Arc<dyn AssetSource> = store.clone();
        let mut app = App::new(
            &config,
            source,
            Rc::new(SystemLauncher::new(config.player_command.clone())),
            Rc::new(TracingAnalytics::new()),
        )
        .with_manifest_store(store.clone());

        let _watcher = if config.watch_manifest {
            match ManifestWatcher::spawn(store.manifest_path(), DEFAULT_DEBOUNCE, app.message_sender()) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    warn!(code = e.error_code(), "manifest watching disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        app.start(scope);
        run_app(&mut terminal, &mut app).await
    });

    restore_terminal(&mut terminal)?;
    info!("reel exited");
    result
}

/// Root screen: everything, or one series when `--series` was given.
fn initial_scope(options: &RunOptions, store: &FileAssetStore) -> DownloadsScope {
    let Some(series_id) = options.series.clone() else {
        return DownloadsScope::All;
    };
    let title = store
        .episode_assets(&series_id)
        .ok()
        .and_then(|episodes| episodes.into_iter().find_map(|e| e.series_title))
        .unwrap_or_else(|| series_id.clone());
    DownloadsScope::Series { series_id, title }
}

/// Setup panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        original_hook(panic_info);
    }));
}

/// Restore terminal to normal mode
fn restore_terminal<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        // 16ms tick drives the spinner and status expiry
        let timeout = tokio::time::sleep(std::time::Duration::from_millis(16));

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => warn!("terminal event error: {}", e),
                    None => app.quit(),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
