// src/main.rs
use std::error::Error;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CEvent};
use crossterm::{execute, terminal::{EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter, prelude::*, Registry};

mod app;
mod config;
mod error;
mod github;
mod model;
mod store;
mod ui;

use app::App;
use config::{Settings, open_log_file};
use github::{Cloner, clone_in_background, load_repositories};
use model::{AppEvent, Effect};
use store::AccountStore;
use ui::Ui;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env();

    // initialize tracing to file only when GHM_LOG is set; the terminal belongs to the UI
    if let Some(path) = &settings.log_file {
        match open_log_file(path) {
            Ok(file) => {
                let filter =
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
                let fmt_layer = fmt::layer()
                    .with_writer(move || file.try_clone().expect("log file clone"))
                    .with_target(false)
                    .with_ansi(false);
                Registry::default().with(filter).with(fmt_layer).init();
                info!("Tracing initialized to {}", path.display());
            }
            Err(e) => eprintln!("Logging disabled: {}", e),
        }
    }
    for warning in &settings.warnings {
        warn!("{}", warning);
    }

    info!("Starting GitHub account manager");

    let store = AccountStore::new(settings.accounts_file.clone());
    let accounts = match store.load() {
        Ok(accounts) => accounts,
        Err(e) => {
            eprintln!("Error loading accounts from {}: {}", store.path().display(), e);
            warn!("Error loading accounts, starting empty: {}", e);
            Vec::new()
        }
    };
    let mut app = App::new(accounts, store);
    let ui = Ui::new(settings.theme.clone(), settings.develop_dir.clone());
    let cloner = Arc::new(Cloner::new(
        settings.develop_dir.clone(),
        settings.git.clone(),
        settings.git_host.clone(),
    ));

    // Terminal setup
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    crossterm::terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &ui, cloner).await;

    // Cleanup
    crossterm::terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("Exiting GitHub account manager");
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    ui: &Ui,
    cloner: Arc<Cloner>,
) -> Result<(), Box<dyn Error>> {
    // Channel for background tasks -> UI
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let tick_rate = Duration::from_millis(50);
    terminal.draw(|f| ui.draw(f, app))?;
    let mut last_tick = Instant::now();

    loop {
        // Advance spinner + redraw periodically
        if last_tick.elapsed() >= tick_rate {
            if app.loading {
                app.throbber_state.calc_next();
            }
            terminal.draw(|f| ui.draw(f, app))?;
            last_tick = Instant::now();
        }

        // Drain background events
        while let Ok(ev) = rx.try_recv() {
            app.apply_event(ev);
        }

        // Input handling
        if event::poll(Duration::from_millis(20))? {
            if let CEvent::Key(key) = event::read()? {
                match app.handle_key(key) {
                    Some(Effect::Quit) => break,
                    Some(Effect::ListRepositories { seq, client }) => {
                        debug!("Spawning repository listing #{}", seq);
                        tokio::spawn(load_repositories(client, seq, tx.clone()));
                    }
                    Some(Effect::Clone { repo, token }) => {
                        debug!("Spawning clone of {}", repo.title());
                        tokio::spawn(clone_in_background(cloner.clone(), repo, token, tx.clone()));
                    }
                    None => {}
                }
            }
        }
    }

    Ok(())
}
