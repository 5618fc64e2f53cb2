use std::io;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use nowplaying::app::cli::Args;
use nowplaying::app::config::{AppConfig, UserConfig};
use nowplaying::app::events::AppEvent;
use nowplaying::app::{Action, App};
use nowplaying::poller::{self, HttpSource, PollState, Poller};
use nowplaying::ui::{self, Visual};
use nowplaying::logging;

/// Redraw cadence for the wave bars (~20 FPS).
const FRAME: Duration = Duration::from_millis(50);

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let args = Args::parse();
    if args.generate_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config = args.apply(AppConfig::load(args.config.as_deref())?);
    config.validate()?;

    let source = HttpSource::new(config.endpoint_url()?, &config.http_options())
        .context("building http client")?;

    if args.once {
        logging::init_stderr(&config.log_level)?;
        return run_once(&source).await;
    }
    if args.plain {
        logging::init_stderr(&config.log_level)?;
        return run_plain(source, &config).await;
    }

    let _log_guard = logging::init_file(&AppConfig::get_log_dir(), &config.log_level)?;
    info!(endpoint = %source.endpoint(), interval_ms = config.interval_ms, "starting widget");
    run_tui(source, &config).await
}

async fn run_once(source: &HttpSource) -> Result<()> {
    let state = poller::poll_once(source).await;
    if let PollState::Error(err) = &state {
        warn!(kind = ?err.kind(), error = %err, "poll failed");
    }
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

async fn run_plain(source: HttpSource, config: &UserConfig) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<PollState>(100);
    let handle = Poller::new(source, config.interval())?.start(move |state| {
        if tx.try_send(state).is_err() {
            warn!("output is falling behind, dropping an update");
        }
    });

    let mut last_line = String::new();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(state) = rx.recv() => {
                let line = Visual::from(&state).to_string();
                // errors print as "not playing"; don't repeat it every tick
                if line != last_line {
                    println!("{}", line);
                    last_line = line;
                }
            }
        }
    }

    handle.cancel();
    Ok(())
}

async fn run_tui(source: HttpSource, config: &UserConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, source, config).await;

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(terminal: &mut Tui, source: HttpSource, config: &UserConfig) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(100);

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Now-playing Poller, forwarded from its watch channel
    let poller = Poller::new(source, config.interval())?
        .start(|state| debug!(state = state.label(), "poll update"));
    let mut updates = poller.subscribe();
    let tx_poll = tx.clone();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if tx_poll.send(AppEvent::Poll(state)).await.is_err() {
                break;
            }
        }
    });

    // 3. Animation Tick Task
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(FRAME);
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });
    drop(tx);

    let started = Instant::now();
    let mut app = App::new(config);
    terminal.draw(|f| ui::ui(f, &app))?;

    while app.is_running {
        let Some(event) = rx.recv().await else {
            break;
        };

        match event {
            AppEvent::Input(Event::Key(key)) => {
                if let Some(Action::OpenUrl(url)) = app.handle_key(key) {
                    open_url(&url);
                }
            }
            AppEvent::Input(_) => {}
            AppEvent::Poll(state) => app.apply(state),
            AppEvent::Tick => app.on_tick(started.elapsed()),
        }

        terminal.draw(|f| ui::ui(f, &app))?;
    }

    poller.cancel();
    info!("widget closed");
    Ok(())
}

/// Hand the song link to the desktop's URL opener.
fn open_url(url: &str) {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    match Command::new(opener)
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(_) => debug!(url, "opened song link"),
        Err(e) => warn!(opener, error = %e, "could not open song link"),
    }
}
