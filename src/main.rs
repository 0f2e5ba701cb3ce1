use std::{
    fs::OpenOptions,
    future, io,
    sync::{Arc, Mutex},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dashboard::{
    config::{self, logger::LoggerConfig},
    controller::Controller,
    http::client::HttpApi,
    view::{
        locale::Messages,
        page::Page,
        terminal::{self, Console, ConsoleCommand},
    },
};
use futures::{
    FutureExt, StreamExt,
    future::{LocalBoxFuture, OptionFuture},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::fmt::{time::ChronoLocal, writer::BoxMakeWriter};

/// Keeps the input line and the busy label current while a flow is pending.
const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

type Dashboard = Controller<HttpApi, Arc<Console>, Arc<Console>>;

fn build_logger(config: &LoggerConfig) {
    // The dashboard owns stdout; stderr shares the same terminal.
    let writer = match config.file.as_deref() {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
            Err(err) => {
                eprintln!("Failed to open log file '{}': {}", path, err);
                std::process::exit(1);
            }
        },
        None => BoxMakeWriter::new(std::io::stderr),
    };
    let builder = tracing_subscriber::fmt()
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(writer);

    match config.format {
        config::logger::LogFormat::Json => builder.json().init(),
        config::logger::LogFormat::Text => builder.init(),
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };
    build_logger(&cfg.logger);
    tracing::debug!(config = ?cfg, "Configuration loaded successfully");

    let api = match HttpApi::new(&cfg.api) {
        Ok(api) => api,
        Err(err) => {
            eprintln!("Failed to set up API client: {:#}", err);
            std::process::exit(1);
        }
    };
    let origin = api.base_url().origin().ascii_serialization();
    let messages = cfg.controller.locale.messages();
    let console = Arc::new(Console::new());
    let controller = Controller::new(
        api,
        Arc::clone(&console),
        Arc::clone(&console),
        cfg.controller,
        origin.clone(),
        Page::full(messages),
    );

    tracing::info!(origin = origin.as_str(), "Dashboard starting");
    controller.start().await;

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(err) => {
            eprintln!("Failed to set up terminal: {}", err);
            std::process::exit(1);
        }
    };
    let result = run_app(&mut terminal, &controller, &console, messages).await;
    if let Err(err) = restore_terminal(&mut terminal) {
        tracing::warn!(error = %err, "Failed to restore terminal");
    }
    if let Err(err) = result {
        eprintln!("Dashboard failed: {}", err);
        std::process::exit(1);
    }

    tracing::info!("Dashboard stopped");
}

/// Redraws, feeds keys to the console and runs one command at a time. While
/// a command is pending, completed lines go to its confirmation question.
async fn run_app(
    tui: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &Dashboard,
    console: &Console,
    messages: &Messages,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);
    let mut pending: Option<LocalBoxFuture<'_, ()>> = None;

    loop {
        let page = controller.page();
        let notifications = controller.notifications();
        let input = console.input_line();
        tui.draw(|frame| terminal::draw(frame, &page, &notifications, messages, &input))?;

        let deadline = controller.next_expiry();
        let expiry = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => future::pending().await,
            }
        };

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if console.on_key(key).is_break() {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err),
                None => break,
            },
            line = console.next_line(), if pending.is_none() => {
                let Some(line) = line else { break };
                match terminal::parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(ConsoleCommand::Quit)) => break,
                    Ok(Some(ConsoleCommand::Help)) => console.set_status(terminal::HELP),
                    Ok(Some(ConsoleCommand::Dismiss { position })) => {
                        let dismissed = position
                            .checked_sub(1)
                            .is_some_and(|index| controller.dismiss_notification(index));
                        if !dismissed {
                            console.set_status(format!("No notification #{}", position));
                        }
                    }
                    Ok(Some(command)) => {
                        let interactions = command.interactions(&controller.page());
                        if interactions.is_empty() {
                            console.set_status("Nothing to copy yet");
                        } else {
                            pending = Some(
                                async move {
                                    for interaction in interactions {
                                        controller.dispatch(interaction).await;
                                    }
                                }
                                .boxed_local(),
                            );
                        }
                    }
                    Err(err) => console.set_status(terminal::usage_error(&err)),
                }
            }
            Some(()) = OptionFuture::from(pending.as_mut()), if pending.is_some() => {
                pending = None;
            }
            _ = expiry => {
                let expired = controller.expire_notifications();
                tracing::debug!(expired, "Notifications expired");
            }
            _ = redraw.tick() => {}
        }
    }

    Ok(())
}
