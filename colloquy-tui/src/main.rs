//! Colloquy TUI entry point.

use colloquy_tui::catalog::{self, CatalogState};
use colloquy_tui::config::TuiConfig;
use colloquy_tui::error::TuiError;
use colloquy_tui::events::TuiEvent;
use colloquy_tui::gateway::Gateway;
use colloquy_tui::keys::{map_key, Action};
use colloquy_tui::nav::Screen;
use colloquy_tui::notifications::NotificationLevel;
use colloquy_tui::persistence::{self, PersistedSession};
use colloquy_tui::session::{SessionState, SessionStore};
use colloquy_tui::state::{App, AuthMode};
use colloquy_tui::views::render_view;
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    init_logging(&config)?;

    let gateway = Gateway::new(&config)?;
    let (mut session, mut session_rx) = SessionStore::new(gateway.clone());

    // One restoration call at startup; expired tokens land in Anonymous.
    let persisted = persistence::load(&config.session_path).ok().flatten();
    session.restore(persisted.map(|s| s.access_token)).await;
    session_rx.borrow_and_update();

    let mut app = App::new(config, gateway, session);
    app.catalog = CatalogState::Loading;
    app.catalog = catalog::load(&app.gateway).await;
    if let Some(first) = app.agents().first() {
        app.selected = Some(first.agent_id);
    }
    refresh_favorites(&mut app).await;

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let mut ticker = tokio::time::interval(Duration::from_millis(250));

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                let _ = event_tx.send(TuiEvent::Tick).await;
            }
            changed = session_rx.changed() => {
                if changed.is_ok() {
                    on_session_changed(&mut app, &mut session_rx).await;
                }
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event, &event_tx).await? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn init_logging(config: &TuiConfig) -> Result<(), TuiError> {
    if let Some(parent) = config.error_log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.error_log_path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                match evt {
                    CrosstermEvent::Key(key) => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}

async fn on_session_changed(app: &mut App, session_rx: &mut watch::Receiver<SessionState>) {
    let state = session_rx.borrow_and_update().clone();
    match state {
        SessionState::Authenticated(_) => refresh_favorites(app).await,
        SessionState::Anonymous => app.favorites.clear(),
        SessionState::Restoring => {}
    }
}

async fn refresh_favorites(app: &mut App) {
    let gateway = app.gateway.clone();
    let (Some(token), Some(user_id)) = (
        app.session.access_token().map(str::to_string),
        app.session.user_id(),
    ) else {
        return;
    };
    app.favorites.refresh(&gateway, &token, user_id).await;
}

async fn handle_event(
    app: &mut App,
    event: TuiEvent,
    event_tx: &mpsc::Sender<TuiEvent>,
) -> Result<bool, TuiError> {
    match event {
        TuiEvent::Input(key) => {
            return match app.screen {
                Screen::Catalog => handle_catalog_key(app, key).await,
                Screen::Chat => handle_chat_key(app, key, event_tx),
                Screen::SignIn => handle_auth_key(app, key).await,
            };
        }
        TuiEvent::ReplyReady { agent_id, text } => {
            if let Some(transcript) = &mut app.transcript {
                if transcript.agent.agent_id == agent_id {
                    transcript.apply_reply(text);
                }
            }
        }
        TuiEvent::Resize { .. } | TuiEvent::Tick => {}
    }
    Ok(false)
}

async fn handle_catalog_key(
    app: &mut App,
    key: crossterm::event::KeyEvent,
) -> Result<bool, TuiError> {
    let Some(action) = map_key(key) else {
        return Ok(false);
    };
    match action {
        Action::Quit => return Ok(true),
        Action::MoveDown => app.select_next(),
        Action::MoveUp => app.select_previous(),
        Action::Refresh => {
            app.catalog = CatalogState::Loading;
            app.catalog = catalog::load(&app.gateway).await;
        }
        Action::Select => {
            if let Some(agent) = app.selected_agent().cloned() {
                app.try_open_chat(agent);
            }
        }
        Action::ToggleFavorite => {
            let gateway = app.gateway.clone();
            let agent = app.selected_agent().cloned();
            let token = app.session.access_token().map(str::to_string);
            let user_id = app.session.user_id();
            match (agent, token, user_id) {
                (Some(agent), Some(token), Some(user_id)) => {
                    app.favorites.toggle(&gateway, &token, user_id, &agent).await;
                }
                (Some(_), _, _) => {
                    app.notify(NotificationLevel::Info, "Sign in to favorite agents.");
                }
                _ => {}
            }
        }
        Action::Account => {
            if app.session.is_authenticated() {
                app.session.sign_out().await;
                if let Err(err) = persistence::clear(&app.config.session_path) {
                    warn!(error = %err, "failed to clear persisted session");
                }
                app.notify(NotificationLevel::Info, "Signed out.");
            } else {
                app.auth.reset();
                app.screen = Screen::SignIn;
            }
        }
        Action::Cancel => app.dismiss_notification(),
    }
    Ok(false)
}

fn handle_chat_key(
    app: &mut App,
    key: crossterm::event::KeyEvent,
    event_tx: &mpsc::Sender<TuiEvent>,
) -> Result<bool, TuiError> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }
    match key.code {
        KeyCode::Esc => app.close_chat(),
        KeyCode::Enter if !key.modifiers.contains(KeyModifiers::SHIFT) => {
            let text = app.chat_input_text();
            let delay = Duration::from_millis(app.config.reply_delay_ms);
            if let Some(transcript) = &mut app.transcript {
                if let Some(reply) = transcript.push_user(&text) {
                    transcript.schedule_reply(reply, delay, event_tx.clone());
                    app.reset_chat_input();
                }
            }
        }
        _ => {
            app.chat_input.input(key);
        }
    }
    Ok(false)
}

async fn handle_auth_key(
    app: &mut App,
    key: crossterm::event::KeyEvent,
) -> Result<bool, TuiError> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Ok(true),
            KeyCode::Char('t') => {
                app.auth.toggle_mode();
                return Ok(false);
            }
            _ => return Ok(false),
        }
    }
    match key.code {
        KeyCode::Esc => {
            app.auth.reset();
            app.screen = Screen::Catalog;
        }
        KeyCode::Tab => app.auth.next_field(),
        KeyCode::Backspace => app.auth.pop_char(),
        KeyCode::Enter => submit_auth(app).await,
        KeyCode::Char(c) => app.auth.push_char(c),
        _ => {}
    }
    Ok(false)
}

async fn submit_auth(app: &mut App) {
    let email = app.auth.email.trim().to_string();
    let password = app.auth.password.clone();
    if email.is_empty() || password.is_empty() {
        app.auth.error = Some("Email and password are required.".to_string());
        return;
    }
    let result = match app.auth.mode {
        AuthMode::SignIn => app.session.sign_in(&email, &password).await,
        AuthMode::SignUp => {
            let name = app.auth.display_name.trim();
            let name = (!name.is_empty()).then_some(name.to_string());
            app.session.sign_up(&email, &password, name.as_deref()).await
        }
    };
    match result {
        Ok(()) => {
            if let Some(token) = app.session.access_token() {
                let state = PersistedSession {
                    access_token: token.to_string(),
                };
                if let Err(err) = persistence::save(&app.config.session_path, &state) {
                    warn!(error = %err, "failed to persist session");
                }
            }
            app.auth.reset();
            app.screen = Screen::Catalog;
            app.notify(NotificationLevel::Success, "Signed in.");
        }
        Err(err) => {
            app.auth.error = Some(err.to_string());
        }
    }
}
