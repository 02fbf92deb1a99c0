//! View rendering dispatch.

pub mod auth;
pub mod catalog;
pub mod chat;
pub mod helpers;

pub use helpers::two_column;

use crate::nav::Screen;
use crate::notifications::NotificationLevel;
use crate::session::SessionState;
use crate::state::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.screen {
        Screen::Catalog => catalog::render(f, app, layout[1]),
        Screen::Chat => chat::render(f, app, layout[1]),
        Screen::SignIn => auth::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);
}

fn render_header(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let identity = match app.session.state() {
        SessionState::Restoring => "restoring session…".to_string(),
        SessionState::Anonymous => "anonymous".to_string(),
        SessionState::Authenticated(user) => user
            .display_name
            .clone()
            .unwrap_or_else(|| user.email.clone()),
    };
    let title = format!("Colloquy · {} · {}", app.screen.title(), identity);
    let header = Paragraph::new(Span::styled(title, Style::default().fg(app.theme.primary)))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let hints = match app.screen {
        Screen::Catalog => "j/k move · Enter chat · f favorite · r refresh · a account · q quit",
        Screen::Chat => "Enter send · Esc back",
        Screen::SignIn => "Tab next field · Ctrl-T sign-in/sign-up · Enter submit · Esc back",
    };
    let line = match app.notifications.last() {
        Some(notification) => {
            let color = match notification.level {
                NotificationLevel::Info => app.theme.secondary,
                NotificationLevel::Warning => app.theme.accent,
                NotificationLevel::Error => app.theme.error,
                NotificationLevel::Success => app.theme.success,
            };
            Span::styled(notification.message.clone(), Style::default().fg(color))
        }
        None => Span::styled(hints.to_string(), Style::default().fg(app.theme.muted)),
    };
    f.render_widget(Paragraph::new(line), area);
}
