//! Sign-in / sign-up form.

use crate::state::{App, AuthField, AuthMode};
use crate::views::helpers::centered_box;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let form = &app.auth;
    let title = match form.mode {
        AuthMode::SignIn => "Sign In",
        AuthMode::SignUp => "Create Account",
    };

    let box_area = centered_box(area, 52, 12);
    f.render_widget(Clear, box_area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Sign in to start a conversation.",
            Style::default().fg(app.theme.muted),
        )),
        Line::from(""),
        field_line(app, "Email", &form.email, form.focus == AuthField::Email, false),
        field_line(
            app,
            "Password",
            &form.password,
            form.focus == AuthField::Password,
            true,
        ),
    ];
    if form.mode == AuthMode::SignUp {
        lines.push(field_line(
            app,
            "Name",
            &form.display_name,
            form.focus == AuthField::DisplayName,
            false,
        ));
    }
    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(app.theme.error),
        )));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(widget, box_area);
}

fn field_line<'a>(
    app: &App,
    label: &'a str,
    value: &str,
    focused: bool,
    masked: bool,
) -> Line<'a> {
    let shown = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let cursor = if focused { "_" } else { "" };
    let style = if focused {
        Style::default()
            .fg(app.theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{:>9}: ", label), Style::default().fg(app.theme.muted)),
        Span::styled(format!("{}{}", shown, cursor), style),
    ])
}
