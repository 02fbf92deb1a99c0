//! Chat view: transcript plus input box.

use crate::state::App;
use crate::theme::turn_role_color;
use colloquy_core::TurnRole;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(transcript) = &app.transcript else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    for turn in transcript.turns() {
        let (speaker, color) = match turn.role {
            TurnRole::User => ("You".to_string(), turn_role_color(turn.role, &app.theme)),
            TurnRole::Assistant => (
                transcript.agent.name.clone(),
                turn_role_color(turn.role, &app.theme),
            ),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{} · {}",
                speaker,
                turn.created_at.format("%H:%M")
            ),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        for content_line in turn.content.lines() {
            lines.push(Line::from(content_line.to_string()));
        }
        lines.push(Line::from(""));
    }
    if transcript.reply_pending() {
        lines.push(Line::from(Span::styled(
            format!("● {} is typing…", transcript.agent.name),
            Style::default().fg(app.theme.muted),
        )));
    }

    // Keep the latest turn visible: scroll past everything that does not
    // fit, counting display rows after wrapping rather than logical lines.
    let width = chunks[0].width.saturating_sub(2) as usize;
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = wrapped_rows(&lines, width).saturating_sub(visible) as u16;

    let title = format!("{} · {}", transcript.agent.name, transcript.agent.primary_expertise());
    let transcript_widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(transcript_widget, chunks[0]);

    let mut input = app.chat_input.clone();
    input.set_block(
        Block::default()
            .title(format!("Ask {} anything…", transcript.agent.name))
            .borders(Borders::ALL),
    );
    f.render_widget(&input, chunks[1]);
}

/// Display rows the lines occupy once wrapped to `width` columns. Every
/// logical line takes at least one row; a zero-width area shows nothing.
fn wrapped_rows(lines: &[Line], width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_rows_counts_display_rows_not_lines() {
        let lines = vec![
            Line::from("a".repeat(25)),
            Line::from(""),
            Line::from("short"),
        ];
        // 25 cols at width 10 wrap to 3 rows; blank and short take 1 each.
        assert_eq!(wrapped_rows(&lines, 10), 5);
        assert_eq!(wrapped_rows(&lines, 25), 3);
        assert_eq!(wrapped_rows(&lines, 0), 0);
    }

    #[test]
    fn wrapped_rows_never_undercounts_a_long_reply() {
        let reply = "x".repeat(300);
        let lines = vec![Line::from(reply)];
        assert_eq!(wrapped_rows(&lines, 40), 8);
    }
}
