//! Agent catalog view: list plus detail panel.

use crate::catalog::CatalogState;
use crate::state::App;
use crate::theme::scheme_color;
use crate::views::two_column;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    match &app.catalog {
        CatalogState::Loading => {
            let message = Paragraph::new("Loading agents…")
                .style(Style::default().fg(app.theme.muted))
                .block(Block::default().title("Agents").borders(Borders::ALL));
            f.render_widget(message, area);
        }
        CatalogState::Failed(error) => {
            let text = format!("Error loading agents: {}\n\nPress r to try again.", error);
            let message = Paragraph::new(text)
                .style(Style::default().fg(app.theme.error))
                .wrap(Wrap { trim: false })
                .block(Block::default().title("Agents").borders(Borders::ALL));
            f.render_widget(message, area);
        }
        CatalogState::Ready(agents) if agents.is_empty() => {
            let message = Paragraph::new("No agents in the catalog yet.")
                .style(Style::default().fg(app.theme.muted))
                .block(Block::default().title("Agents").borders(Borders::ALL));
            f.render_widget(message, area);
        }
        CatalogState::Ready(agents) => {
            let (list_area, detail_area) = two_column(area, 55);
            render_list(f, app, agents, list_area);
            render_detail(f, app, detail_area);
        }
    }
}

fn render_list(
    f: &mut Frame<'_>,
    app: &App,
    agents: &[colloquy_core::Agent],
    area: Rect,
) {
    let items: Vec<ListItem> = agents
        .iter()
        .map(|agent| {
            let marker = if app.favorites.is_favorite(agent.agent_id) {
                "♥ "
            } else {
                "  "
            };
            let style = Style::default().fg(scheme_color(agent.color_scheme));
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(app.theme.error)),
                Span::styled(
                    format!("{} {} · {}", agent.icon.symbol(), agent.name, agent.primary_expertise()),
                    style,
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if let Some(selected) = app.selected {
        if let Some(index) = agents.iter().position(|a| a.agent_id == selected) {
            state.select(Some(index));
        }
    }

    let list = List::new(items)
        .block(Block::default().title("Agents").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, area, &mut state);
}

fn render_detail(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(agent) = app.selected_agent() {
        let color = scheme_color(agent.color_scheme);
        lines.push(Line::from(Span::styled(
            agent.name.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(agent.description.clone()));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Expertise",
            Style::default().fg(app.theme.muted),
        )));
        for tag in agent.expertise_tags() {
            lines.push(Line::from(format!("  · {}", tag)));
        }
        lines.push(Line::from(""));
        if app.favorites.is_favorite(agent.agent_id) {
            lines.push(Line::from(Span::styled(
                "♥ Favorited",
                Style::default().fg(app.theme.error),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!("Added {}", agent.created_at.format("%Y-%m-%d")),
            Style::default().fg(app.theme.muted),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Select an agent to see details.",
            Style::default().fg(app.theme.muted),
        )));
    }

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Details").borders(Borders::ALL));
    f.render_widget(detail, area);
}
