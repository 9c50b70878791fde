use crate::app::App;
use crate::ui::helpers::{focused_border_style, format_clock_date};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Completed kill cycles of the selected mob, oldest first.
pub fn draw_history(f: &mut Frame, app: &mut App, area: Rect, now: DateTime<Utc>) {
    let Some(mob) = app.selected_mob(now) else {
        let block = Block::default().borders(Borders::ALL).title(" History ");
        let placeholder = Paragraph::new("Select a mob on the Camps view to see its kill history")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    };

    let items: Vec<ListItem> = if mob.history.is_empty() {
        vec![
            ListItem::new(""),
            ListItem::new("  No completed cycles yet."),
            ListItem::new("  Press [r] on the Camps view when the mob dies again."),
        ]
    } else {
        mob.history
            .iter()
            .enumerate()
            .map(|(i, cycle)| {
                let line = Line::from(vec![
                    Span::styled(
                        format!("  #{:<3}", i + 1),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(format!(
                        "killed {}  →  respawn {}",
                        format_clock_date(cycle.killed_at),
                        format_clock_date(cycle.respawn_at)
                    )),
                ]);
                ListItem::new(line)
            })
            .collect()
    };

    let title = format!(" 📜 {} — {} completed cycles ", mob.name, mob.history.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(focused_border_style(true));
    f.render_widget(List::new(items).block(block), area);
}
