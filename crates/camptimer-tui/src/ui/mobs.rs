use crate::app::App;
use crate::ui::helpers::{focused_border_style, format_clock, spawn_state_style};
use camptimer_core::models::MobEntry;
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

pub fn draw_mobs(f: &mut Frame, app: &mut App, area: Rect, now: DateTime<Utc>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let mobs = app.visible_mobs(now);
    draw_mob_list(f, app, &mobs, chunks[0], now);
    draw_mob_details(f, mobs.get(app.selected_index), chunks[1], now);
}

fn draw_mob_list(f: &mut Frame, app: &App, mobs: &[MobEntry], area: Rect, now: DateTime<Utc>) {
    let items: Vec<ListItem> = if mobs.is_empty() {
        vec![
            ListItem::new(""),
            ListItem::new("  No camp timers yet."),
            ListItem::new(""),
            ListItem::new("  Press [a] to track your first mob!"),
        ]
    } else {
        mobs.iter()
            .enumerate()
            .map(|(i, mob)| {
                let is_selected = i == app.selected_index;
                let status = mob.status(now);

                let bell = if mob.notify_enabled { "🔔" } else { "🔕" };
                let prefix = if is_selected { "→ " } else { "  " };
                let camp = if mob.camp.is_empty() {
                    String::new()
                } else {
                    format!(" @ {}", mob.camp)
                };

                let mut style = spawn_state_style(status.state);
                if is_selected {
                    style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
                }

                let text = format!(
                    "{}{} {:>9}  {}{}",
                    prefix, bell, status.label, mob.name, camp
                );
                ListItem::new(text).style(style)
            })
            .collect()
    };

    let title = format!(" ⏱️ Camp Timers ({}) ", mobs.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(focused_border_style(true));

    f.render_widget(List::new(items).block(block), area);
}

fn draw_mob_details(f: &mut Frame, mob: Option<&MobEntry>, area: Rect, now: DateTime<Utc>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Details ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(mob) = mob else {
        let placeholder = Paragraph::new("Select a mob to view details")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(placeholder, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    let status = mob.status(now);
    let state_badge = Span::styled(
        format!(" {} ", status.state.as_str().to_uppercase()),
        spawn_state_style(status.state).add_modifier(Modifier::REVERSED),
    );

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Mob:      ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                mob.name.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Camp:     ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(if mob.camp.is_empty() {
                "N/A"
            } else {
                mob.camp.as_str()
            }),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Status:   ", Style::default().add_modifier(Modifier::DIM)),
            state_badge,
        ]),
        Line::from(vec![
            Span::styled("  Remains:  ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(status.label.clone(), spawn_state_style(status.state)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Respawn:  ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(format!(
                "{}m ±{}m, expected {}",
                mob.respawn_minutes,
                mob.respawn_variance,
                format_clock(mob.respawn_at)
            )),
        ]),
        Line::from(vec![
            Span::styled("  Window:   ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                format!(
                    "{} - {}",
                    format_clock(mob.window_start),
                    format_clock(mob.window_end)
                ),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Killed:   ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(format_clock(mob.killed_at)),
        ]),
        Line::from(vec![
            Span::styled("  Kills:    ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(format!("{} recorded", mob.history.len() + 1)),
        ]),
        Line::from(vec![
            Span::styled("  Alerts:   ", Style::default().add_modifier(Modifier::DIM)),
            if mob.notify_enabled {
                Span::styled("on", Style::default().fg(Color::Green))
            } else {
                Span::styled("off", Style::default().fg(Color::Red))
            },
        ]),
    ];

    if !mob.notes.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Notes:    ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(mob.notes.as_str(), Style::default().fg(Color::Gray)),
        ]));
    }

    f.render_widget(Paragraph::new(lines), chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Cycle "))
        .gauge_style(spawn_state_style(status.state))
        .percent(status.progress_percent.round() as u16)
        .label(format!("{:.0}%", status.progress_percent));
    f.render_widget(gauge, chunks[1]);
}
