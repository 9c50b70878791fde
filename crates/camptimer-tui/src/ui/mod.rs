mod confirmation;
mod form;
pub mod helpers;
mod history;
mod mobs;
mod settings;

use crate::app::{App, AppView, InputMode};
use camptimer_core::engine::ViewFilter;
use chrono::Utc;
use confirmation::draw_confirmation_modal;
use form::{draw_import_prompt, draw_mob_form};
use history::draw_history;
use mobs::draw_mobs;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use settings::draw_settings;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title_bar(f, app, chunks[0]);

    let now = Utc::now();
    match app.current_view {
        AppView::Mobs => draw_mobs(f, app, chunks[1], now),
        AppView::History => draw_history(f, app, chunks[1], now),
        AppView::Settings => draw_settings(f, app, chunks[1]),
    }

    draw_status_bar(f, app, chunks[2]);

    if app.show_help {
        draw_help_modal(f);
    }

    match app.input_mode {
        InputMode::NewMob => draw_mob_form(f, app),
        InputMode::ImportPath => draw_import_prompt(f, app),
        InputMode::ConfirmRemove | InputMode::ConfirmClear => {
            draw_confirmation_modal(f, app, now)
        }
        InputMode::Normal => {}
    }
}

fn draw_title_bar(f: &mut Frame, app: &App, area: Rect) {
    let tabs = [
        ("1", "Camps", AppView::Mobs),
        ("2", "History", AppView::History),
        ("3", "Settings", AppView::Settings),
    ];

    let mut spans = vec![Span::styled(
        " 🐉 CampTimer ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    for (key, name, view) in tabs {
        spans.push(Span::raw(" "));
        if view == app.current_view {
            spans.push(Span::styled(
                format!("[{}] {}", key, name),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!("[{}] {}", key, name),
                Style::default().fg(Color::Gray),
            ));
        }
    }

    let filter_label = match app.list_filter {
        ViewFilter::Active => "Active",
        ViewFilter::All => "All",
    };
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        format!("Filter: {} ({})", filter_label, app.engine.len()),
        Style::default().fg(Color::DarkGray),
    ));

    if !app.engine.settings().sound_enabled {
        spans.push(Span::styled(
            "  🔇 muted",
            Style::default().fg(Color::Red),
        ));
    }

    let title = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let hint = match app.current_view {
        AppView::Mobs => "[a]Add [r]Kill [d]Delete [n]Notify [f]Filter [i]Import [e]Export [C]Clear [?]Help [q]Quit",
        AppView::History => "[j/k]Select mob [1]Camps [?]Help [q]Quit",
        AppView::Settings => "[j/k]Select [Space]Toggle [+/-]Adjust [?]Help [q]Quit",
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", app.status_message),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            format!(" {}", hint),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let status = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

fn draw_help_modal(f: &mut Frame) {
    let modal_area = helpers::centered_rect(f.area(), 64, 18);
    f.render_widget(Clear, modal_area);

    let text = vec![
        Line::from(""),
        Line::from("  a        Track a new mob (kill recorded now)"),
        Line::from("  r        Reset timer (mob killed again)"),
        Line::from("  d        Stop tracking the selected mob"),
        Line::from("  n        Toggle alerts for the selected mob"),
        Line::from("  f        Switch between Active and All"),
        Line::from("  j/k ↓/↑  Move selection"),
        Line::from("  i / e    Import / export camp timer files"),
        Line::from("  C        Clear all timers (confirmation)"),
        Line::from("  1/2/3    Camps / History / Settings"),
        Line::from("  q        Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Yellow = in spawn window, green = spawned.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(text).block(block), modal_area);
}
