use crate::app::{App, InputMode};
use crate::ui::helpers::centered_rect;
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw_confirmation_modal(f: &mut Frame, app: &App, now: DateTime<Utc>) {
    let modal_area = centered_rect(f.area(), 60, 8);
    f.render_widget(Clear, modal_area);

    let (title, message) = if app.input_mode == InputMode::ConfirmClear {
        (
            " Clear All Timers? ",
            format!(
                "This removes all {} camp timers and their saved data.",
                app.engine.len()
            ),
        )
    } else {
        let name = app
            .selected_mob(now)
            .map(|m| m.name)
            .unwrap_or_else(|| "this mob".to_string());
        (
            " Stop Tracking? ",
            format!("Are you sure you want to remove \"{}\"?", name),
        )
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  [Y]es, Remove  ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(
                "  [N]o, Cancel   ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, modal_area);
}
