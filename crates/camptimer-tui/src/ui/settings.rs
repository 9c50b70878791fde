use crate::app::{App, SettingsItem};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn draw_settings(f: &mut Frame, app: &mut App, area: Rect) {
    let settings = app.engine.settings();

    let items: Vec<ListItem> = SettingsItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_selected = i == app.selected_setting_index;
            let prefix = if is_selected { "→ " } else { "  " };

            let line = match item {
                SettingsItem::SoundEnabled => Line::from(vec![
                    Span::raw(format!("{}Sound & notifications   ", prefix)),
                    if settings.sound_enabled {
                        Span::styled(
                            "[ ON ]",
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled(
                            "[ OFF ]",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )
                    },
                ]),
                SettingsItem::NotifyBeforeMinutes => Line::from(vec![
                    Span::raw(format!("{}Warning lead time       ", prefix)),
                    Span::styled(
                        format!("{} minutes", settings.notify_before_minutes),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
            };

            let mut style = Style::default();
            if is_selected {
                style = style.bg(Color::DarkGray);
            }
            ListItem::new(line).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ⚙️ Settings ")
        .title_bottom(" [Space]Toggle [+/-]Adjust lead ".to_string())
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(List::new(items).block(block), area);
}
