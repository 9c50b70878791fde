use camptimer_core::models::SpawnState;
use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
};

pub fn focused_border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Local wall-clock rendering of a stored UTC timestamp.
pub fn format_clock(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%H:%M:%S").to_string()
}

pub fn format_clock_date(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn spawn_state_style(state: SpawnState) -> Style {
    match state {
        SpawnState::Spawned => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        SpawnState::InWindow => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        SpawnState::Waiting => Style::default().fg(Color::Gray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(area, 60, 20);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
