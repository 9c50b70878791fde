use crate::app::{App, MobForm};
use crate::ui::helpers::{centered_rect, focused_border_style};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw_mob_form(f: &mut Frame, app: &App) {
    let modal_area = centered_rect(f.area(), 56, 3 * MobForm::FIELD_COUNT as u16 + 2);
    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " ➕ Add Mob Timer ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(" [Tab]Next [Enter]Add [Esc]Cancel ".to_string())
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let constraints = vec![Constraint::Length(3); MobForm::FIELD_COUNT];
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, label) in MobForm::LABELS.iter().enumerate() {
        let is_focused = app.form.focused_field == i;
        let mut value = app.form.field(i).to_string();
        if is_focused {
            value.push('▏');
        }

        let field = Paragraph::new(value).block(
            Block::default()
                .borders(Borders::ALL)
                .title(*label)
                .border_style(focused_border_style(is_focused)),
        );
        f.render_widget(field, chunks[i]);
    }
}

pub fn draw_import_prompt(f: &mut Frame, app: &App) {
    let modal_area = centered_rect(f.area(), 70, 3);
    f.render_widget(Clear, modal_area);

    let mut value = app.import_path.clone();
    value.push('▏');

    let field = Paragraph::new(value).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Import camp timer file (path) ")
            .title_bottom(" [Enter]Import [Esc]Cancel ".to_string())
            .border_style(focused_border_style(true)),
    );
    f.render_widget(field, modal_area);
}
