//! Text form
//!
//! A bordered input box titled with the field name. Validation errors sit on
//! the bottom border.

use murmur_app::TextForm;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

const BORDER_SIZE: u16 = 2;

/// Rows needed to show the whole value.
pub fn height(form: &TextForm) -> u16 {
    let lines = form.value().split('\n').count().max(1) as u16;
    lines.saturating_add(BORDER_SIZE)
}

/// Render the form and place the terminal cursor at the edit point.
pub fn render(frame: &mut Frame, form: &TextForm, area: Rect) {
    let mut block = Block::default().borders(Borders::ALL).title(format!(" {} ", form.title()));
    if let Some(error) = form.error() {
        block = block.title_bottom(Line::styled(format!(" {error} "), Style::default().fg(Color::Red)));
    }

    let paragraph = Paragraph::new(form.value().to_string()).block(block);
    frame.render_widget(paragraph, area);

    if area.width <= BORDER_SIZE || area.height <= BORDER_SIZE {
        return;
    }

    let before: String = form.value().chars().take(form.cursor()).collect();
    let row = before.matches('\n').count() as u16;
    let column = before.rsplit('\n').next().map_or(0, |line| line.chars().count()) as u16;

    let max_x = area.x + area.width - BORDER_SIZE;
    let max_y = area.y + area.height - BORDER_SIZE;
    let cursor_x = (area.x + 1).saturating_add(column).min(max_x);
    let cursor_y = (area.y + 1).saturating_add(row).min(max_y);

    frame.set_cursor_position((cursor_x, cursor_y));
}
