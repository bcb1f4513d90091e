//! Idle placeholder
//!
//! Shown while no screen is active: before the identity lookup answers, or
//! for good if it failed.

use murmur_app::Session;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::centered;

const QUIT_HINT: &str = "Press q to quit";

/// Render the banner, centred, with the quit hint below.
pub fn render(frame: &mut Frame, session: &Session, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        session.banner().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(user) = session.user() {
        lines.push(Line::from(user.name.clone()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(QUIT_HINT, Style::default().fg(Color::DarkGray))));

    let height = lines.len() as u16;

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, centered(area, area.width, height));
}
