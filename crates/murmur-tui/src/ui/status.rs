//! Status bar
//!
//! Displays who is connected and the keys the current screen accepts.

use murmur_app::{COMPOSE_KEY, FeedMode, Screen, Session, SessionState};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, session: &Session, area: Rect) {
    let identity = match (session.state(), session.user()) {
        (_, Some(user)) => Span::styled(
            user.name.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        (SessionState::Initializing, None) => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        (_, None) => Span::styled("New key", Style::default().fg(Color::Cyan)),
    };

    let hints = match session.screen() {
        Screen::Feed(feed) if *feed.mode() == FeedMode::Browsing => {
            format!(" | {COMPOSE_KEY}: compose | q: quit")
        },
        Screen::Feed(_) => " | Enter: post | Ctrl-J: newline | Esc: cancel".to_string(),
        Screen::Signup(_) => " | Enter: sign up | q: quit".to_string(),
        Screen::None => " | q: quit".to_string(),
    };

    let status_line = Line::from(vec![
        Span::raw(" "),
        identity,
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
