//! Signup screen
//!
//! Name form for a key with no user record. A registration failure replaces
//! the form.

use murmur_app::{SignupScreen, SignupState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{centered, form};

const PROMPT: &str = "Welcome! Pick a name to post under.";
const BOX_WIDTH: u16 = 50;

/// Render the signup screen.
pub fn render(frame: &mut Frame, signup: &SignupScreen, area: Rect) {
    let body_height = match signup.state() {
        SignupState::Failed { .. } => 4,
        _ => form::height(signup.form()),
    };
    let area = centered(area, BOX_WIDTH, body_height + 2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(body_height), Constraint::Length(1)])
        .split(area);

    let [prompt_area, body_area, footer_area] = chunks.as_ref() else {
        return;
    };

    frame.render_widget(Paragraph::new(PROMPT), *prompt_area);

    match signup.state() {
        SignupState::Editing => form::render(frame, signup.form(), *body_area),
        SignupState::Registering { name } => {
            form::render(frame, signup.form(), *body_area);
            let footer = Line::styled(format!("Registering {name}..."), Style::default().fg(Color::Yellow));
            frame.render_widget(Paragraph::new(footer), *footer_area);
        },
        SignupState::Failed { message } => {
            let block = Block::default().borders(Borders::ALL).title(" Registration failed ");
            let error = Paragraph::new(message.clone())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(error, *body_area);
        },
    }
}
