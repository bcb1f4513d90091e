//! Feed
//!
//! Posts oldest first, each as its body followed by an author and timestamp
//! line. The newest posts stay in view; older ones scroll off the top. A
//! newest post taller than the list is cut short above its byline. An open
//! compose form sits below the list.

use chrono::SecondsFormat;
use murmur_app::FeedScreen;
use murmur_store::Post;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem},
};

use super::form;

const BORDER_SIZE: u16 = 2;
const LIST_MIN_HEIGHT: u16 = 3;

/// Author and timestamp line under a post body.
pub fn byline(post: &Post) -> String {
    format!("{} - {}", post.author, post.published_at.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

/// Render the feed.
pub fn render(frame: &mut Frame, feed: &FeedScreen, area: Rect) {
    let compose_height = feed.draft().map_or(0, form::height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(LIST_MIN_HEIGHT), Constraint::Length(compose_height)])
        .split(area);

    let [list_area, compose_area] = chunks.as_ref() else {
        return;
    };

    render_posts(frame, feed.posts(), *list_area);
    if let Some(draft) = feed.draft() {
        form::render(frame, draft, *compose_area);
    }
}

fn render_posts(frame: &mut Frame, posts: &[Post], area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Feed ");

    if posts.is_empty() {
        let empty = ListItem::new(Line::styled("No posts yet", Style::default().fg(Color::DarkGray)));
        frame.render_widget(List::new([empty]).block(block), area);
        return;
    }

    // Keep the newest posts that fit, and always the newest one
    let visible_height = usize::from(area.height.saturating_sub(BORDER_SIZE));
    let mut used = 0;
    let newest = posts.len() - 1;
    let first_visible = posts
        .iter()
        .rposition(|post| {
            used += post_height(post);
            used > visible_height
        })
        .map_or(0, |overflowing| (overflowing + 1).min(newest));

    let items: Vec<ListItem> =
        posts[first_visible..].iter().map(|post| post_item(post, visible_height)).collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn post_height(post: &Post) -> usize {
    post.body.split('\n').count() + 1
}

/// A post as at most `max_lines` lines. The byline is never cut.
fn post_item(post: &Post, max_lines: usize) -> ListItem<'static> {
    let mut lines: Vec<Line> = post
        .body
        .split('\n')
        .take(max_lines.saturating_sub(1))
        .map(|line| Line::from(line.to_string()))
        .collect();
    lines.push(Line::from(Span::styled(byline(post), Style::default().fg(Color::DarkGray))));
    ListItem::new(Text::from(lines))
}
