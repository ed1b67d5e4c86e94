//! Screen regions, empty state and footer legend

use super::text::display_width;
use super::theme::Theme;
use super::widgets::centered_rect;
use crate::state::ToggleFlags;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the bordered footer
pub const FOOTER_HEIGHT: u16 = 3;

/// Regions of the dashboard screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    /// Everything above the footer
    pub main: Rect,
    /// Upper half of `main`
    pub list: Rect,
    /// Lower half of `main`
    pub detail: Rect,
    pub footer: Rect,
}

pub fn create_layout(area: Rect) -> DashboardLayout {
    let [main, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)]).areas(area);
    let [list, detail] = Layout::vertical([
        Constraint::Length(main.height / 2),
        Constraint::Min(0),
    ])
    .areas(main);

    DashboardLayout {
        main,
        list,
        detail,
        footer,
    }
}

pub fn empty_message(toggles: ToggleFlags) -> &'static str {
    if toggles.show_not_reviewer {
        "No open pull requests where you are NOT set as a reviewer."
    } else {
        "No open pull requests where you are set as a reviewer."
    }
}

/// Draw the empty-state message centered in `area`
pub fn draw_empty_state(frame: &mut Frame, area: Rect, toggles: ToggleFlags, theme: &Theme) {
    let message = empty_message(toggles);
    let rect = centered_rect(area, display_width(message) as u16, 1);
    frame.render_widget(
        Paragraph::new(message).style(theme.empty_state()).centered(),
        rect,
    );
}

/// Key legend; toggle keys show their state by color
pub fn footer_legend(toggles: ToggleFlags, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("  ↑/↓ to navigate | "),
        Span::styled("d", theme.toggle_key(toggles.show_drafts)),
        Span::raw(": toggle drafts | "),
        Span::styled("m", theme.toggle_key(toggles.show_mine)),
        Span::raw(": show/hide your own PRs | "),
        Span::styled("r", theme.toggle_key(toggles.show_not_reviewer)),
        Span::raw(": show PRs where you are NOT a reviewer | q: quit  "),
    ])
}

/// Draw the bordered legend, horizontally centered in `area`
pub fn draw_footer(frame: &mut Frame, area: Rect, toggles: ToggleFlags, theme: &Theme) {
    let legend = footer_legend(toggles, theme);
    let width = (legend.width() as u16).saturating_add(2);
    let rect = centered_rect(area, width, FOOTER_HEIGHT);

    let footer = Paragraph::new(legend).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, rect);
}
