//! Reusable UI widget helpers

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{List, ListState},
    Frame,
};

/// Render a scrollable list that automatically keeps the focused item visible.
///
/// `focused` is `None` for an empty list.
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, focused: Option<usize>) {
    let mut list_state = ListState::default().with_selected(focused);
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// A `width` x `height` rect centered inside `area`, clamped to it
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(column);
    rect
}
