//! UI module for rendering the TUI

mod components;
mod layout;
mod prs;
mod text;
mod theme;
mod widgets;

pub use theme::Theme;

use crate::state::DashboardState;
use ratatui::{layout::Rect, Frame};
use std::collections::HashSet;

/// Draw the dashboard into `area`
pub fn draw_dashboard(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    theme: &Theme,
    ignored_reviewer_ids: &HashSet<String>,
) {
    let regions = layout::create_layout(area);
    let visible = state.visible();

    match state.focused_request() {
        Some(focused) => {
            let focused_index = state.focused_index.min(visible.len().saturating_sub(1));
            prs::draw_list(frame, regions.list, &visible, focused_index, theme);
            prs::draw_detail(frame, regions.detail, focused, ignored_reviewer_ids, theme);
        }
        None => layout::draw_empty_state(frame, regions.main, state.toggles, theme),
    }

    layout::draw_footer(frame, regions.footer, state.toggles, theme);
}

/// Draw the fatal error screen
pub fn draw_error(frame: &mut Frame, message: &str, theme: &Theme) {
    components::render_error_dialog(frame, message, theme);
}
