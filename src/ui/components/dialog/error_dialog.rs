//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use crate::ui::theme::Theme;
use ratatui::{text::Line, Frame};

/// Render a fatal error centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str, theme: &Theme) {
    let message = format!("Error: {error_message}");

    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            title_style: theme.error(),
            border_style: theme.error(),
            message: &message,
            message_style: theme.error(),
            hint: Some(Line::styled("Press any key to exit.", theme.empty_state())),
            max_width: 60,
        },
    );
}
