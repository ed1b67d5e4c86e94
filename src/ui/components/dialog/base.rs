//! Base dialog component

use crate::ui::text::{display_width, take_width};
use crate::ui::widgets::centered_rect;
use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    pub title_style: Style,
    pub border_style: Style,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    pub message_style: Style,
    /// Hint text shown at the bottom
    pub hint: Option<Line<'a>>,
    /// Maximum width of the dialog
    pub max_width: u16,
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let area = frame.area();
    let padding = 4u16; // 2 chars padding on each side
    let max_width = config.max_width.min(area.width);
    let max_line_width = max_width.saturating_sub(padding + 2).max(1) as usize;

    let wrapped_lines = wrap_text(config.message, max_line_width);

    let hint_width = config.hint.as_ref().map(|h| h.width()).unwrap_or(0);
    let content_width = wrapped_lines
        .iter()
        .map(|l| display_width(l))
        .max()
        .unwrap_or(0)
        .max(display_width(config.title))
        .max(hint_width) as u16;
    let dialog_width = (content_width + padding + 2).min(max_width); // +2 for borders

    // Height: title + blank + message lines + blank (if hint) + hint + borders
    let hint_lines = if config.hint.is_some() { 2 } else { 0 };
    let message_lines = u16::try_from(wrapped_lines.len()).unwrap_or(u16::MAX);
    let dialog_height = message_lines.saturating_add(2 + hint_lines + 2).max(5);

    let dialog_area = centered_rect(area, dialog_width, dialog_height);
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(config.title, config.title_style)),
        Line::from(""),
    ];
    content.extend(
        wrapped_lines
            .into_iter()
            .map(|line| Line::styled(line, config.message_style)),
    );
    if let Some(hint) = config.hint {
        content.push(Line::from(""));
        content.push(hint);
    }

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(config.border_style)
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(dialog, dialog_area);
}

/// Wrap text to fit within a maximum width, splitting words longer than a line
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word;
            let separator = usize::from(!current_line.is_empty());
            if display_width(&current_line) + separator + display_width(word) > max_width
                && !current_line.is_empty()
            {
                lines.push(std::mem::take(&mut current_line));
            }
            while display_width(word) > max_width {
                let head = take_width(word, max_width);
                if head.is_empty() {
                    break;
                }
                lines.push(head.to_string());
                word = &word[head.len()..];
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("user ID not found in profile response", 16),
            vec!["user ID not", "found in profile", "response"]
        );
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[test]
    fn test_wrap_splits_overlong_words() {
        assert_eq!(
            wrap_text("https://vssps.dev.azure.com", 10),
            vec!["https://vs", "sps.dev.az", "ure.com"]
        );
    }

    #[test]
    fn test_wrap_empty_message() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }
}
