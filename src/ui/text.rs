//! Width-aware text fitting
//!
//! All widths are terminal cells, so wide glyphs count double and a cut never
//! splits a character.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Longest prefix of `text` that fits in `max_width` cells
pub fn take_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let width = ch.width().unwrap_or(0);
        if used + width > max_width {
            return &text[..idx];
        }
        used += width;
    }
    text
}

/// Fit `text` into `max_width` cells, ending in `...` when cut.
///
/// Budgets of three cells or fewer leave no room for content and are filled
/// with dots.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width <= ELLIPSIS.len() {
        return ".".repeat(max_width);
    }
    format!("{}{ELLIPSIS}", take_width(text, max_width - ELLIPSIS.len()))
}

/// Truncate then right-pad to exactly `width` cells
pub fn fit_cell(text: &str, width: usize) -> String {
    let fitted = truncate_with_ellipsis(text, width);
    let padding = width.saturating_sub(display_width(&fitted));
    format!("{fitted}{}", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_text_is_unchanged() {
        assert_eq!(truncate_with_ellipsis("Fix build", 20), "Fix build");
        assert_eq!(truncate_with_ellipsis("exact", 5), "exact");
    }

    #[test]
    fn test_long_text_fills_budget_exactly() {
        let out = truncate_with_ellipsis("Refactor the pipeline configuration", 12);
        assert_eq!(out, "Refactor ...");
        assert_eq!(display_width(&out), 12);
    }

    #[test]
    fn test_tiny_budget_is_dots() {
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "...");
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "..");
        assert_eq!(truncate_with_ellipsis("abcdef", 0), "");
    }

    #[test]
    fn test_take_width_respects_wide_chars() {
        // each CJK glyph is two cells
        assert_eq!(take_width("日本語", 5), "日本");
        assert_eq!(take_width("日本語", 6), "日本語");
        assert_eq!(take_width("abc", 0), "");
    }

    #[test]
    fn test_truncation_never_splits_multibyte() {
        let out = truncate_with_ellipsis("résumé-résumé-résumé", 10);
        assert_eq!(out, "résumé-...");
    }

    #[test]
    fn test_fit_cell_pads_and_truncates() {
        assert_eq!(fit_cell("Ada", 6), "Ada   ");
        assert_eq!(fit_cell("Grace Brewster Murray Hopper", 20), "Grace Brewster Mu...");
        assert_eq!(display_width(&fit_cell("日本語", 5)), 5);
    }
}
