//! Pull request list and detail views

use super::text::{display_width, fit_cell, take_width, truncate_with_ellipsis};
use super::theme::Theme;
use super::widgets::{centered_rect, render_scrollable_list};
use crate::state::{ReviewRequest, ReviewerDecision};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};
use std::collections::HashSet;

/// Border plus horizontal padding on each side of a box
const BOX_FRAME_WIDTH: u16 = 6;

const NAME_WIDTH: usize = 20;
const REQUIRED_WIDTH: usize = 9;
const VOTE_WIDTH: usize = 10;
const ID_WIDTH: usize = 24;

/// Columns available to text inside a box of `box_width`
pub fn usable_width(box_width: u16) -> usize {
    box_width.saturating_sub(BOX_FRAME_WIDTH) as usize
}

/// Rows for `count` lines plus borders, saturating at the terminal limit
fn framed_height(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX).saturating_add(2)
}

fn framed_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::horizontal(2))
}

/// Build one list line that never exceeds `usable_width` cells.
///
/// The title absorbs the shortage first; after that the line is cut from the
/// right while keeping the author, and finally collapsed to cursor, id and
/// author.
pub fn compose_request_line(request: &ReviewRequest, focused: bool, usable_width: usize) -> String {
    let cursor = if focused { ">" } else { " " };
    let id = format!("[{}]", request.id);
    let mode = if request.is_draft { "[Draft] " } else { "" };
    let author = format!("(by {})", request.author_display_name);

    let fixed = display_width(cursor)
        + 1
        + display_width(&id)
        + 1
        + display_width(mode)
        + 1
        + display_width(&author)
        + 1;
    let title = if usable_width <= fixed {
        String::new()
    } else {
        truncate_with_ellipsis(&request.title, usable_width - fixed)
    };

    let mut line = format!("{cursor} {id} {mode}{title} {author}");
    if display_width(&line) > usable_width {
        let id_end = display_width(cursor) + 1 + display_width(&id);
        let cut = usable_width.checked_sub(display_width(&author) + 1);
        line = match cut {
            Some(cut) if cut >= id_end => format!("{} {author}", take_width(&line, cut)),
            _ => format!("{cursor} {id} {author}"),
        };
    }
    take_width(&line, usable_width).to_string()
}

/// Draw the request list box centered in the upper region
pub fn draw_list(
    frame: &mut Frame,
    area: Rect,
    requests: &[&ReviewRequest],
    focused_index: usize,
    theme: &Theme,
) {
    let box_width = area.width / 2;
    let box_height = framed_height(requests.len());
    let box_area = centered_rect(area, box_width, box_height);
    let usable = usable_width(box_width);

    let items: Vec<ListItem> = requests
        .iter()
        .enumerate()
        .map(|(idx, request)| {
            let focused = idx == focused_index;
            ListItem::new(Line::styled(
                compose_request_line(request, focused, usable),
                theme.request_line(request.is_draft, focused),
            ))
        })
        .collect();

    let list = List::new(items).block(framed_block());
    render_scrollable_list(frame, box_area, list, Some(focused_index));
}

/// Draw the focused request's details, top-aligned in the lower region
pub fn draw_detail(
    frame: &mut Frame,
    area: Rect,
    request: &ReviewRequest,
    ignored_reviewer_ids: &HashSet<String>,
    theme: &Theme,
) {
    let mut lines = vec![
        Line::styled(request.title.clone(), theme.title()).centered(),
        Line::from(""),
        Line::styled(request.repository_name.clone(), theme.faint()).centered(),
        Line::from("Reviewers:"),
    ];
    lines.extend(reviewer_table(&request.reviewers, ignored_reviewer_ids, theme));

    let [column] = Layout::horizontal([Constraint::Length(area.width / 2)])
        .flex(Flex::Center)
        .areas(area);
    let height = framed_height(lines.len()).min(column.height);
    let box_area = Rect { height, ..column };

    frame.render_widget(Paragraph::new(lines).block(framed_block()), box_area);
}

fn table_border(left: char, middle: char, right: char) -> String {
    let columns = [NAME_WIDTH, REQUIRED_WIDTH, VOTE_WIDTH, ID_WIDTH].map(|w| "─".repeat(w));
    format!(
        "{left}{}{right}",
        columns.join(&middle.to_string())
    )
}

fn table_row<'a>(cells: [Span<'a>; 4], theme: &Theme) -> Line<'a> {
    let mut spans = Vec::with_capacity(9);
    spans.push(Span::styled("│", theme.table_border()));
    for cell in cells {
        spans.push(cell);
        spans.push(Span::styled("│", theme.table_border()));
    }
    Line::from(spans)
}

/// Box-drawn reviewer table, skipping service accounts
pub fn reviewer_table(
    reviewers: &[ReviewerDecision],
    ignored_reviewer_ids: &HashSet<String>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(table_border('┌', '┬', '┐'), theme.table_border()),
        table_row(
            [
                Span::styled(fit_cell("Name", NAME_WIDTH), theme.reviewer_name()),
                Span::styled(fit_cell("Required", REQUIRED_WIDTH), theme.required(false)),
                Span::styled(fit_cell("Vote", VOTE_WIDTH), theme.vote()),
                Span::styled(fit_cell("ID", ID_WIDTH), theme.faint()),
            ],
            theme,
        ),
        Line::styled(table_border('├', '┼', '┤'), theme.table_border()),
    ];

    for reviewer in reviewers
        .iter()
        .filter(|r| !ignored_reviewer_ids.contains(&r.id))
    {
        let required = if reviewer.is_required { "✔ Yes" } else { "" };
        lines.push(table_row(
            [
                Span::styled(
                    fit_cell(&reviewer.display_name, NAME_WIDTH),
                    theme.reviewer_name(),
                ),
                Span::styled(
                    fit_cell(required, REQUIRED_WIDTH),
                    theme.required(reviewer.is_required),
                ),
                Span::styled(fit_cell(&reviewer.vote.label(), VOTE_WIDTH), theme.vote()),
                Span::styled(fit_cell(&reviewer.id, ID_WIDTH), theme.faint()),
            ],
            theme,
        ));
    }

    lines.push(Line::styled(
        table_border('└', '┴', '┘'),
        theme.table_border(),
    ));
    lines
}
