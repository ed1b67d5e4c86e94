//! Application state definitions

use super::filter::visible_requests;

/// A reviewer's recorded decision on a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Approved,
    ApprovedWithSuggestions,
    NoVote,
    WaitingForAuthor,
    Rejected,
    Other(i32),
}

impl Vote {
    pub fn label(&self) -> String {
        match self {
            Self::Approved => "Approved".to_string(),
            Self::ApprovedWithSuggestions => "Suggest".to_string(),
            Self::NoVote => "No Vote".to_string(),
            Self::WaitingForAuthor => "Waiting".to_string(),
            Self::Rejected => "Rejected".to_string(),
            Self::Other(raw) => raw.to_string(),
        }
    }
}

impl From<i32> for Vote {
    fn from(raw: i32) -> Self {
        match raw {
            10 => Self::Approved,
            5 => Self::ApprovedWithSuggestions,
            0 => Self::NoVote,
            -5 => Self::WaitingForAuthor,
            -10 => Self::Rejected,
            other => Self::Other(other),
        }
    }
}

/// Reviewer entry on a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerDecision {
    /// Stable identity id, empty when unknown
    pub id: String,
    pub display_name: String,
    pub is_required: bool,
    pub vote: Vote,
}

/// Open pull request as ingested from the listing API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub id: i64,
    pub title: String,
    pub author_display_name: String,
    pub author_id: String,
    pub is_draft: bool,
    pub repository_name: String,
    pub reviewers: Vec<ReviewerDecision>,
}

impl ReviewRequest {
    /// Whether `user_id` is listed among the reviewers. An empty id never matches.
    pub fn has_reviewer(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.reviewers.iter().any(|r| r.id == user_id)
    }

    /// Whether `user_id` authored this request. An empty id never matches.
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.author_id == user_id
    }
}

/// User-controlled list filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleFlags {
    pub show_drafts: bool,
    pub show_mine: bool,
    pub show_not_reviewer: bool,
}

/// Dashboard state driven by input events
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// All ingested requests, fixed for the lifetime of the dashboard
    pub requests: Vec<ReviewRequest>,
    pub toggles: ToggleFlags,
    pub focused_index: usize,
    pub current_user_id: String,
    /// Terminal size as (width, height)
    pub viewport: (u16, u16),
}

impl DashboardState {
    pub fn new(requests: Vec<ReviewRequest>, current_user_id: impl Into<String>) -> Self {
        Self {
            requests,
            current_user_id: current_user_id.into(),
            ..Default::default()
        }
    }

    /// Requests visible under the current toggles
    pub fn visible(&self) -> Vec<&ReviewRequest> {
        visible_requests(&self.requests, self.toggles, &self.current_user_id)
    }

    /// Focused request, `None` when the filtered list is empty
    pub fn focused_request(&self) -> Option<&ReviewRequest> {
        let visible = self.visible();
        let index = self.focused_index.min(visible.len().saturating_sub(1));
        visible.get(index).copied()
    }

    /// Move focus up
    pub fn move_up(&mut self) {
        if self.focused_index > 0 {
            self.focused_index -= 1;
        }
    }

    /// Move focus down
    pub fn move_down(&mut self) {
        let count = self.visible().len();
        if count > 0 && self.focused_index < count - 1 {
            self.focused_index += 1;
        }
    }

    pub fn toggle_drafts(&mut self) {
        self.toggles.show_drafts = !self.toggles.show_drafts;
        self.reset_focus();
    }

    pub fn toggle_mine(&mut self) {
        self.toggles.show_mine = !self.toggles.show_mine;
        self.reset_focus();
    }

    pub fn toggle_not_reviewer(&mut self) {
        self.toggles.show_not_reviewer = !self.toggles.show_not_reviewer;
        self.reset_focus();
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    fn reset_focus(&mut self) {
        self.focused_index = 0;
    }
}
