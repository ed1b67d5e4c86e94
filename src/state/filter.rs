//! Visible-list selection for the dashboard
//!
//! Maps the full request list, the toggle flags and the current user to the
//! ordered, de-duplicated list shown in the list region. Input order is kept;
//! ingestion already sorted it by id.

use super::app_state::{ReviewRequest, ToggleFlags};
use std::collections::HashSet;

/// Compute the requests visible under `toggles` for `current_user_id`
pub fn visible_requests<'a>(
    requests: &'a [ReviewRequest],
    toggles: ToggleFlags,
    current_user_id: &str,
) -> Vec<&'a ReviewRequest> {
    let mut visible = Vec::new();
    let mut seen = HashSet::new();

    if toggles.show_not_reviewer {
        for request in requests {
            if !toggles.show_drafts && request.is_draft {
                continue;
            }
            if !toggles.show_mine && request.is_authored_by(current_user_id) {
                continue;
            }
            if seen.insert(request.id) {
                visible.push(request);
            }
        }
        return visible;
    }

    for request in requests {
        if !toggles.show_drafts && request.is_draft {
            continue;
        }
        if !toggles.show_mine && request.is_authored_by(current_user_id) {
            continue;
        }
        if request.has_reviewer(current_user_id) && seen.insert(request.id) {
            visible.push(request);
        }
    }

    if toggles.show_mine {
        for request in requests {
            if !request.is_authored_by(current_user_id) {
                continue;
            }
            if request.is_draft && !toggles.show_drafts {
                continue;
            }
            if seen.insert(request.id) {
                visible.push(request);
            }
        }
    }

    visible
}
