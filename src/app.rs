//! Event handling for the dashboard and the error screen

use crate::state::{DashboardState, ReviewRequest};
use crate::ui::{self, Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::collections::HashSet;

/// Input delivered to a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Effect requested by a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
}

/// A screen driven by the event loop: effects out of `init`/`update`, pixels out of `view`
pub trait Model {
    fn init(&mut self) -> Command;

    fn update(&mut self, event: AppEvent) -> Command;

    fn view(&self, frame: &mut Frame);
}

/// The pull request dashboard
pub struct DashboardApp {
    pub state: DashboardState,
    theme: Theme,
    ignored_reviewer_ids: HashSet<String>,
}

impl DashboardApp {
    pub fn new(
        requests: Vec<ReviewRequest>,
        current_user_id: impl Into<String>,
        ignored_reviewer_ids: HashSet<String>,
        theme: Theme,
    ) -> Self {
        Self {
            state: DashboardState::new(requests, current_user_id),
            theme,
            ignored_reviewer_ids,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Command::Quit
            }
            KeyCode::Char('q') | KeyCode::Esc => return Command::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.state.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_down(),
            KeyCode::Char('d') => self.state.toggle_drafts(),
            KeyCode::Char('m') => self.state.toggle_mine(),
            KeyCode::Char('r') => self.state.toggle_not_reviewer(),
            _ => {}
        }
        tracing::debug!(
            "Focus {} with toggles {:?}",
            self.state.focused_index,
            self.state.toggles
        );
        Command::None
    }
}

impl Model for DashboardApp {
    fn init(&mut self) -> Command {
        tracing::info!(
            "Dashboard started with {} pull requests, {} visible",
            self.state.requests.len(),
            self.state.visible().len()
        );
        Command::None
    }

    fn update(&mut self, event: AppEvent) -> Command {
        match event {
            AppEvent::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            AppEvent::Key(_) => Command::None,
            AppEvent::Resize(width, height) => {
                self.state.set_viewport(width, height);
                Command::None
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = viewport_area(frame.area(), self.state.viewport);
        ui::draw_dashboard(
            frame,
            area,
            &self.state,
            &self.theme,
            &self.ignored_reviewer_ids,
        );
    }
}

/// Last reported viewport, limited to the frame; the whole frame until a size is known
fn viewport_area(frame_area: Rect, viewport: (u16, u16)) -> Rect {
    match viewport {
        (0, _) | (_, 0) => frame_area,
        (width, height) => frame_area.intersection(Rect::new(0, 0, width, height)),
    }
}

/// Fatal error screen that exits on any key
pub struct ErrorApp {
    message: String,
    theme: Theme,
}

impl ErrorApp {
    pub fn new(message: impl Into<String>, theme: Theme) -> Self {
        Self {
            message: message.into(),
            theme,
        }
    }
}

impl Model for ErrorApp {
    fn init(&mut self) -> Command {
        tracing::warn!("Showing error screen: {}", self.message);
        Command::None
    }

    fn update(&mut self, event: AppEvent) -> Command {
        match event {
            AppEvent::Key(key) if key.kind == KeyEventKind::Press => Command::Quit,
            AppEvent::Key(_) | AppEvent::Resize(..) => Command::None,
        }
    }

    fn view(&self, frame: &mut Frame) {
        ui::draw_error(frame, &self.message, &self.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::{request, ME, OTHER};
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn dashboard() -> DashboardApp {
        DashboardApp::new(
            vec![
                request(1, OTHER, false, &[ME]),
                request(2, OTHER, false, &[ME]),
                request(3, OTHER, true, &[ME]),
                request(4, ME, false, &[]),
                request(5, OTHER, false, &[]),
            ],
            ME,
            HashSet::new(),
            Theme::default(),
        )
    }

    fn visible_ids(app: &DashboardApp) -> Vec<i64> {
        app.state.visible().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_init_has_no_effect() {
        assert_eq!(dashboard().init(), Command::None);
    }

    #[test]
    fn test_arrow_and_vim_keys_navigate() {
        let mut app = dashboard();
        app.update(key(KeyCode::Down));
        assert_eq!(app.state.focused_index, 1);
        app.update(key(KeyCode::Char('j')));
        assert_eq!(app.state.focused_index, 1);
        app.update(key(KeyCode::Char('k')));
        assert_eq!(app.state.focused_index, 0);
        app.update(key(KeyCode::Up));
        assert_eq!(app.state.focused_index, 0);
    }

    #[test]
    fn test_toggle_keys_change_filter_and_reset_focus() {
        let mut app = dashboard();
        app.update(key(KeyCode::Down));

        app.update(key(KeyCode::Char('d')));
        assert_eq!(visible_ids(&app), vec![1, 2, 3]);
        assert_eq!(app.state.focused_index, 0);

        app.update(key(KeyCode::Char('m')));
        assert_eq!(visible_ids(&app), vec![1, 2, 3, 4]);

        app.update(key(KeyCode::Char('r')));
        assert_eq!(visible_ids(&app), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            key(KeyCode::Char('q')),
            key(KeyCode::Esc),
            AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        ] {
            assert_eq!(dashboard().update(event), Command::Quit);
        }
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        assert_eq!(dashboard().update(key(KeyCode::Char('c'))), Command::None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = dashboard();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(app.update(AppEvent::Key(release)), Command::None);
    }

    #[test]
    fn test_resize_records_viewport() {
        let mut app = dashboard();
        assert_eq!(app.update(AppEvent::Resize(100, 40)), Command::None);
        assert_eq!(app.state.viewport, (100, 40));
    }

    #[test]
    fn test_viewport_area() {
        let frame = Rect::new(0, 0, 120, 40);
        assert_eq!(viewport_area(frame, (0, 0)), frame);
        assert_eq!(viewport_area(frame, (80, 24)), Rect::new(0, 0, 80, 24));
        assert_eq!(viewport_area(frame, (200, 50)), frame);
    }

    #[test]
    fn test_error_app_quits_on_any_key() {
        let mut app = ErrorApp::new("boom", Theme::default());
        assert_eq!(app.init(), Command::None);
        assert_eq!(app.update(AppEvent::Resize(80, 24)), Command::None);
        assert_eq!(app.update(key(KeyCode::Char('x'))), Command::Quit);
    }
}
