//! Color and emphasis choices for the dashboard

use ratatui::style::{Color, Modifier, Style};

/// Stateless style palette passed into every draw function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub affirmative: Color,
    pub muted: Color,
    pub negative: Color,
    pub accent: Color,
    pub reviewer_name: Color,
    pub vote: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            affirmative: Color::Green,
            muted: Color::DarkGray,
            negative: Color::Red,
            accent: Color::Blue,
            reviewer_name: Color::Magenta,
            vote: Color::Yellow,
        }
    }
}

impl Theme {
    /// Drafts are muted, everything else affirmative; focus adds bold
    pub fn request_line(&self, is_draft: bool, focused: bool) -> Style {
        let style = if is_draft {
            Style::default().fg(self.muted)
        } else {
            Style::default().fg(self.affirmative)
        };
        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Footer key color reflecting a toggle
    pub fn toggle_key(&self, enabled: bool) -> Style {
        let color = if enabled {
            self.affirmative
        } else {
            self.negative
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn faint(&self) -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }

    pub fn empty_state(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn reviewer_name(&self) -> Style {
        Style::default()
            .fg(self.reviewer_name)
            .add_modifier(Modifier::BOLD)
    }

    pub fn required(&self, is_required: bool) -> Style {
        let color = if is_required {
            self.affirmative
        } else {
            self.negative
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn vote(&self) -> Style {
        Style::default().fg(self.vote)
    }

    pub fn table_border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.negative)
            .add_modifier(Modifier::BOLD)
    }
}
