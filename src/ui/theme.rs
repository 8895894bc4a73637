use owo_colors::{OwoColorize, Style};
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// What a piece of terminal text means, independent of its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Section and contact titles
    Title,
    Success,
    Error,
    Warn,
    /// Prompt, program name and info markers
    Accent,
    /// Field labels such as "Phone"
    Label,
    /// Footers and counts
    Muted,
}

#[derive(Debug, Clone)]
pub struct Theme {
    colored: bool,
}

impl Theme {
    /// Colors only on a terminal with colors enabled (NO_COLOR and
    /// CLICOLOR=0 turn them off).
    pub fn detect() -> Self {
        let colored = console::Term::stdout().is_term() && console::colors_enabled();
        Self { colored }
    }

    pub fn colored() -> Self {
        Self { colored: true }
    }

    pub fn plain() -> Self {
        Self { colored: false }
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }

    pub fn style(&self, role: Role) -> Style {
        if !self.colored {
            return Style::new();
        }
        match role {
            Role::Title => Style::new().cyan().bold(),
            Role::Success => Style::new().green().bold(),
            Role::Error => Style::new().red().bold(),
            Role::Warn => Style::new().yellow().bold(),
            Role::Accent => Style::new().blue().bold(),
            Role::Label => Style::new().white().dimmed(),
            Role::Muted => Style::new().bright_black(),
        }
    }

    pub fn paint(&self, role: Role, text: &str) -> String {
        if !self.colored {
            return text.to_string();
        }
        text.style(self.style(role)).to_string()
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_leaves_text_alone() {
        let plain = Theme::plain();
        assert!(!plain.is_colored());
        assert_eq!(plain.paint(Role::Title, "Address Book"), "Address Book");
        assert_eq!(plain.paint(Role::Error, "No record with id 3"), "No record with id 3");
    }

    #[test]
    fn test_colored_theme_wraps_text() {
        let colored = Theme::colored();
        let painted = colored.paint(Role::Success, "Jane Doe was successfully added.");
        assert!(painted.contains("Jane Doe was successfully added."));
        assert!(painted.contains('\u{1b}'));
    }
}
