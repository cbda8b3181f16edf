//! Screen navigation.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Dashboard,
    Colleges,
    Courses,
    Exams,
    Ebooks,
    Scholarships,
    Chat,
    Profile,
}

impl Screen {
    /// List screens built on the list-filter-sort view.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::Colleges | Self::Courses | Self::Exams | Self::Ebooks | Self::Scholarships
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Colleges => "colleges",
            Self::Courses => "courses",
            Self::Exams => "exams",
            Self::Ebooks => "ebooks",
            Self::Scholarships => "scholarships",
            Self::Chat => "chat",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "colleges" => Ok(Self::Colleges),
            "courses" => Ok(Self::Courses),
            "exams" => Ok(Self::Exams),
            "ebooks" => Ok(Self::Ebooks),
            "scholarships" => Ok(Self::Scholarships),
            "chat" => Ok(Self::Chat),
            "profile" => Ok(Self::Profile),
            other => Err(AppError::validation(format!("Unknown screen '{other}'"))),
        }
    }
}

/// Navigation collaborator handed to views.
pub trait Navigation {
    /// Screen currently shown.
    fn current(&self) -> Screen;

    /// Open a screen.
    fn navigate(&mut self, screen: Screen);

    /// Leave the current screen and return the one now shown.
    fn back(&mut self) -> Screen;
}

/// Stack of visited screens, rooted at the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    stack: Vec<Screen>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Dashboard],
        }
    }

    /// Visited screens, oldest first.
    pub fn entries(&self) -> &[Screen] {
        &self.stack
    }
}

impl Navigation for History {
    fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(Screen::Dashboard)
    }

    fn navigate(&mut self, screen: Screen) {
        if self.current() != screen {
            self.stack.push(screen);
        }
    }

    /// List screens always go back to the dashboard; other screens return to
    /// the previous entry.
    fn back(&mut self) -> Screen {
        if self.current().is_list() {
            let dashboard = self
                .stack
                .iter()
                .rposition(|s| *s == Screen::Dashboard)
                .unwrap_or(0);
            self.stack.truncate(dashboard + 1);
            if self.current() != Screen::Dashboard {
                self.stack.push(Screen::Dashboard);
            }
        } else if self.stack.len() > 1 {
            self.stack.pop();
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_screen_back_lands_on_dashboard() {
        let mut history = History::new();
        history.navigate(Screen::Chat);
        history.navigate(Screen::Colleges);
        assert_eq!(history.back(), Screen::Dashboard);
        assert_eq!(history.entries(), &[Screen::Dashboard]);
    }

    #[test]
    fn test_other_screens_pop_one() {
        let mut history = History::new();
        history.navigate(Screen::Ebooks);
        history.navigate(Screen::Profile);
        assert_eq!(history.back(), Screen::Ebooks);
        assert_eq!(history.back(), Screen::Dashboard);
        assert_eq!(history.back(), Screen::Dashboard);
    }

    #[test]
    fn test_navigate_same_screen_is_noop() {
        let mut history = History::new();
        history.navigate(Screen::Exams);
        history.navigate(Screen::Exams);
        assert_eq!(history.entries().len(), 2);
        assert_eq!("EXAMS".parse::<Screen>().unwrap(), Screen::Exams);
    }
}
