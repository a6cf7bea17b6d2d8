use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ids::CourseId;

/// Screens reachable through a plain "go to" command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Home,
    Dashboard,
}

/// The screen currently shown, plus the selected course when it needs one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NavigationTarget {
    #[default]
    Home,
    Dashboard,
    CourseDetail(CourseId),
}

impl NavigationTarget {
    #[must_use]
    pub fn course_id(&self) -> Option<&CourseId> {
        match self {
            Self::CourseDetail(id) => Some(id),
            Self::Home | Self::Dashboard => None,
        }
    }
}

impl From<Screen> for NavigationTarget {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::Home => Self::Home,
            Screen::Dashboard => Self::Dashboard,
        }
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("home"),
            Self::Dashboard => f.write_str("dashboard"),
            Self::CourseDetail(id) => write!(f, "course/{id}"),
        }
    }
}
