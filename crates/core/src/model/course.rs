use serde::{Deserialize, Serialize};

use crate::model::ids::CourseId;

/// A catalog entry. Supplied once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub author: String,
    /// Human-readable running time, e.g. `"4h 12m"`.
    pub duration: String,
    pub thumbnail_ref: String,
    pub video_ref: String,
    pub description: String,
}

impl Course {
    /// Case-insensitive substring match against the title.
    ///
    /// An empty query matches every course.
    #[must_use]
    pub fn title_matches(&self, query: &str) -> bool {
        self.title
            .to_lowercase()
            .contains(&query.to_lowercase())
    }
}
