//! Read-only views over the catalog and a progress snapshot.
//!
//! Nothing here writes; callers take a [`ProgressMap`] snapshot first.

use learn_core::Catalog;
use learn_core::model::{Course, CourseId, Progress, ProgressMap};

/// Presentation-agnostic card for one course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseCard {
    pub course_id: CourseId,
    pub title: String,
    pub author: String,
    pub duration: String,
    pub thumbnail_ref: String,
    pub progress: Progress,
}

impl CourseCard {
    #[must_use]
    pub fn from_course(course: &Course, progress: &ProgressMap) -> Self {
        Self {
            course_id: course.id.clone(),
            title: course.title.clone(),
            author: course.author.clone(),
            duration: course.duration.clone(),
            thumbnail_ref: course.thumbnail_ref.clone(),
            progress: progress.get(&course.id),
        }
    }

    /// Rounded whole percent, as shown next to a progress bar.
    #[must_use]
    pub fn percent_label(&self) -> u8 {
        self.progress.rounded_percent()
    }
}

/// Cards for the home screen, filtered by a title query.
#[must_use]
pub fn home_cards(catalog: &Catalog, progress: &ProgressMap, query: &str) -> Vec<CourseCard> {
    catalog
        .search(query)
        .map(|course| CourseCard::from_course(course, progress))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Courses at 100.
    pub completed: usize,
    pub total: usize,
    /// Mean progress over the whole catalog, rounded.
    pub overall_percent: u8,
    pub rows: Vec<CourseCard>,
}

impl DashboardSummary {
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn build(catalog: &Catalog, progress: &ProgressMap) -> Self {
        let rows: Vec<CourseCard> = catalog
            .courses()
            .iter()
            .map(|course| CourseCard::from_course(course, progress))
            .collect();
        let total = rows.len();
        let completed = rows.iter().filter(|row| row.progress.is_complete()).count();
        let sum: f64 = rows.iter().map(|row| row.progress.value()).sum();
        let overall_percent = (sum / total.max(1) as f64).round() as u8;

        Self {
            completed,
            total,
            overall_percent,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> CourseId {
        CourseId::new(raw).unwrap()
    }

    fn progress(entries: &[(&str, f64)]) -> ProgressMap {
        entries
            .iter()
            .map(|(raw, value)| (id(raw), Progress::clamped(*value)))
            .collect()
    }

    #[test]
    fn cards_default_to_zero() {
        let cards = home_cards(&Catalog::sample(), &ProgressMap::new(), "");
        assert_eq!(cards.len(), 3);
        assert!(cards.iter().all(|card| card.progress == Progress::ZERO));
    }

    #[test]
    fn cards_follow_search_and_round_labels() {
        let map = progress(&[("c2", 4.5)]);
        let cards = home_cards(&Catalog::sample(), &map, "javascript");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].course_id, id("c2"));
        assert_eq!(cards[0].percent_label(), 5);
    }

    #[test]
    fn dashboard_counts_completed_and_averages() {
        let map = progress(&[("c1", 100.0), ("c2", 50.0), ("stray", 100.0)]);
        let summary = DashboardSummary::build(&Catalog::sample(), &map);

        assert_eq!(summary.completed, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.overall_percent, 50);
        let ids: Vec<&str> = summary.rows.iter().map(|r| r.course_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn empty_catalog_dashboard_is_zero() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        let summary = DashboardSummary::build(&catalog, &ProgressMap::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.overall_percent, 0);
    }
}
