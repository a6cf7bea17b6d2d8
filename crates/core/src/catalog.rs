//! Static course catalog. Read-only input to the engine.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Course, CourseId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate course id: {0}")]
    DuplicateCourseId(CourseId),
}

/// Ordered, immutable sequence of courses with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Build a catalog, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateCourseId` if two courses share an id.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(courses.len());
        for course in &courses {
            if !seen.insert(&course.id) {
                return Err(CatalogError::DuplicateCourseId(course.id.clone()));
            }
        }
        Ok(Self { courses })
    }

    /// The three built-in courses.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            courses: sample_courses(),
        }
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| &course.id == id)
    }

    /// Courses whose title contains `query`, ignoring case, in catalog order.
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Course> + 'a {
        self.courses
            .iter()
            .filter(move |course| course.title_matches(query))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

fn sample_course(
    id: &'static str,
    title: &str,
    author: &str,
    duration: &str,
    seed: &str,
    video: &str,
    description: &str,
) -> Course {
    Course {
        id: CourseId::from_static(id),
        title: title.to_string(),
        author: author.to_string(),
        duration: duration.to_string(),
        thumbnail_ref: format!("https://picsum.photos/seed/{seed}/400/250"),
        video_ref: format!("https://www.youtube.com/embed/{video}"),
        description: description.to_string(),
    }
}

fn sample_courses() -> Vec<Course> {
    vec![
        sample_course(
            "c1",
            "HTML & CSS \u{2014} From Zero to Designer",
            "Asha Rao",
            "4h 12m",
            "html",
            "pQN-pnXPaVg",
            "Learn the foundations of web layout, responsive design, and modern CSS \
             techniques through projects and exercises.",
        ),
        sample_course(
            "c2",
            "JavaScript Essentials: The Joy of Code",
            "Ravi Menon",
            "6h 05m",
            "js",
            "hdI2bqOjy3c",
            "Understand core JavaScript, DOM manipulation, and start building \
             interactive web apps.",
        ),
        sample_course(
            "c3",
            "Data Structures for Interviews: Great Learning",
            "Priya Sharma",
            "3h 20m",
            "ds",
            "bum_19loj9A",
            "A compact guide to arrays, linked lists, stacks, queues, trees and hashing \u{2014} \
             focused on interview-ready patterns.",
        ),
    ]
}
