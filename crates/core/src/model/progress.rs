use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::CourseId;

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Fractional completion of a course, always within `[0, 100]`.
///
/// The only way to build one is through [`Progress::clamped`], so a stored
/// value can never escape the range. Deserialization clamps as well.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub const ZERO: Self = Self(Self::MIN);
    pub const COMPLETE: Self = Self(Self::MAX);

    /// Clamp `value` into `[0, 100]`. `NaN` maps to zero.
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whole-number percentage for labels, rounding half up.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_percent(self) -> u8 {
        self.0.round() as u8
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= Self::MAX
    }
}

impl From<f64> for Progress {
    fn from(value: f64) -> Self {
        Self::clamped(value)
    }
}

impl From<Progress> for f64 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

//
// ─── PROGRESS MAP ──────────────────────────────────────────────────────────────
//

/// Course id → progress. A missing key means zero progress.
///
/// Serializes as a flat JSON object, e.g. `{"c1": 42.3, "c3": 100.0}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap(BTreeMap<CourseId, Progress>);

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Stored progress for `id`, or zero if the course was never touched.
    #[must_use]
    pub fn get(&self, id: &CourseId) -> Progress {
        self.0.get(id).copied().unwrap_or(Progress::ZERO)
    }

    pub fn insert(&mut self, id: CourseId, progress: Progress) {
        self.0.insert(id, progress);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(CourseId, Progress)> for ProgressMap {
    fn from_iter<T: IntoIterator<Item = (CourseId, Progress)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> CourseId {
        CourseId::new(raw).unwrap()
    }

    #[test]
    fn clamps_into_range() {
        assert_eq!(Progress::clamped(-5.0).value(), 0.0);
        assert_eq!(Progress::clamped(42.3).value(), 42.3);
        assert_eq!(Progress::clamped(105.0).value(), 100.0);
        assert_eq!(Progress::clamped(f64::INFINITY).value(), 100.0);
        assert_eq!(Progress::clamped(f64::NAN).value(), 0.0);
    }

    #[test]
    fn rounded_percent_rounds_half_up() {
        assert_eq!(Progress::clamped(4.5).rounded_percent(), 5);
        assert_eq!(Progress::clamped(4.49).rounded_percent(), 4);
        assert_eq!(Progress::COMPLETE.rounded_percent(), 100);
    }

    #[test]
    fn missing_key_reads_as_zero() {
        let map = ProgressMap::new();
        assert_eq!(map.get(&id("c9")), Progress::ZERO);
        assert!(map.is_empty());
    }

    #[test]
    fn serializes_as_flat_object() {
        let map: ProgressMap = [
            (id("c1"), Progress::clamped(42.3)),
            (id("c3"), Progress::COMPLETE),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"c1":42.3,"c3":100.0}"#);

        let back: ProgressMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn deserialization_clamps_out_of_range_values() {
        let map: ProgressMap = serde_json::from_str(r#"{"c1": 250, "c2": -3}"#).unwrap();
        assert_eq!(map.get(&id("c1")), Progress::COMPLETE);
        assert_eq!(map.get(&id("c2")), Progress::ZERO);
    }
}
