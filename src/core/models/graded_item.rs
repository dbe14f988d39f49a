//! Graded item model

use super::CourseId;
use crate::core::error::{GradebookError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a graded item, unique across a gradebook
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub(crate) u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// A piece of coursework carrying a maximum score and a weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedItem {
    /// Handle of this item
    pub id: ItemId,

    /// Owning course; fixed for the item's lifetime
    pub course: CourseId,

    /// Item name (e.g., "Midterm Exam")
    pub name: String,

    /// Maximum attainable points (finite, > 0)
    pub max_points: f64,

    /// Relative weight in weighted aggregation (finite, >= 0)
    pub weight: f64,
}

impl GradedItem {
    /// Create a graded item after validating its point value and weight
    ///
    /// # Errors
    /// Returns `InvalidWeight` if `weight` is negative or not finite, then
    /// `InvalidMaxPoints` if `max_points` is not a finite positive number.
    pub(crate) fn new(
        id: ItemId,
        course: CourseId,
        name: String,
        max_points: f64,
        weight: f64,
    ) -> Result<Self> {
        Self::validate(max_points, weight)?;
        Ok(Self {
            id,
            course,
            name,
            max_points,
            weight,
        })
    }

    /// Check item parameters without building an item
    ///
    /// # Errors
    /// Same as [`GradedItem::new`].
    pub fn validate(max_points: f64, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(GradebookError::InvalidWeight { weight });
        }
        if !max_points.is_finite() || max_points <= 0.0 {
            return Err(GradebookError::InvalidMaxPoints { max_points });
        }
        Ok(())
    }

    /// Check that `score` lies within `0..=max_points`
    ///
    /// # Errors
    /// Returns `OutOfRange` for negative, oversized or non-finite scores.
    pub fn check_score(&self, score: f64) -> Result<()> {
        if score.is_finite() && (0.0..=self.max_points).contains(&score) {
            Ok(())
        } else {
            Err(GradebookError::OutOfRange {
                item: self.id,
                score,
                max_points: self.max_points,
            })
        }
    }

    /// Fraction of the maximum earned by `score` (0.0 to 1.0)
    #[must_use]
    pub fn fraction(&self, score: f64) -> f64 {
        score / self.max_points
    }
}
