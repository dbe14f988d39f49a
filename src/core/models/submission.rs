//! Submission model

use super::{ItemId, StudentId};
use serde::{Deserialize, Serialize};

/// A recorded score tying one student to one graded item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Student who earned the score
    pub student: StudentId,

    /// Item the score was earned on
    pub item: ItemId,

    /// Earned points, always within `0..=max_points` of the item
    pub score: f64,
}

impl Submission {
    /// Create a new submission
    #[must_use]
    pub const fn new(student: StudentId, item: ItemId, score: f64) -> Self {
        Self {
            student,
            item,
            score,
        }
    }
}
