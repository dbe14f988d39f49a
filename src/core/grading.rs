//! Grade aggregation
//!
//! A student's percentage in a course is computed from their submissions
//! under a [`GradingPolicy`]:
//!
//! - **Points**: `sum(score_i) / sum(max_points_i)`
//! - **Weighted**: `sum(weight_i * score_i / max_points_i) / sum(weight_i)`
//!
//! Both sums run over items with a submission, unless the policy zero-fills
//! missing work, in which case every item of the course takes part and a
//! missing submission counts as a score of zero.

use crate::core::error::{GradebookError, Result};
use crate::core::models::{Course, GradedItem, StudentId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How item scores are combined into a percentage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// Raw points over raw maximums; weights are ignored
    Points,
    /// Per-item fractions averaged by item weight
    #[default]
    Weighted,
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points => f.write_str("points"),
            Self::Weighted => f.write_str("weighted"),
        }
    }
}

impl FromStr for AggregationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "points" => Ok(Self::Points),
            "weighted" => Ok(Self::Weighted),
            other => Err(format!(
                "Invalid grading mode: '{other}' (expected 'points' or 'weighted')"
            )),
        }
    }
}

/// Treatment of graded items a student has no submission for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingWork {
    /// Leave missing items out of both numerator and denominator
    #[default]
    Exclude,
    /// Count missing items as a score of zero
    ZeroFill,
}

impl fmt::Display for MissingWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exclude => f.write_str("exclude"),
            Self::ZeroFill => f.write_str("zero_fill"),
        }
    }
}

impl FromStr for MissingWork {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "exclude" => Ok(Self::Exclude),
            "zero_fill" | "zero" => Ok(Self::ZeroFill),
            other => Err(format!(
                "Invalid missing-work policy: '{other}' (expected 'exclude' or 'zero_fill')"
            )),
        }
    }
}

/// Policy used to aggregate a student's grade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingPolicy {
    /// Aggregation formula
    pub mode: AggregationMode,
    /// Missing-work treatment
    pub missing_work: MissingWork,
}

impl GradingPolicy {
    /// Create a policy
    #[must_use]
    pub const fn new(mode: AggregationMode, missing_work: MissingWork) -> Self {
        Self { mode, missing_work }
    }

    /// Weighted aggregation excluding missing work
    #[must_use]
    pub const fn weighted() -> Self {
        Self::new(AggregationMode::Weighted, MissingWork::Exclude)
    }

    /// Points aggregation excluding missing work
    #[must_use]
    pub const fn points() -> Self {
        Self::new(AggregationMode::Points, MissingWork::Exclude)
    }

    /// Same policy with missing work counted as zero
    #[must_use]
    pub const fn zero_filled(self) -> Self {
        Self::new(self.mode, MissingWork::ZeroFill)
    }
}

impl fmt::Display for GradingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (missing work: {})", self.mode, self.missing_work)
    }
}

/// Compute `student`'s percentage (0–100) in `course` under `policy`
///
/// # Errors
/// - `NotEnrolled` if the student is not enrolled in the course
/// - `NoSubmissions` if the student has no recorded submissions there
/// - `ZeroTotalWeight` in weighted mode when the participating weights sum to zero
pub fn percentage(course: &Course, student: StudentId, policy: GradingPolicy) -> Result<f64> {
    if !course.is_enrolled(student) {
        return Err(GradebookError::NotEnrolled {
            course: course.id,
            student,
        });
    }
    if course.submissions_of(student).next().is_none() {
        return Err(GradebookError::NoSubmissions {
            course: course.id,
            student,
        });
    }

    // (item, earned) pairs taking part in the aggregate
    let graded: Vec<(&GradedItem, f64)> = course
        .items()
        .filter_map(|item| {
            match (course.submission(student, item.id), policy.missing_work) {
                (Some(submission), _) => Some((item, submission.score)),
                (None, MissingWork::ZeroFill) => Some((item, 0.0)),
                (None, MissingWork::Exclude) => None,
            }
        })
        .collect();

    // Terms are divided by the largest participating maximum (or weight) so
    // the running sums stay finite for any valid inputs.
    let fraction = match policy.mode {
        AggregationMode::Points => {
            let scale = largest(graded.iter().map(|(item, _)| item.max_points));
            let (earned, possible) =
                graded
                    .iter()
                    .fold((0.0, 0.0), |(earned, possible), (item, score)| {
                        (earned + score / scale, possible + item.max_points / scale)
                    });
            earned / possible
        }
        AggregationMode::Weighted => {
            let scale = largest(graded.iter().map(|(item, _)| item.weight));
            if scale <= 0.0 {
                return Err(GradebookError::ZeroTotalWeight {
                    course: course.id,
                    student,
                });
            }
            let (weighted, total_weight) =
                graded
                    .iter()
                    .fold((0.0, 0.0), |(weighted, total), (item, score)| {
                        let weight = item.weight / scale;
                        (weighted + weight * item.fraction(*score), total + weight)
                    });
            weighted / total_weight
        }
    };

    Ok(fraction * 100.0)
}

fn largest(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}
