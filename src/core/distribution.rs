//! Ranked grade distribution for a course

use crate::core::grading::{self, GradingPolicy};
use crate::core::models::{Course, CourseId, StudentId};
use serde::Serialize;
use std::cell::OnceCell;
use std::cmp::Ordering;

/// One entry of a course distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Standing {
    /// Student
    pub student: StudentId,
    /// Aggregate percentage (0–100)
    pub percentage: f64,
}

/// Highest percentage first; equal percentages by ascending student id
fn rank_order(a: &Standing, b: &Standing) -> Ordering {
    b.percentage
        .total_cmp(&a.percentage)
        .then_with(|| a.student.cmp(&b.student))
}

/// Ranked standings of a course's enrolled students
///
/// Nothing is computed until the distribution is first iterated; the ranking
/// is then kept, so iterating again restarts over the same sequence. Students
/// whose grade is undefined (no submissions, or zero total weight) are left out.
#[derive(Debug)]
pub struct Distribution<'a> {
    course: &'a Course,
    policy: GradingPolicy,
    standings: OnceCell<Vec<Standing>>,
}

impl<'a> Distribution<'a> {
    pub(crate) const fn new(course: &'a Course, policy: GradingPolicy) -> Self {
        Self {
            course,
            policy,
            standings: OnceCell::new(),
        }
    }

    /// Course being ranked
    #[must_use]
    pub const fn course(&self) -> CourseId {
        self.course.id
    }

    /// Policy the percentages are computed under
    #[must_use]
    pub const fn policy(&self) -> GradingPolicy {
        self.policy
    }

    fn standings(&self) -> &[Standing] {
        self.standings.get_or_init(|| {
            let mut ranked: Vec<Standing> = self
                .course
                .enrolled()
                .filter_map(|student| {
                    grading::percentage(self.course, student, self.policy)
                        .ok()
                        .map(|percentage| Standing {
                            student,
                            percentage,
                        })
                })
                .collect();
            ranked.sort_by(rank_order);
            ranked
        })
    }

    /// Iterate standings from highest to lowest
    pub fn iter(&self) -> std::slice::Iter<'_, Standing> {
        self.standings().iter()
    }

    /// Number of ranked students
    #[must_use]
    pub fn len(&self) -> usize {
        self.standings().len()
    }

    /// Whether no student has a defined grade
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.standings().is_empty()
    }

    /// Descriptive statistics over the standings, `None` when empty
    #[must_use]
    pub fn summary(&self) -> Option<Summary> {
        Summary::of(self.standings())
    }
}

impl<'b> IntoIterator for &'b Distribution<'_> {
    type Item = &'b Standing;
    type IntoIter = std::slice::Iter<'b, Standing>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Descriptive statistics of a course distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Number of ranked students
    pub count: usize,
    /// Arithmetic mean percentage
    pub mean: f64,
    /// Median percentage
    pub median: f64,
    /// Lowest percentage
    pub min: f64,
    /// Highest percentage
    pub max: f64,
}

impl Summary {
    /// Summarise standings already in rank order
    #[allow(clippy::cast_precision_loss)]
    fn of(ranked: &[Standing]) -> Option<Self> {
        let first = ranked.first()?;
        let last = ranked.last()?;
        let count = ranked.len();
        let mean = ranked.iter().map(|s| s.percentage).sum::<f64>() / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (ranked[mid - 1].percentage + ranked[mid].percentage) / 2.0
        } else {
            ranked[mid].percentage
        };

        Some(Self {
            count,
            mean,
            median,
            min: last.percentage,
            max: first.percentage,
        })
    }
}
