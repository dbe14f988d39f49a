//! Error taxonomy for gradebook operations
//!
//! Every failure is recoverable and reported before any state changes.

use crate::core::models::{CourseId, ItemId, StudentId};
use thiserror::Error;

/// Shorthand for results of gradebook operations
pub type Result<T> = std::result::Result<T, GradebookError>;

/// Typed outcome of a rejected gradebook operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradebookError {
    /// The student is already enrolled in the course
    #[error("student {student} is already enrolled in {course}")]
    DuplicateEnrollment {
        /// Course
        course: CourseId,
        /// Student
        student: StudentId,
    },

    /// Item weight is negative or not finite
    #[error("invalid weight {weight}: weights must be finite and non-negative")]
    InvalidWeight {
        /// Offending weight
        weight: f64,
    },

    /// Item maximum is not a finite positive number
    #[error("invalid maximum points {max_points}: must be finite and greater than zero")]
    InvalidMaxPoints {
        /// Offending maximum
        max_points: f64,
    },

    /// The student is not enrolled in the course
    #[error("student {student} is not enrolled in {course}")]
    NotEnrolled {
        /// Course
        course: CourseId,
        /// Student
        student: StudentId,
    },

    /// Score falls outside `0..=max_points`
    #[error("score {score} is outside 0..={max_points} for {item}")]
    OutOfRange {
        /// Item being graded
        item: ItemId,
        /// Rejected score
        score: f64,
        /// The item's maximum
        max_points: f64,
    },

    /// The course is locked and accepts no further changes
    #[error("{course} is locked")]
    CourseLocked {
        /// Locked course
        course: CourseId,
    },

    /// The student has no recorded submissions in the course
    #[error("student {student} has no recorded submissions in {course}")]
    NoSubmissions {
        /// Course
        course: CourseId,
        /// Student
        student: StudentId,
    },

    /// Weighted aggregation over items whose weights sum to zero
    #[error("weights of graded work for student {student} in {course} sum to zero")]
    ZeroTotalWeight {
        /// Course
        course: CourseId,
        /// Student
        student: StudentId,
    },

    /// No course with this handle
    #[error("unknown {course}")]
    UnknownCourse {
        /// Handle that was not found
        course: CourseId,
    },

    /// No graded item with this handle
    #[error("unknown {item}")]
    UnknownItem {
        /// Handle that was not found
        item: ItemId,
    },

    /// The student is not on the roster
    #[error("student {student} is not on the roster")]
    UnknownStudent {
        /// Id that was not found
        student: StudentId,
    },

    /// A student with this id is already on the roster
    #[error("student {student} is already on the roster")]
    DuplicateStudent {
        /// Conflicting id
        student: StudentId,
    },

    /// The item cannot be removed while submissions reference it
    #[error("{item} has {count} recorded submission(s)")]
    ItemHasSubmissions {
        /// Item
        item: ItemId,
        /// Number of referencing submissions
        count: usize,
    },

    /// No submission exists for this student and item
    #[error("no submission recorded for student {student} on {item}")]
    NoSuchSubmission {
        /// Student
        student: StudentId,
        /// Item
        item: ItemId,
    },

    /// Deserialized data whose handles disagree with each other
    #[error("inconsistent gradebook data: {reason}")]
    InconsistentRecord {
        /// What did not line up
        reason: String,
    },
}
