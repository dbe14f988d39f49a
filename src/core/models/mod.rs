//! Data models for the gradebook

pub mod course;
pub mod graded_item;
pub mod student;
pub mod submission;

pub use course::{Course, CourseId, CourseState};
pub use graded_item::{GradedItem, ItemId};
pub use student::{Student, StudentId};
pub use submission::Submission;
