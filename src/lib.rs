//! In-memory gradebook relating students, courses and graded items.
//!
//! The [`Gradebook`] holds the roster, the courses with their graded items and
//! submissions, and answers aggregation queries: a student's percentage in a
//! course and a course's ranked distribution.
//!
//! ```
//! use gradebook::{Gradebook, Student, StudentId};
//!
//! let mut book = Gradebook::new();
//! let course = book.create_course("Physics I");
//! let quiz = book.add_graded_item(course, "Quiz", 10.0, 1.0)?;
//! let exam = book.add_graded_item(course, "Exam", 100.0, 3.0)?;
//!
//! let s = StudentId(1);
//! book.add_student(Student::new(s, "Sam".to_string()))?;
//! book.enroll(course, s)?;
//! book.record_score(s, quiz, 8.0)?;
//! book.record_score(s, exam, 90.0)?;
//!
//! let grade = book.student_grade(course, s)?;
//! assert!((grade - 87.5).abs() < 1e-9);
//! # Ok::<(), gradebook::GradebookError>(())
//! ```

pub mod core;
pub mod logger;

pub use crate::core::models::{
    Course, CourseId, CourseState, GradedItem, ItemId, Student, StudentId, Submission,
};
pub use crate::core::{
    config, error, get_version, AggregationMode, Distribution, GradebookError, Gradebook,
    GradingPolicy, MissingWork, Standing, Summary,
};
