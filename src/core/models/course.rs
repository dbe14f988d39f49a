//! Course model

use super::{GradedItem, ItemId, StudentId, Submission};
use crate::core::error::{GradebookError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Handle to a course within a gradebook
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub(crate) u64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "course#{}", self.0)
    }
}

/// Lifecycle state of a course
///
/// Transitions are one-way: `Open -> Locked`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseState {
    /// Accepting coursework, enrollment changes and grade entry
    #[default]
    Open,
    /// Grading period finalized; the course is read-only
    Locked,
}

impl CourseState {
    /// Whether the course still accepts changes
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for CourseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Locked => f.write_str("locked"),
        }
    }
}

/// A course: owns its graded items and submissions, refers to students by id
///
/// All mutation goes through [`Gradebook`](crate::core::gradebook::Gradebook);
/// every mutating method here validates completely before touching state.
/// Deserialized courses are rebuilt through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CourseRecord")]
pub struct Course {
    /// Handle of this course
    pub id: CourseId,

    /// Course title (e.g., "CS 2510 Fundamentals II")
    pub title: String,

    state: CourseState,

    items: BTreeMap<ItemId, GradedItem>,

    /// Enrolled students (non-owning)
    enrolled: BTreeSet<StudentId>,

    /// student -> item -> submission
    submissions: BTreeMap<StudentId, BTreeMap<ItemId, Submission>>,
}

/// Unchecked serialized form of a [`Course`]
#[derive(Deserialize)]
struct CourseRecord {
    id: CourseId,
    title: String,
    state: CourseState,
    items: BTreeMap<ItemId, GradedItem>,
    enrolled: BTreeSet<StudentId>,
    submissions: BTreeMap<StudentId, BTreeMap<ItemId, Submission>>,
}

impl TryFrom<CourseRecord> for Course {
    type Error = GradebookError;

    /// Replays the record through the open-course operations, then applies its state
    fn try_from(record: CourseRecord) -> Result<Self> {
        let mut course = Self::new(record.id, record.title);

        for (id, item) in record.items {
            if item.id != id || item.course != course.id {
                return Err(GradebookError::InconsistentRecord {
                    reason: format!(
                        "{} of {} filed as {id} in {}",
                        item.id, item.course, course.id
                    ),
                });
            }
            course.add_item(id, item.name, item.max_points, item.weight)?;
        }

        for student in record.enrolled {
            course.enroll(student)?;
        }

        for (student, by_item) in record.submissions {
            for (item, submission) in by_item {
                if submission.student != student || submission.item != item {
                    return Err(GradebookError::InconsistentRecord {
                        reason: format!("submission filed under student {student} on {item}"),
                    });
                }
                course.record(student, item, submission.score)?;
            }
        }

        course.state = record.state;
        Ok(course)
    }
}

impl Course {
    pub(crate) const fn new(id: CourseId, title: String) -> Self {
        Self {
            id,
            title,
            state: CourseState::Open,
            items: BTreeMap::new(),
            enrolled: BTreeSet::new(),
            submissions: BTreeMap::new(),
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> CourseState {
        self.state
    }

    /// Whether the course has been locked
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        !self.state.is_open()
    }

    /// Graded items in creation order
    pub fn items(&self) -> impl Iterator<Item = &GradedItem> {
        self.items.values()
    }

    /// Look up one of this course's items
    #[must_use]
    pub fn item(&self, item: ItemId) -> Option<&GradedItem> {
        self.items.get(&item)
    }

    /// Number of graded items
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Enrolled student ids in ascending order
    pub fn enrolled(&self) -> impl Iterator<Item = StudentId> + '_ {
        self.enrolled.iter().copied()
    }

    /// Whether `student` is enrolled
    #[must_use]
    pub fn is_enrolled(&self, student: StudentId) -> bool {
        self.enrolled.contains(&student)
    }

    /// Number of enrolled students
    #[must_use]
    pub fn enrollment_count(&self) -> usize {
        self.enrolled.len()
    }

    /// The submission for a `(student, item)` pair, if recorded
    #[must_use]
    pub fn submission(&self, student: StudentId, item: ItemId) -> Option<&Submission> {
        self.submissions.get(&student)?.get(&item)
    }

    /// All submissions recorded for `student`, by item
    pub fn submissions_of(&self, student: StudentId) -> impl Iterator<Item = &Submission> {
        self.submissions
            .get(&student)
            .into_iter()
            .flat_map(BTreeMap::values)
    }

    /// Number of submissions referencing `item`
    #[must_use]
    pub fn submissions_for_item(&self, item: ItemId) -> usize {
        self.submissions
            .values()
            .filter(|by_item| by_item.contains_key(&item))
            .count()
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.state.is_open() {
            Ok(())
        } else {
            Err(GradebookError::CourseLocked { course: self.id })
        }
    }

    fn ensure_enrolled(&self, student: StudentId) -> Result<()> {
        if self.is_enrolled(student) {
            Ok(())
        } else {
            Err(GradebookError::NotEnrolled {
                course: self.id,
                student,
            })
        }
    }

    fn known_item(&self, item: ItemId) -> Result<&GradedItem> {
        self.items
            .get(&item)
            .ok_or(GradebookError::UnknownItem { item })
    }

    pub(crate) fn lock(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.state = CourseState::Locked;
        Ok(())
    }

    pub(crate) fn enroll(&mut self, student: StudentId) -> Result<()> {
        self.ensure_open()?;
        if self.is_enrolled(student) {
            return Err(GradebookError::DuplicateEnrollment {
                course: self.id,
                student,
            });
        }
        self.enrolled.insert(student);
        Ok(())
    }

    /// Withdraw `student`, returning the number of submissions discarded
    pub(crate) fn unenroll(&mut self, student: StudentId) -> Result<usize> {
        self.ensure_open()?;
        self.ensure_enrolled(student)?;
        self.enrolled.remove(&student);
        Ok(self
            .submissions
            .remove(&student)
            .map_or(0, |by_item| by_item.len()))
    }

    pub(crate) fn add_item(
        &mut self,
        id: ItemId,
        name: String,
        max_points: f64,
        weight: f64,
    ) -> Result<()> {
        self.ensure_open()?;
        if self.items.contains_key(&id) {
            return Err(GradebookError::InconsistentRecord {
                reason: format!("{id} already exists in {}", self.id),
            });
        }
        let item = GradedItem::new(id, self.id, name, max_points, weight)?;
        self.items.insert(id, item);
        Ok(())
    }

    pub(crate) fn remove_item(&mut self, item: ItemId) -> Result<GradedItem> {
        self.ensure_open()?;
        self.known_item(item)?;
        let count = self.submissions_for_item(item);
        if count > 0 {
            return Err(GradebookError::ItemHasSubmissions { item, count });
        }
        self.items
            .remove(&item)
            .ok_or(GradebookError::UnknownItem { item })
    }

    /// Create or overwrite a submission, returning the previous score
    pub(crate) fn record(
        &mut self,
        student: StudentId,
        item: ItemId,
        score: f64,
    ) -> Result<Option<f64>> {
        self.ensure_open()?;
        let graded_item = self.known_item(item)?;
        self.ensure_enrolled(student)?;
        graded_item.check_score(score)?;

        let previous = self
            .submissions
            .entry(student)
            .or_default()
            .insert(item, Submission::new(student, item, score));
        Ok(previous.map(|s| s.score))
    }

    /// Remove a submission, returning its score
    pub(crate) fn clear(&mut self, student: StudentId, item: ItemId) -> Result<f64> {
        self.ensure_open()?;
        self.known_item(item)?;
        self.ensure_enrolled(student)?;

        let missing = GradebookError::NoSuchSubmission { student, item };
        let by_item = self.submissions.get_mut(&student).ok_or(missing.clone())?;
        let removed = by_item.remove(&item).ok_or(missing)?;
        if by_item.is_empty() {
            self.submissions.remove(&student);
        }
        Ok(removed.score)
    }
}
