//! The gradebook: roster, courses, and the operations tying them together
//!
//! Every operation validates completely before mutating, so a rejected call
//! leaves the gradebook exactly as it was.
//!
//! The gradebook is single-threaded and synchronous. A concurrent host should
//! wrap it in a mutex and hold the lock across any read-then-write sequence.

use crate::core::distribution::Distribution;
use crate::core::error::{GradebookError, Result};
use crate::core::grading::{self, GradingPolicy};
use crate::core::models::{Course, CourseId, GradedItem, ItemId, Student, StudentId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-memory gradebook
///
/// Deserializing rebuilds the item index from the courses and never hands out
/// a handle at or below one already in use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "GradebookRecord")]
pub struct Gradebook {
    /// Identities supplied by the roster collaborator
    roster: BTreeMap<StudentId, Student>,

    courses: BTreeMap<CourseId, Course>,

    /// item -> owning course
    item_index: BTreeMap<ItemId, CourseId>,

    next_course: u64,
    next_item: u64,

    /// Policy used by `student_grade` and `course_distribution`
    policy: GradingPolicy,
}

/// Unchecked serialized form of a [`Gradebook`]; the stored item index is ignored
#[derive(Deserialize)]
struct GradebookRecord {
    roster: BTreeMap<StudentId, Student>,
    courses: BTreeMap<CourseId, Course>,
    next_course: u64,
    next_item: u64,
    policy: GradingPolicy,
}

impl TryFrom<GradebookRecord> for Gradebook {
    type Error = GradebookError;

    fn try_from(record: GradebookRecord) -> Result<Self> {
        let inconsistent = |reason: String| GradebookError::InconsistentRecord { reason };

        if let Some((id, student)) = record.roster.iter().find(|(id, s)| **id != s.id) {
            return Err(inconsistent(format!(
                "student {} filed under id {id}",
                student.id
            )));
        }

        let mut item_index = BTreeMap::new();
        for (id, course) in &record.courses {
            if course.id != *id {
                return Err(inconsistent(format!("{} filed under {id}", course.id)));
            }
            for item in course.items() {
                if let Some(owner) = item_index.insert(item.id, *id) {
                    return Err(inconsistent(format!(
                        "{} claimed by both {owner} and {id}",
                        item.id
                    )));
                }
            }
        }

        let last_course = record.courses.keys().next_back().map_or(0, |id| id.0);
        let last_item = item_index.keys().next_back().map_or(0, |id| id.0);

        Ok(Self {
            roster: record.roster,
            courses: record.courses,
            item_index,
            next_course: record.next_course.max(last_course),
            next_item: record.next_item.max(last_item),
            policy: record.policy,
        })
    }
}

impl Gradebook {
    /// Create an empty gradebook with the default policy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty gradebook aggregating under `policy`
    #[must_use]
    pub fn with_policy(policy: GradingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Default grading policy
    #[must_use]
    pub const fn policy(&self) -> GradingPolicy {
        self.policy
    }

    /// Replace the default grading policy
    pub fn set_policy(&mut self, policy: GradingPolicy) {
        crate::debug!("Grading policy changed to {policy}");
        self.policy = policy;
    }

    // --- Roster ---

    /// Register a student identity from the roster
    ///
    /// # Errors
    /// Returns `DuplicateStudent` if the id is already registered.
    pub fn add_student(&mut self, student: Student) -> Result<()> {
        if self.roster.contains_key(&student.id) {
            let err = GradebookError::DuplicateStudent {
                student: student.id,
            };
            crate::debug!("add_student rejected: {err}");
            return Err(err);
        }
        crate::debug!("Roster: added {student}");
        self.roster.insert(student.id, student);
        Ok(())
    }

    /// Drop a student identity from the roster
    ///
    /// Course data keyed by the id is left untouched.
    pub fn remove_student(&mut self, id: StudentId) -> Option<Student> {
        let removed = self.roster.remove(&id);
        if removed.is_some() {
            crate::debug!("Roster: removed student {id}");
        }
        removed
    }

    /// Look up a student identity
    #[must_use]
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.roster.get(&id)
    }

    /// All registered students in id order
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.roster.values()
    }

    // --- Courses ---

    /// Create an open course with no items or students
    pub fn create_course(&mut self, title: impl Into<String>) -> CourseId {
        self.next_course += 1;
        let id = CourseId(self.next_course);
        let course = Course::new(id, title.into());
        crate::debug!("Created {id} '{}'", course.title);
        self.courses.insert(id, course);
        id
    }

    /// Look up a course
    ///
    /// # Errors
    /// Returns `UnknownCourse` if no such course exists.
    pub fn course(&self, course: CourseId) -> Result<&Course> {
        self.courses
            .get(&course)
            .ok_or(GradebookError::UnknownCourse { course })
    }

    fn course_mut(&mut self, course: CourseId) -> Result<&mut Course> {
        self.courses
            .get_mut(&course)
            .ok_or(GradebookError::UnknownCourse { course })
    }

    /// All courses in creation order
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Destroy a course together with its items and submissions
    ///
    /// Students are not affected.
    ///
    /// # Errors
    /// Returns `UnknownCourse` if no such course exists.
    pub fn remove_course(&mut self, course: CourseId) -> Result<Course> {
        let removed = self
            .courses
            .remove(&course)
            .ok_or(GradebookError::UnknownCourse { course })?;
        self.item_index.retain(|_, owner| *owner != course);
        crate::debug!(
            "Removed {course} with {} item(s)",
            removed.item_count()
        );
        Ok(removed)
    }

    /// Lock a course, finalizing its grades
    ///
    /// # Errors
    /// Returns `UnknownCourse`, or `CourseLocked` if it is already locked.
    pub fn lock(&mut self, course: CourseId) -> Result<()> {
        self.course_mut(course)?
            .lock()
            .inspect_err(|e| crate::debug!("lock rejected: {e}"))?;
        crate::info!("Locked {course}");
        Ok(())
    }

    // --- Enrollment ---

    /// Enroll a registered student in a course
    ///
    /// # Errors
    /// `UnknownCourse`, `UnknownStudent`, `CourseLocked`, or
    /// `DuplicateEnrollment` if the student is already enrolled.
    pub fn enroll(&mut self, course: CourseId, student: StudentId) -> Result<()> {
        if !self.roster.contains_key(&student) {
            self.course(course)?;
            let err = GradebookError::UnknownStudent { student };
            crate::debug!("enroll rejected: {err}");
            return Err(err);
        }
        self.course_mut(course)?
            .enroll(student)
            .inspect_err(|e| crate::debug!("enroll rejected: {e}"))?;
        crate::debug!("Enrolled student {student} in {course}");
        Ok(())
    }

    /// Withdraw a student from a course, discarding their submissions there
    ///
    /// # Errors
    /// `UnknownCourse`, `CourseLocked`, or `NotEnrolled`.
    pub fn unenroll(&mut self, course: CourseId, student: StudentId) -> Result<()> {
        let discarded = self
            .course_mut(course)?
            .unenroll(student)
            .inspect_err(|e| crate::debug!("unenroll rejected: {e}"))?;
        crate::debug!(
            "Withdrew student {student} from {course}, discarding {discarded} submission(s)"
        );
        Ok(())
    }

    // --- Graded items ---

    /// Define a new graded item owned by `course`
    ///
    /// # Errors
    /// `UnknownCourse`, `CourseLocked`, `InvalidWeight` if `weight` is
    /// negative, or `InvalidMaxPoints` if `max_points` is not positive.
    pub fn add_graded_item(
        &mut self,
        course: CourseId,
        name: impl Into<String>,
        max_points: f64,
        weight: f64,
    ) -> Result<ItemId> {
        let id = ItemId(self.next_item + 1);
        self.course_mut(course)?
            .add_item(id, name.into(), max_points, weight)
            .inspect_err(|e| crate::debug!("add_graded_item rejected: {e}"))?;
        self.next_item += 1;
        self.item_index.insert(id, course);
        crate::debug!("Added {id} to {course} (max {max_points}, weight {weight})");
        Ok(id)
    }

    /// Look up a graded item
    ///
    /// # Errors
    /// Returns `UnknownItem` if no such item exists.
    pub fn item(&self, item: ItemId) -> Result<&GradedItem> {
        let course = self.owning_course(item)?;
        self.course(course)?
            .item(item)
            .ok_or(GradebookError::UnknownItem { item })
    }

    fn owning_course(&self, item: ItemId) -> Result<CourseId> {
        self.item_index
            .get(&item)
            .copied()
            .ok_or(GradebookError::UnknownItem { item })
    }

    /// Destroy a graded item that no submission references
    ///
    /// # Errors
    /// `UnknownItem`, `CourseLocked`, or `ItemHasSubmissions`.
    pub fn remove_graded_item(&mut self, item: ItemId) -> Result<GradedItem> {
        let course = self.owning_course(item)?;
        let removed = self
            .course_mut(course)?
            .remove_item(item)
            .inspect_err(|e| crate::debug!("remove_graded_item rejected: {e}"))?;
        self.item_index.remove(&item);
        crate::debug!("Removed {item} '{}' from {course}", removed.name);
        Ok(removed)
    }

    // --- Scores ---

    /// Record `score` for `student` on `item`, creating or overwriting the
    /// submission. Returns the score it replaced, if any.
    ///
    /// # Errors
    /// `UnknownItem`, `CourseLocked`, `NotEnrolled` if the student is not in
    /// the item's course, or `OutOfRange` unless `0 <= score <= max_points`.
    pub fn record_score(
        &mut self,
        student: StudentId,
        item: ItemId,
        score: f64,
    ) -> Result<Option<f64>> {
        let course = self.owning_course(item)?;
        let previous = self
            .course_mut(course)?
            .record(student, item, score)
            .inspect_err(|e| crate::debug!("record_score rejected: {e}"))?;
        match previous {
            Some(old) => crate::debug!("Student {student} on {item}: {old} -> {score}"),
            None => crate::debug!("Student {student} on {item}: {score}"),
        }
        Ok(previous)
    }

    /// Recorded score for `student` on `item`, if any
    #[must_use]
    pub fn score(&self, student: StudentId, item: ItemId) -> Option<f64> {
        let course = self.owning_course(item).ok()?;
        self.courses
            .get(&course)?
            .submission(student, item)
            .map(|s| s.score)
    }

    /// Remove a recorded score (e.g., excused work), returning it
    ///
    /// # Errors
    /// `UnknownItem`, `CourseLocked`, `NotEnrolled`, or `NoSuchSubmission`.
    pub fn clear_score(&mut self, student: StudentId, item: ItemId) -> Result<f64> {
        let course = self.owning_course(item)?;
        let cleared = self
            .course_mut(course)?
            .clear(student, item)
            .inspect_err(|e| crate::debug!("clear_score rejected: {e}"))?;
        crate::debug!("Cleared score {cleared} of student {student} on {item}");
        Ok(cleared)
    }

    // --- Queries ---

    /// Student's percentage (0–100) in a course under the default policy
    ///
    /// # Errors
    /// `UnknownCourse`, `NotEnrolled`, `NoSubmissions` if nothing has been
    /// recorded for the student, or `ZeroTotalWeight` (weighted mode only).
    pub fn student_grade(&self, course: CourseId, student: StudentId) -> Result<f64> {
        self.student_grade_with(course, student, self.policy)
    }

    /// Student's percentage under an explicit policy
    ///
    /// # Errors
    /// Same as [`Gradebook::student_grade`].
    pub fn student_grade_with(
        &self,
        course: CourseId,
        student: StudentId,
        policy: GradingPolicy,
    ) -> Result<f64> {
        grading::percentage(self.course(course)?, student, policy)
    }

    /// Ranked standings of a course under the default policy
    ///
    /// # Errors
    /// Returns `UnknownCourse` if no such course exists.
    pub fn course_distribution(&self, course: CourseId) -> Result<Distribution<'_>> {
        self.course_distribution_with(course, self.policy)
    }

    /// Ranked standings of a course under an explicit policy
    ///
    /// # Errors
    /// Returns `UnknownCourse` if no such course exists.
    pub fn course_distribution_with(
        &self,
        course: CourseId,
        policy: GradingPolicy,
    ) -> Result<Distribution<'_>> {
        Ok(Distribution::new(self.course(course)?, policy))
    }
}
