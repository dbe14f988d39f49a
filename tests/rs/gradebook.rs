//! Integration tests for gradebook operations

use gradebook::{
    CourseId, CourseState, GradebookError, Gradebook, GradingPolicy, ItemId, Student, StudentId,
};

/// A gradebook with one course, Quiz (max 10, weight 1), Exam (max 100, weight 3)
/// and student 1 enrolled
struct Fixture {
    book: Gradebook,
    course: CourseId,
    quiz: ItemId,
    exam: ItemId,
    student: StudentId,
}

fn fixture() -> Fixture {
    let mut book = Gradebook::new();
    let course = book.create_course("Physics I");
    let quiz = book
        .add_graded_item(course, "Quiz", 10.0, 1.0)
        .expect("Failed to add quiz");
    let exam = book
        .add_graded_item(course, "Exam", 100.0, 3.0)
        .expect("Failed to add exam");
    let student = StudentId(1);
    book.add_student(Student::new(student, "Sam Carter".to_string()))
        .expect("Failed to add student");
    book.enroll(course, student).expect("Failed to enroll");

    Fixture {
        book,
        course,
        quiz,
        exam,
        student,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_recorded_score_reads_back_exactly() {
    let mut f = fixture();

    for score in [0.0, 3.25, 7.1, 10.0] {
        f.book
            .record_score(f.student, f.quiz, score)
            .expect("Failed to record score");
        assert_eq!(f.book.score(f.student, f.quiz), Some(score));
    }
}

#[test]
fn test_record_overwrites_previous_score() {
    let mut f = fixture();

    assert_eq!(f.book.record_score(f.student, f.exam, 70.0), Ok(None));
    assert_eq!(f.book.record_score(f.student, f.exam, 75.0), Ok(Some(70.0)));
    assert_eq!(f.book.score(f.student, f.exam), Some(75.0));
}

#[test]
fn test_score_above_max_is_rejected_without_change() {
    let mut f = fixture();
    f.book
        .record_score(f.student, f.quiz, 6.0)
        .expect("Failed to record score");

    let err = f.book.record_score(f.student, f.quiz, 10.01).unwrap_err();
    assert!(matches!(err, GradebookError::OutOfRange { .. }));
    assert_eq!(f.book.score(f.student, f.quiz), Some(6.0));

    assert!(matches!(
        f.book.record_score(f.student, f.quiz, -1.0),
        Err(GradebookError::OutOfRange { .. })
    ));
    assert_eq!(f.book.score(f.student, f.quiz), Some(6.0));
}

#[test]
fn test_duplicate_enrollment_is_rejected() {
    let mut f = fixture();

    assert_eq!(
        f.book.enroll(f.course, f.student),
        Err(GradebookError::DuplicateEnrollment {
            course: f.course,
            student: f.student
        })
    );
    let course = f.book.course(f.course).expect("course exists");
    assert_eq!(course.enrollment_count(), 1);
}

#[test]
fn test_enroll_requires_roster_entry() {
    let mut f = fixture();

    assert_eq!(
        f.book.enroll(f.course, StudentId(404)),
        Err(GradebookError::UnknownStudent {
            student: StudentId(404)
        })
    );
}

#[test]
fn test_record_requires_enrollment() {
    let mut f = fixture();
    let outsider = StudentId(2);
    f.book
        .add_student(Student::new(outsider, "Jo".to_string()))
        .expect("Failed to add student");

    assert_eq!(
        f.book.record_score(outsider, f.quiz, 5.0),
        Err(GradebookError::NotEnrolled {
            course: f.course,
            student: outsider
        })
    );
    assert!(f.book.score(outsider, f.quiz).is_none());
}

#[test]
fn test_invalid_item_parameters() {
    let mut f = fixture();

    assert_eq!(
        f.book.add_graded_item(f.course, "Bonus", 5.0, -1.0),
        Err(GradebookError::InvalidWeight { weight: -1.0 })
    );
    assert_eq!(
        f.book.add_graded_item(f.course, "Empty", 0.0, 1.0),
        Err(GradebookError::InvalidMaxPoints { max_points: 0.0 })
    );
    assert_eq!(f.book.course(f.course).map(|c| c.item_count()), Ok(2));
}

#[test]
fn test_locked_course_rejects_changes() {
    let mut f = fixture();
    f.book
        .record_score(f.student, f.quiz, 8.0)
        .expect("Failed to record score");
    f.book.lock(f.course).expect("Failed to lock");

    let locked = GradebookError::CourseLocked { course: f.course };
    assert_eq!(
        f.book.course(f.course).map(|c| c.state()),
        Ok(CourseState::Locked)
    );
    assert_eq!(f.book.record_score(f.student, f.quiz, 9.0), Err(locked.clone()));
    assert_eq!(f.book.record_score(f.student, f.exam, 50.0), Err(locked.clone()));
    assert_eq!(
        f.book.add_graded_item(f.course, "Final", 100.0, 5.0),
        Err(locked.clone())
    );
    assert_eq!(f.book.clear_score(f.student, f.quiz), Err(locked.clone()));

    let late = StudentId(2);
    f.book
        .add_student(Student::new(late, "Lee Adama".to_string()))
        .expect("Failed to add student");
    assert_eq!(f.book.enroll(f.course, late), Err(locked.clone()));
    assert_eq!(f.book.unenroll(f.course, f.student), Err(locked.clone()));
    assert_eq!(f.book.remove_graded_item(f.exam), Err(locked.clone()));
    assert_eq!(f.book.lock(f.course), Err(locked));

    let course = f.book.course(f.course).expect("Failed to find course");
    assert_eq!(course.enrollment_count(), 1);
    assert!(course.is_enrolled(f.student));
    assert!(!course.is_enrolled(late));
    assert_eq!(course.item_count(), 2);
    assert!(f.book.item(f.exam).is_ok());

    // Finalized grades stay readable
    assert_eq!(f.book.score(f.student, f.quiz), Some(8.0));
    assert_close(
        f.book
            .student_grade(f.course, f.student)
            .expect("Failed to compute grade"),
        80.0,
    );
}

#[test]
fn test_weighted_grade_scenario() {
    let mut f = fixture();
    f.book
        .record_score(f.student, f.quiz, 8.0)
        .expect("Failed to record quiz");
    f.book
        .record_score(f.student, f.exam, 90.0)
        .expect("Failed to record exam");

    let grade = f
        .book
        .student_grade(f.course, f.student)
        .expect("Failed to compute grade");
    assert_close(grade, 87.5);
}

#[test]
fn test_no_submissions_is_reported() {
    let f = fixture();

    assert_eq!(
        f.book.student_grade(f.course, f.student),
        Err(GradebookError::NoSubmissions {
            course: f.course,
            student: f.student
        })
    );
}

#[test]
fn test_policy_from_gradebook_and_override() {
    let mut f = fixture();
    f.book
        .record_score(f.student, f.quiz, 8.0)
        .expect("Failed to record quiz");

    assert_close(
        f.book
            .student_grade(f.course, f.student)
            .expect("Failed to compute grade"),
        80.0,
    );
    assert_close(
        f.book
            .student_grade_with(f.course, f.student, GradingPolicy::weighted().zero_filled())
            .expect("Failed to compute zero-filled grade"),
        20.0,
    );

    f.book.set_policy(GradingPolicy::points().zero_filled());
    assert_close(
        f.book
            .student_grade(f.course, f.student)
            .expect("Failed to compute points grade"),
        8.0 / 110.0 * 100.0,
    );
}

#[test]
fn test_remove_item_only_without_submissions() {
    let mut f = fixture();
    f.book
        .record_score(f.student, f.quiz, 8.0)
        .expect("Failed to record quiz");

    assert_eq!(
        f.book.remove_graded_item(f.quiz),
        Err(GradebookError::ItemHasSubmissions {
            item: f.quiz,
            count: 1
        })
    );

    let removed = f
        .book
        .remove_graded_item(f.exam)
        .expect("Failed to remove exam");
    assert_eq!(removed.name, "Exam");
    assert_eq!(
        f.book.item(f.exam),
        Err(GradebookError::UnknownItem { item: f.exam })
    );
    assert_eq!(
        f.book.record_score(f.student, f.exam, 1.0),
        Err(GradebookError::UnknownItem { item: f.exam })
    );
}

#[test]
fn test_clear_then_remove_item() {
    let mut f = fixture();
    f.book
        .record_score(f.student, f.quiz, 8.0)
        .expect("Failed to record quiz");

    assert_eq!(f.book.clear_score(f.student, f.quiz), Ok(8.0));
    assert!(f.book.score(f.student, f.quiz).is_none());
    assert!(f.book.remove_graded_item(f.quiz).is_ok());
}

#[test]
fn test_unenroll_discards_course_submissions() {
    let mut f = fixture();
    f.book
        .record_score(f.student, f.quiz, 8.0)
        .expect("Failed to record quiz");

    f.book
        .unenroll(f.course, f.student)
        .expect("Failed to unenroll");
    assert!(f.book.score(f.student, f.quiz).is_none());
    assert_eq!(
        f.book.unenroll(f.course, f.student),
        Err(GradebookError::NotEnrolled {
            course: f.course,
            student: f.student
        })
    );
}

#[test]
fn test_removing_student_from_roster_keeps_course_data() {
    let mut f = fixture();
    f.book
        .record_score(f.student, f.quiz, 8.0)
        .expect("Failed to record quiz");

    let removed = f.book.remove_student(f.student).expect("student existed");
    assert_eq!(removed.name, "Sam Carter");
    assert!(f.book.student(f.student).is_none());

    assert_eq!(f.book.score(f.student, f.quiz), Some(8.0));
    assert!(f.book.student_grade(f.course, f.student).is_ok());
}

#[test]
fn test_remove_course_keeps_students() {
    let mut f = fixture();
    let other = f.book.create_course("Chemistry");
    f.book.enroll(other, f.student).expect("Failed to enroll");

    f.book.remove_course(f.course).expect("Failed to remove course");

    assert!(f.book.student(f.student).is_some());
    assert_eq!(
        f.book.course(f.course).map(|c| c.id),
        Err(GradebookError::UnknownCourse { course: f.course })
    );
    assert!(f.book.item(f.quiz).is_err());
    assert!(f
        .book
        .course(other)
        .expect("other course survives")
        .is_enrolled(f.student));
}

#[test]
fn test_items_are_scoped_to_their_course() {
    let mut f = fixture();
    let other = f.book.create_course("Chemistry");
    let lab = f
        .book
        .add_graded_item(other, "Lab", 20.0, 1.0)
        .expect("Failed to add lab");

    // Enrolled in Physics only
    assert!(matches!(
        f.book.record_score(f.student, lab, 10.0),
        Err(GradebookError::NotEnrolled { course, .. }) if course == other
    ));
    assert_eq!(f.book.item(lab).map(|i| i.course), Ok(other));
}
