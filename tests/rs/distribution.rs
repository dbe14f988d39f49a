//! Integration tests for course distributions

use gradebook::{CourseId, GradebookError, Gradebook, GradingPolicy, ItemId, Student, StudentId};

/// Course with a single 100-point exam (weight 1) and the given students enrolled
fn course_with_exam(book: &mut Gradebook, ids: &[u64]) -> (CourseId, ItemId) {
    let course = book.create_course("Statistics");
    let exam = book
        .add_graded_item(course, "Exam", 100.0, 1.0)
        .expect("Failed to add exam");
    for &id in ids {
        book.add_student(Student::new(StudentId(id), format!("Student {id}")))
            .expect("Failed to add student");
        book.enroll(course, StudentId(id)).expect("Failed to enroll");
    }
    (course, exam)
}

fn ranked_ids(book: &Gradebook, course: CourseId) -> Vec<u64> {
    book.course_distribution(course)
        .expect("Failed to build distribution")
        .iter()
        .map(|s| s.student.0)
        .collect()
}

#[test]
fn test_ordered_by_percentage_descending() {
    let mut book = Gradebook::new();
    let (course, exam) = course_with_exam(&mut book, &[1, 2, 3]);
    book.record_score(StudentId(1), exam, 55.0).expect("score");
    book.record_score(StudentId(2), exam, 91.0).expect("score");
    book.record_score(StudentId(3), exam, 78.5).expect("score");

    assert_eq!(ranked_ids(&book, course), vec![2, 3, 1]);
}

#[test]
fn test_ties_broken_by_ascending_student_id() {
    let mut book = Gradebook::new();
    let (course, exam) = course_with_exam(&mut book, &[30, 4, 12, 7]);
    book.record_score(StudentId(30), exam, 70.0).expect("score");
    book.record_score(StudentId(4), exam, 70.0).expect("score");
    book.record_score(StudentId(12), exam, 85.0).expect("score");
    book.record_score(StudentId(7), exam, 70.0).expect("score");

    let distribution = book
        .course_distribution(course)
        .expect("Failed to build distribution");
    let standings: Vec<(u64, f64)> = distribution
        .iter()
        .map(|s| (s.student.0, s.percentage))
        .collect();

    assert_eq!(
        standings,
        vec![(12, 85.0), (4, 70.0), (7, 70.0), (30, 70.0)]
    );
}

#[test]
fn test_distribution_is_restartable() {
    let mut book = Gradebook::new();
    let (course, exam) = course_with_exam(&mut book, &[1, 2]);
    book.record_score(StudentId(1), exam, 40.0).expect("score");
    book.record_score(StudentId(2), exam, 60.0).expect("score");

    let distribution = book
        .course_distribution(course)
        .expect("Failed to build distribution");
    let first: Vec<_> = distribution.iter().copied().collect();
    let second: Vec<_> = (&distribution).into_iter().copied().collect();

    assert_eq!(first, second);
    assert_eq!(distribution.len(), 2);
    assert_eq!(distribution.course(), course);
}

#[test]
fn test_students_without_grades_are_left_out() {
    let mut book = Gradebook::new();
    let (course, exam) = course_with_exam(&mut book, &[1, 2, 3]);
    book.record_score(StudentId(2), exam, 88.0).expect("score");

    assert_eq!(ranked_ids(&book, course), vec![2]);
}

#[test]
fn test_empty_course_distribution() {
    let mut book = Gradebook::new();
    let (course, _) = course_with_exam(&mut book, &[]);

    let distribution = book
        .course_distribution(course)
        .expect("Failed to build distribution");
    assert!(distribution.is_empty());
    assert!(distribution.summary().is_none());
}

#[test]
fn test_distribution_uses_requested_policy() {
    let mut book = Gradebook::new();
    let course = book.create_course("History");
    let essay = book
        .add_graded_item(course, "Essay", 50.0, 1.0)
        .expect("Failed to add essay");
    let project = book
        .add_graded_item(course, "Project", 50.0, 1.0)
        .expect("Failed to add project");
    for id in [1, 2] {
        book.add_student(Student::new(StudentId(id), format!("Student {id}")))
            .expect("Failed to add student");
        book.enroll(course, StudentId(id)).expect("Failed to enroll");
    }
    // Student 1 submitted only the essay, perfectly; student 2 did both at 80%
    book.record_score(StudentId(1), essay, 50.0).expect("score");
    book.record_score(StudentId(2), essay, 40.0).expect("score");
    book.record_score(StudentId(2), project, 40.0).expect("score");

    assert_eq!(ranked_ids(&book, course), vec![1, 2]);

    let zero_filled = book
        .course_distribution_with(course, GradingPolicy::weighted().zero_filled())
        .expect("Failed to build distribution");
    let ids: Vec<u64> = zero_filled.iter().map(|s| s.student.0).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(zero_filled.policy(), GradingPolicy::weighted().zero_filled());
}

#[test]
fn test_summary_statistics() {
    let mut book = Gradebook::new();
    let (course, exam) = course_with_exam(&mut book, &[1, 2, 3]);
    book.record_score(StudentId(1), exam, 60.0).expect("score");
    book.record_score(StudentId(2), exam, 90.0).expect("score");
    book.record_score(StudentId(3), exam, 75.0).expect("score");

    let summary = book
        .course_distribution(course)
        .expect("Failed to build distribution")
        .summary()
        .expect("non-empty distribution");

    assert_eq!(summary.count, 3);
    assert!((summary.mean - 75.0).abs() < 1e-9);
    assert!((summary.median - 75.0).abs() < 1e-9);
    assert!((summary.min - 60.0).abs() < 1e-9);
    assert!((summary.max - 90.0).abs() < 1e-9);
}

#[test]
fn test_unknown_course() {
    let mut book = Gradebook::new();
    let course = book.create_course("Temporary");
    book.remove_course(course).expect("Failed to remove course");

    assert!(matches!(
        book.course_distribution(course),
        Err(GradebookError::UnknownCourse { .. })
    ));
}
