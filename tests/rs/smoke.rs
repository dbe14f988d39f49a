//! Integration smoke tests for `gradebook`

use gradebook::{get_version, Gradebook};

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn empty_gradebook_has_no_courses_or_students() {
    let book = Gradebook::new();
    assert_eq!(book.courses().count(), 0);
    assert_eq!(book.students().count(), 0);
}

mod glob_import {
    use gradebook::*;

    fn parse_mode(text: &str) -> Result<AggregationMode, String> {
        text.parse()
    }

    #[test]
    fn glob_import_keeps_prelude_result() {
        assert_eq!(parse_mode("points"), Ok(AggregationMode::Points));
        let checked: error::Result<u8> = Ok(1);
        assert_eq!(checked, Ok(1));
    }
}
