use chrono::NaiveDate;
use taskboard_core::{
    validate_description, validate_due_date, validate_task, validate_title, TaskPatch,
    TaskValidationError,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[test]
fn title_accepts_bounds_and_rejects_outside() {
    assert!(validate_title("Valid title").is_ok());
    assert!(validate_title("abc").is_ok());
    assert!(validate_title(&"a".repeat(200)).is_ok());

    assert!(matches!(
        validate_title(""),
        Err(TaskValidationError::TitleTooShort { min: 3 })
    ));
    assert!(validate_title("   ").is_err());
    assert!(validate_title("ab").is_err());
    assert!(matches!(
        validate_title(&"a".repeat(201)),
        Err(TaskValidationError::TitleTooLong { max: 200 })
    ));
}

#[test]
fn title_minimum_ignores_padding_but_counts_characters() {
    assert!(validate_title("  ab  ").is_err());
    // Three multi-byte characters are still three characters.
    assert!(validate_title("äöü").is_ok());
    assert!(validate_title(&"é".repeat(200)).is_ok());
}

#[test]
fn description_is_optional_and_capped() {
    assert!(validate_description(None).is_ok());
    assert!(validate_description(Some("")).is_ok());
    assert!(validate_description(Some("This is a valid description")).is_ok());
    assert!(validate_description(Some(&"a".repeat(1000))).is_ok());

    let err = validate_description(Some(&"a".repeat(1001))).unwrap_err();
    assert_eq!(err.field(), "description");
    assert_eq!(err.to_string(), "description must not exceed 1000 characters");
}

#[test]
fn due_date_must_not_be_in_the_past() {
    let today = today();
    assert!(validate_due_date(None, today).is_ok());
    assert!(validate_due_date(Some(today), today).is_ok());
    assert!(validate_due_date(today.succ_opt(), today).is_ok());

    let err = validate_due_date(today.pred_opt(), today).unwrap_err();
    assert_eq!(err.field(), "dueDate");
    assert_eq!(err.to_string(), "due date must be today or in the future");
}

#[test]
fn validate_task_checks_only_present_fields() {
    let today = today();
    assert!(validate_task(&TaskPatch::default(), today).is_ok());

    let title_only = TaskPatch {
        title: Some("Valid task title"),
        ..TaskPatch::default()
    };
    assert!(validate_task(&title_only, today).is_ok());

    let complete = TaskPatch {
        title: Some("Valid task title"),
        description: Some(Some("Valid description")),
        due_date: Some(today.succ_opt()),
    };
    assert!(validate_task(&complete, today).is_ok());
}

#[test]
fn validate_task_reports_first_failing_field() {
    let today = today();
    let long = "a".repeat(1001);

    let bad_title = TaskPatch {
        title: Some("ab"),
        description: Some(Some(long.as_str())),
        ..TaskPatch::default()
    };
    assert_eq!(validate_task(&bad_title, today).unwrap_err().field(), "title");

    let bad_description = TaskPatch {
        title: Some("Valid task title"),
        description: Some(Some(long.as_str())),
        ..TaskPatch::default()
    };
    assert_eq!(
        validate_task(&bad_description, today).unwrap_err().field(),
        "description"
    );

    let bad_due = TaskPatch {
        title: Some("Valid task title"),
        due_date: Some(today.pred_opt()),
        ..TaskPatch::default()
    };
    assert_eq!(validate_task(&bad_due, today).unwrap_err().field(), "dueDate");
}
