use std::sync::Arc;

use syllabus_console::api::MockSyllabusApi;
use syllabus_console::app::App;
use syllabus_console::models::{Course, Week};

fn course(id: i64, name: &str, weeks: Vec<Week>) -> Course {
    Course {
        id,
        code: None,
        name: name.to_string(),
        content: None,
        objectives: None,
        prerequisites: None,
        duration: None,
        sessions_per_week: None,
        weeks,
    }
}

fn week(id: i64, number: u32, topic: &str) -> Week {
    Week {
        id,
        week_number: number,
        topic: topic.to_string(),
        summary: format!("Summary of {}.", topic),
        planned: false,
    }
}

fn two_course_mock() -> Arc<MockSyllabusApi> {
    let mock = Arc::new(MockSyllabusApi::new());
    mock.seed_courses(vec![
        course(1, "Intro to CS", vec![week(11, 1, "Variables")]),
        course(2, "Biology", vec![week(21, 1, "Cells")]),
    ]);
    mock
}

#[tokio::test]
async fn load_auto_expands_the_first_course() {
    let mock = two_course_mock();
    let mut app = App::new(mock.clone());
    app.load_courses().await;

    assert_eq!(app.store().active_course_id(), Some(1));
    let screen = app.screen();
    assert!(screen.contains("Week 1: Variables"));
    assert!(!screen.contains("Week 1: Cells"));
    // The detail panel starts on the first course's introduction.
    assert!(app.detail().contains("Intro to CS"));
}

#[tokio::test]
async fn expanding_another_course_collapses_the_first() {
    let mock = two_course_mock();
    let mut app = App::new(mock.clone());
    app.load_courses().await;

    app.toggle_course(2);
    assert_eq!(app.store().active_course_id(), Some(2));
    let screen = app.screen();
    assert!(screen.contains("Week 1: Cells"));
    assert!(!screen.contains("Week 1: Variables"));

    // Clicking the expanded header again collapses everything.
    app.toggle_course(2);
    assert_eq!(app.store().active_course_id(), None);
    assert!(!app.screen().contains("Week 1: Cells"));
}

#[tokio::test]
async fn selecting_entries_does_not_refetch_the_course_list() {
    let mock = two_course_mock();
    let mut app = App::new(mock.clone());
    app.load_courses().await;

    app.show_intro(2);
    app.show_week(1, 11).await;
    app.toggle_course(1);

    let course_fetches = mock
        .calls()
        .iter()
        .filter(|c| *c == "fetch_courses")
        .count();
    assert_eq!(course_fetches, 1);
}

#[tokio::test]
async fn empty_backend_renders_the_empty_state() {
    let mock = Arc::new(MockSyllabusApi::new());
    let mut app = App::new(mock.clone());
    app.load_courses().await;

    assert!(app.store().is_empty());
    assert!(app.screen().contains("No courses found in database."));
}
