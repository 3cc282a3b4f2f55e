use std::fmt::Write;

use crate::store::CourseStore;

/// Render the collapsible course directory. The whole panel is rebuilt from
/// the store on every change; nothing here touches state.
pub fn render(store: &CourseStore) -> String {
    let mut out = String::from("Courses\n-------\n");

    if store.is_empty() {
        out.push_str("No courses found in database.\n");
        return out;
    }

    for (index, course) in store.courses().iter().enumerate() {
        let open = store.active_course_id() == Some(course.id);
        let marker = if open { '-' } else { '+' };
        let title = match course.code.as_deref() {
            Some(code) if !code.is_empty() => format!("{} {}", code, course.name),
            _ => course.name.clone(),
        };
        let _ = writeln!(out, " {} [{}] {}", marker, index + 1, title);

        if !open {
            continue;
        }

        out.push_str("       Course Introduction\n");
        if course.weeks.is_empty() {
            out.push_str("       (no weeks generated)\n");
        } else {
            for week in &course.weeks {
                let _ = writeln!(out, "       Week {}: {}", week.week_number, week.topic);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Week};

    fn course(id: i64, code: Option<&str>, name: &str, weeks: Vec<Week>) -> Course {
        Course {
            id,
            code: code.map(str::to_string),
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
            summary: String::new(),
            planned: false,
        }
    }

    #[test]
    fn empty_store_renders_empty_state() {
        let store = CourseStore::new();
        assert!(render(&store).contains("No courses found in database."));
    }

    #[test]
    fn only_the_expanded_course_lists_its_weeks() {
        let mut store = CourseStore::new();
        store.set_courses(vec![
            course(1, Some("CS101"), "Intro to CS", vec![week(11, 1, "Variables")]),
            course(2, None, "Biology", vec![week(21, 1, "Cells")]),
        ]);
        store.toggle_course(1);

        let out = render(&store);
        assert!(out.contains("Week 1: Variables"));
        assert!(!out.contains("Week 1: Cells"));
        assert!(out.contains(" - [1] CS101 Intro to CS"));
        assert!(out.contains(" + [2] Biology"));
    }

    #[test]
    fn expanded_course_without_weeks_shows_placeholder() {
        let mut store = CourseStore::new();
        store.set_courses(vec![course(1, None, "Empty", Vec::new())]);
        store.toggle_course(1);

        let out = render(&store);
        assert!(out.contains("Course Introduction"));
        assert!(out.contains("(no weeks generated)"));
    }
}
