use crate::models::{Course, Week};

/// In-memory cache of the course hierarchy plus the sidebar expansion state.
/// At most one course is expanded at a time, so expansion is an optional id
/// rather than a set. All mutation goes through these accessors.
#[derive(Debug, Default)]
pub struct CourseStore {
    courses: Vec<Course>,
    active_course_id: Option<i64>,
}

impl CourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached course list wholesale (the viewer refetches rather
    /// than patching). Expansion is kept only if the course still exists.
    pub fn set_courses(&mut self, courses: Vec<Course>) {
        self.courses = courses;
        if let Some(active) = self.active_course_id
            && !self.courses.iter().any(|c| c.id == active)
        {
            self.active_course_id = None;
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn active_course_id(&self) -> Option<i64> {
        self.active_course_id
    }

    /// Toggle a course header: clicking the expanded course collapses it,
    /// expanding another collapses the previous one. Returns whether the
    /// course ends up expanded.
    pub fn toggle_course(&mut self, id: i64) -> bool {
        self.active_course_id = if self.active_course_id == Some(id) {
            None
        } else {
            Some(id)
        };
        self.active_course_id.is_some()
    }

    pub fn course(&self, id: i64) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn course_by_index(&self, index: usize) -> Option<&Course> {
        self.courses.get(index)
    }

    pub fn week(&self, course_id: i64, week_id: i64) -> Option<&Week> {
        self.course(course_id)?.weeks.iter().find(|w| w.id == week_id)
    }

    /// Week lookup across all courses; week ids are unique within their scope.
    pub fn find_week(&self, week_id: i64) -> Option<&Week> {
        self.courses
            .iter()
            .flat_map(|c| c.weeks.iter())
            .find(|w| w.id == week_id)
    }

    /// The one client-initiated cache mutation: flip `planned` after the
    /// backend confirms generation, saving a refetch before re-render.
    pub fn mark_planned(&mut self, course_id: i64, week_id: i64) -> bool {
        let week = self
            .courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .and_then(|c| c.weeks.iter_mut().find(|w| w.id == week_id));
        match week {
            Some(week) => {
                week.planned = true;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, name: &str) -> Course {
        Course {
            id,
            code: None,
            name: name.to_string(),
            content: None,
            objectives: None,
            prerequisites: None,
            duration: None,
            sessions_per_week: None,
            weeks: Vec::new(),
        }
    }

    #[test]
    fn at_most_one_course_expanded() {
        let mut store = CourseStore::new();
        store.set_courses(vec![course(1, "A"), course(2, "B")]);

        assert!(store.toggle_course(1));
        assert_eq!(store.active_course_id(), Some(1));

        // Expanding B collapses A as a side effect.
        assert!(store.toggle_course(2));
        assert_eq!(store.active_course_id(), Some(2));

        // Clicking the expanded header collapses it.
        assert!(!store.toggle_course(2));
        assert_eq!(store.active_course_id(), None);
    }

    #[test]
    fn refetch_drops_expansion_of_a_vanished_course() {
        let mut store = CourseStore::new();
        store.set_courses(vec![course(1, "A"), course(2, "B")]);
        store.toggle_course(2);

        store.set_courses(vec![course(1, "A")]);
        assert_eq!(store.active_course_id(), None);

        store.set_courses(vec![course(1, "A"), course(3, "C")]);
        store.toggle_course(1);
        store.set_courses(vec![course(1, "A")]);
        assert_eq!(store.active_course_id(), Some(1));
    }
}
