use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::{Course, NewCourseRequest, SessionPlan, Week};

use super::SyllabusApi;
use super::dto;

const COURSES_KEY: &str = "syllabus_courses";

/// Offline stand-in for the backend, mirroring the throwaway local-storage
/// variant of the original app: the whole course array lives JSON-encoded
/// under a single key and is rewritten wholesale on every mutation, and ids
/// are timestamp-derived rather than database keys. Also serves as the test
/// double; every call is recorded so tests can count fetches.
pub struct MockSyllabusApi {
    store: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
    fail_next: Mutex<Option<String>>,
}

impl MockSyllabusApi {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
        }
    }

    /// A ready-made course so `--mock` starts with something to browse.
    pub fn with_sample_course() -> Self {
        let mock = Self::new();
        let id = Utc::now().timestamp_millis();
        mock.seed_courses(vec![Course {
            id,
            code: Some("CS101".to_string()),
            name: "Introduction to Computer Science".to_string(),
            content: Some("Programs, data, algorithms".to_string()),
            objectives: Some("Read and write small programs with confidence.".to_string()),
            prerequisites: Some("None.".to_string()),
            duration: Some(3),
            sessions_per_week: Some(1),
            weeks: (1..=3)
                .map(|n| Week {
                    id: id + n as i64,
                    week_number: n,
                    topic: format!("Programs, data, algorithms (part {})", n),
                    summary: format!(
                        "Week {} develops the core material with guided practice.",
                        n
                    ),
                    planned: false,
                })
                .collect(),
        }]);
        mock
    }

    pub fn seed_courses(&self, courses: Vec<Course>) {
        self.save_courses(&courses);
    }

    /// Make the next mutating call (create/generate/regenerate) fail with the
    /// given server-reported message.
    pub fn fail_next(&self, message: &str) {
        *self.lock(&self.fail_next) = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock(&self.calls).clone()
    }

    fn lock<'a, T>(&self, mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: String) {
        self.lock(&self.calls).push(call);
    }

    fn take_failure(&self) -> Option<AppError> {
        self.lock(&self.fail_next).take().map(|message| AppError::Api {
            status: 500,
            message,
        })
    }

    fn load_courses(&self) -> Vec<Course> {
        self.lock(&self.store)
            .get(COURSES_KEY)
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    fn save_courses(&self, courses: &[Course]) {
        let raw = serde_json::to_string(courses).unwrap_or_else(|_| "[]".to_string());
        self.lock(&self.store).insert(COURSES_KEY.to_string(), raw);
    }

    fn sessions_key(week_id: i64) -> String {
        format!("week_sessions:{}", week_id)
    }

    fn canned_sessions(week: &Week, per_week: u32, guidance: Option<&str>) -> dto::SessionsResponse {
        let note = guidance
            .map(|p| format!(" Revised per guidance: {}.", p))
            .unwrap_or_default();
        let sessions = (1..=per_week.max(1))
            .map(|n| {
                let mut minutes = serde_json::Map::new();
                minutes.insert(
                    "Minutes 00-15".to_string(),
                    serde_json::json!({
                        "topic": "Warm-up",
                        "content": format!("Recall questions leading into {}.{}", week.topic, note),
                    }),
                );
                minutes.insert(
                    "Minutes 15-45".to_string(),
                    serde_json::json!({
                        "topic": week.topic.clone(),
                        "content": format!("Core teaching block for session {}.{}", n, note),
                    }),
                );
                minutes.insert(
                    "Minutes 45-60".to_string(),
                    serde_json::json!({
                        "topic": "Practice",
                        "content": format!("Exercises and wrap-up for week {}.{}", week.week_number, note),
                    }),
                );
                dto::SessionDto {
                    minutes_data: minutes,
                }
            })
            .collect();
        dto::SessionsResponse { sessions }
    }

    fn write_sessions(&self, week_id: i64, sessions: &dto::SessionsResponse) {
        if let Ok(raw) = serde_json::to_string(sessions) {
            self.lock(&self.store).insert(Self::sessions_key(week_id), raw);
        }
    }

    /// Regenerates session data for `week_id` and flips the stored week to
    /// planned. Fails like the real backend when the week does not exist.
    fn plan_week(&self, week_id: i64, guidance: Option<&str>) -> Result<(), AppError> {
        let mut courses = self.load_courses();
        let Some((per_week, week)) = courses.iter_mut().find_map(|c| {
            let per_week = c.sessions_per_week.unwrap_or(1);
            c.weeks
                .iter_mut()
                .find(|w| w.id == week_id)
                .map(|w| (per_week, w))
        }) else {
            return Err(AppError::Api {
                status: 404,
                message: "Week not found".to_string(),
            });
        };

        let sessions = Self::canned_sessions(week, per_week, guidance);
        week.planned = true;
        self.write_sessions(week_id, &sessions);
        self.save_courses(&courses);
        Ok(())
    }
}

impl Default for MockSyllabusApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SyllabusApi for MockSyllabusApi {
    async fn ping(&self) -> Result<(), AppError> {
        self.record("ping".to_string());
        Ok(())
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError> {
        self.record("fetch_courses".to_string());
        Ok(self.load_courses())
    }

    async fn create_course(&self, draft: &NewCourseRequest) -> Result<(), AppError> {
        self.record("create_course".to_string());
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        // Timestamp id: a simulation artifact standing in for a database key.
        let id = Utc::now().timestamp_millis();
        let seed = draft
            .content
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Core concepts")
            .to_string();
        let weeks = draft.duration.trim().parse::<u32>().unwrap_or(3);

        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };

        let course = Course {
            id,
            code: non_empty(&draft.course_code),
            name: draft.course_name.clone(),
            content: non_empty(&draft.content),
            objectives: non_empty(&draft.objectives),
            prerequisites: non_empty(&draft.prerequisites),
            duration: draft.duration.trim().parse().ok(),
            sessions_per_week: draft.sessions_per_week.trim().parse().ok(),
            weeks: (1..=weeks)
                .map(|n| Week {
                    id: id + n as i64,
                    week_number: n,
                    topic: format!("{} (part {})", seed, n),
                    summary: format!(
                        "Week {} develops {} with guided practice and discussion.",
                        n, seed
                    ),
                    planned: false,
                })
                .collect(),
        };

        let mut courses = self.load_courses();
        courses.push(course);
        self.save_courses(&courses);
        Ok(())
    }

    async fn fetch_week_sessions(&self, week_id: i64) -> Result<Vec<SessionPlan>, AppError> {
        self.record(format!("fetch_week_sessions:{}", week_id));
        let raw = self
            .lock(&self.store)
            .get(&Self::sessions_key(week_id))
            .cloned();
        let Some(raw) = raw else {
            return Err(AppError::Api {
                status: 404,
                message: "Sessions not found for this week".to_string(),
            });
        };

        let parsed: dto::SessionsResponse = serde_json::from_str(&raw)
            .map_err(|e| AppError::Decode(format!("stored sessions: {}", e)))?;
        parsed.sessions.into_iter().map(dto::parse_session).collect()
    }

    async fn generate_week_sessions(&self, week_id: i64) -> Result<(), AppError> {
        self.record(format!("generate_week_sessions:{}", week_id));
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.plan_week(week_id, None)
    }

    async fn regenerate_week_sessions(&self, week_id: i64, prompt: &str) -> Result<(), AppError> {
        self.record(format!("regenerate_week_sessions:{}", week_id));
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        // Regeneration presumes a prior plan; the stored sessions must exist.
        if !self
            .lock(&self.store)
            .contains_key(&Self::sessions_key(week_id))
        {
            return Err(AppError::Api {
                status: 400,
                message: "Week has not been planned yet".to_string(),
            });
        }
        self.plan_week(week_id, Some(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SyllabusApi;

    fn draft() -> NewCourseRequest {
        NewCourseRequest {
            teacher_email: "t@example.edu".to_string(),
            course_code: "BIO8".to_string(),
            course_name: "Intro to Biology".to_string(),
            content: "Cells, genetics, ecology".to_string(),
            objectives: "Understand living systems.".to_string(),
            prerequisites: "".to_string(),
            duration: "2".to_string(),
            sessions_per_week: "2".to_string(),
            homework: "Weekly reading".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_generate_round_trip() {
        let mock = MockSyllabusApi::new();
        mock.create_course(&draft()).await.unwrap();

        let courses = mock.fetch_courses().await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].weeks.len(), 2);
        assert!(courses[0].weeks.iter().all(|w| !w.planned));

        let week_id = courses[0].weeks[0].id;
        mock.generate_week_sessions(week_id).await.unwrap();

        let courses = mock.fetch_courses().await.unwrap();
        assert!(courses[0].weeks[0].planned);
        assert!(!courses[0].weeks[1].planned);

        let plans = mock.fetch_week_sessions(week_id).await.unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].blocks[0].label, "Minutes 00-15");
    }

    #[tokio::test]
    async fn unplanned_week_has_no_sessions() {
        let mock = MockSyllabusApi::new();
        mock.create_course(&draft()).await.unwrap();
        let courses = mock.fetch_courses().await.unwrap();

        let err = mock
            .fetch_week_sessions(courses[0].weeks[0].id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn regenerate_requires_a_prior_plan() {
        let mock = MockSyllabusApi::new();
        mock.create_course(&draft()).await.unwrap();
        let courses = mock.fetch_courses().await.unwrap();
        let week_id = courses[0].weeks[0].id;

        let err = mock
            .regenerate_week_sessions(week_id, "shorter lectures")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Api { status: 400, .. }));

        mock.generate_week_sessions(week_id).await.unwrap();
        mock.regenerate_week_sessions(week_id, "shorter lectures")
            .await
            .unwrap();
        let plans = mock.fetch_week_sessions(week_id).await.unwrap();
        assert!(plans[0].blocks[0].content.contains("shorter lectures"));
    }
}
