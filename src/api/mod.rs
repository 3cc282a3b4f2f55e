pub mod dto;
pub mod mock;

use async_trait::async_trait;
use reqwest::{Client, multipart};

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Course, NewCourseRequest, SessionPlan};

pub use mock::MockSyllabusApi;

/// The backend surface the client consumes. Everything the panels do goes
/// through this seam, so tests and the offline mode can swap the transport.
#[async_trait]
pub trait SyllabusApi: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError>;
    async fn create_course(&self, draft: &NewCourseRequest) -> Result<(), AppError>;
    async fn fetch_week_sessions(&self, week_id: i64) -> Result<Vec<SessionPlan>, AppError>;
    async fn generate_week_sessions(&self, week_id: i64) -> Result<(), AppError>;
    async fn regenerate_week_sessions(&self, week_id: i64, prompt: &str)
    -> Result<(), AppError>;
}

pub struct HttpSyllabusApi {
    client: Client,
    base_url: String,
}

impl HttpSyllabusApi {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fold a non-2xx response into an error, surfacing the server's own
    /// `error`/`message` text when the body carries one.
    async fn error_from_response(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed: dto::ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();
        let message = parsed
            .error
            .or(parsed.message)
            .unwrap_or_else(|| status.to_string());
        AppError::Api {
            status: status.as_u16(),
            message,
        }
    }

    async fn post_expect_ok<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl SyllabusApi for HttpSyllabusApi {
    async fn ping(&self) -> Result<(), AppError> {
        let response = self.client.get(self.url("/api/")).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError> {
        let response = self
            .client
            .get(self.url("/api/get-all-courses"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.text().await.unwrap_or_default();
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("failed to parse course list: {}", e);
            AppError::Decode(format!("course list: {}", e))
        })
    }

    async fn create_course(&self, draft: &NewCourseRequest) -> Result<(), AppError> {
        // The original creation form posts multipart fields, not JSON.
        let form = multipart::Form::new()
            .text("teacherEmail", draft.teacher_email.clone())
            .text("courseCode", draft.course_code.clone())
            .text("courseName", draft.course_name.clone())
            .text("content", draft.content.clone())
            .text("objectives", draft.objectives.clone())
            .text("prerequisites", draft.prerequisites.clone())
            .text("duration", draft.duration.clone())
            .text("sessionsPerWeek", draft.sessions_per_week.clone())
            .text("homework", draft.homework.clone());

        let response = self
            .client
            .post(self.url("/api/generate-course-structure/"))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        // Success needs no body; the caller navigates to the viewer.
        Ok(())
    }

    async fn fetch_week_sessions(&self, week_id: i64) -> Result<Vec<SessionPlan>, AppError> {
        let response = self
            .client
            .post(self.url("/api/get-week-sessions"))
            .json(&dto::WeekSessionsRequest { week_id })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: dto::SessionsResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("failed to parse sessions for week {}: {}", week_id, e);
            AppError::Decode(format!("week sessions: {}", e))
        })?;

        parsed.sessions.into_iter().map(dto::parse_session).collect()
    }

    async fn generate_week_sessions(&self, week_id: i64) -> Result<(), AppError> {
        self.post_expect_ok(
            "/api/generate-week-sessions",
            &dto::WeekSessionsRequest { week_id },
        )
        .await
    }

    async fn regenerate_week_sessions(
        &self,
        week_id: i64,
        prompt: &str,
    ) -> Result<(), AppError> {
        self.post_expect_ok(
            "/api/regenerate-week-sessions",
            &dto::RegenerateRequest {
                week_id,
                prompt: prompt.to_string(),
            },
        )
        .await
    }
}
