use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::api::SyllabusApi;
use crate::error::AppError;
use crate::models::{NewCourseRequest, SessionPlan};
use crate::store::CourseStore;
use crate::view;

/// What the detail panel currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailView {
    Empty,
    Intro { course_id: i64 },
    Week { course_id: i64, week_id: i64 },
}

/// Per-week generation lifecycle. `Generating` and `Regenerating` only hold
/// while the matching request is in flight; a failed generation falls back to
/// `Unplanned`, a failed regeneration stays `Planned` because detail content
/// from the earlier generation still exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanPhase {
    Unplanned,
    Generating,
    Planned,
    Regenerating,
}

/// The controllers behind the sidebar and detail panels. Every user action
/// runs to completion (request, response, re-render) before the next one is
/// handled; the panels are rebuilt wholesale from this state after each
/// action.
pub struct App {
    api: Arc<dyn SyllabusApi>,
    store: CourseStore,
    view: DetailView,
    detail: String,
    /// Regeneration sub-region, rendered apart from the detail body so a
    /// failed regeneration never destroys already-rendered session detail.
    regen_note: Option<String>,
    generating: HashSet<i64>,
    regenerating: HashSet<i64>,
    /// Request token for the detail panel: bumped on every view change so a
    /// stale session fetch cannot overwrite a newer panel.
    detail_epoch: u64,
    /// Blocking indicator for the course-creation flow. Must be false again
    /// on every exit path.
    loader: bool,
}

impl App {
    pub fn new(api: Arc<dyn SyllabusApi>) -> Self {
        Self {
            api,
            store: CourseStore::new(),
            view: DetailView::Empty,
            detail: String::new(),
            regen_note: None,
            generating: HashSet::new(),
            regenerating: HashSet::new(),
            detail_epoch: 0,
            loader: false,
        }
    }

    pub fn store(&self) -> &CourseStore {
        &self.store
    }

    pub fn current_view(&self) -> DetailView {
        self.view
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn regen_note(&self) -> Option<&str> {
        self.regen_note.as_deref()
    }

    pub fn loader_visible(&self) -> bool {
        self.loader
    }

    pub fn phase(&self, week_id: i64) -> PlanPhase {
        if self.generating.contains(&week_id) {
            PlanPhase::Generating
        } else if self.regenerating.contains(&week_id) {
            PlanPhase::Regenerating
        } else if self.store.find_week(week_id).is_some_and(|w| w.planned) {
            PlanPhase::Planned
        } else {
            PlanPhase::Unplanned
        }
    }

    /// Both panels plus the regeneration sub-region as one text screen.
    pub fn screen(&self) -> String {
        let mut out = view::sidebar::render(&self.store);
        out.push('\n');
        out.push_str(&self.detail);

        if let DetailView::Week { week_id, .. } = self.view {
            if let Some(note) = &self.regen_note {
                out.push('\n');
                out.push_str(note);
            } else if self.phase(week_id) == PlanPhase::Planned {
                out.push('\n');
                out.push_str(&view::detail::regenerate_hint());
            }
        }
        out
    }

    /// Fetch the course list and re-render, auto-opening the first course the
    /// way the original viewer does on page load.
    pub async fn load_courses(&mut self) {
        match self.api.fetch_courses().await {
            Ok(courses) => {
                self.store.set_courses(courses);
                match self.store.courses().first().map(|c| c.id) {
                    Some(first) => {
                        if self.store.active_course_id().is_none() {
                            self.store.toggle_course(first);
                        }
                        self.show_intro(first);
                    }
                    None => {
                        self.detail_epoch += 1;
                        self.view = DetailView::Empty;
                        self.detail = String::new();
                        self.regen_note = None;
                    }
                }
            }
            Err(e) => {
                error!("error fetching courses: {}", e);
                self.detail_epoch += 1;
                self.view = DetailView::Empty;
                self.detail = format!("Error loading data: {}\n", e.user_message());
                self.regen_note = None;
            }
        }
    }

    pub fn toggle_course(&mut self, course_id: i64) {
        self.store.toggle_course(course_id);
    }

    pub fn show_intro(&mut self, course_id: i64) {
        self.detail_epoch += 1;
        self.regen_note = None;
        match self.store.course(course_id) {
            Some(course) => {
                self.view = DetailView::Intro { course_id };
                self.detail = view::detail::intro(course);
            }
            None => {
                self.view = DetailView::Empty;
                self.detail = view::missing("course");
            }
        }
    }

    pub async fn show_week(&mut self, course_id: i64, week_id: i64) {
        if let Some(token) = self.begin_week_detail(course_id, week_id) {
            let result = self.api.fetch_week_sessions(week_id).await;
            self.apply_week_detail(token, result);
        }
    }

    /// Render the week header plus either the call-to-action (unplanned) or
    /// a loading stub, and return a request token when session detail must be
    /// fetched. A planned week fetches on every render; an unplanned week
    /// never does.
    pub fn begin_week_detail(&mut self, course_id: i64, week_id: i64) -> Option<u64> {
        self.detail_epoch += 1;
        self.regen_note = None;

        let Some(week) = self.store.week(course_id, week_id) else {
            self.view = DetailView::Empty;
            self.detail = view::missing("week");
            return None;
        };

        self.view = DetailView::Week { course_id, week_id };
        let mut body = view::detail::week_header(week);
        if week.planned {
            body.push_str(&view::detail::loading_details());
            self.detail = body;
            Some(self.detail_epoch)
        } else {
            body.push_str(&view::detail::call_to_action());
            self.detail = body;
            None
        }
    }

    /// Apply a completed session-detail fetch. A stale response (the panel
    /// has moved on since the request started) is dropped. Returns whether
    /// the response was applied.
    pub fn apply_week_detail(
        &mut self,
        token: u64,
        result: Result<Vec<SessionPlan>, AppError>,
    ) -> bool {
        if token != self.detail_epoch {
            debug!("dropping stale session-detail response");
            return false;
        }
        let DetailView::Week { course_id, week_id } = self.view else {
            return false;
        };
        let Some(week) = self.store.week(course_id, week_id) else {
            return false;
        };

        let mut body = view::detail::week_header(week);
        match result {
            Ok(plans) => body.push_str(&view::detail::sessions(&plans)),
            Err(e) => {
                error!("error loading sessions for week {}: {}", week_id, e);
                body.push_str(&view::detail::details_failed(&e.user_message()));
            }
        }
        self.detail = body;
        true
    }

    /// unplanned -> generating -> planned on success, back to unplanned on
    /// failure with the call-to-action restored for retry.
    pub async fn generate(&mut self, course_id: i64, week_id: i64) {
        match self.phase(week_id) {
            PlanPhase::Unplanned => {}
            other => {
                warn!("generate ignored for week {} in phase {:?}", week_id, other);
                return;
            }
        }
        let Some(week) = self.store.week(course_id, week_id) else {
            self.detail = view::missing("week");
            return;
        };
        let header = view::detail::week_header(week);

        self.generating.insert(week_id);
        self.detail = format!("{}{}", header, view::detail::generating());

        let result = self.api.generate_week_sessions(week_id).await;
        self.generating.remove(&week_id);

        match result {
            Ok(()) => {
                // Flip the cached flag instead of refetching the whole list.
                self.store.mark_planned(course_id, week_id);
                self.show_week(course_id, week_id).await;
            }
            Err(e) => {
                error!("generation failed for week {}: {}", week_id, e);
                self.detail = format!(
                    "{}{}{}",
                    header,
                    view::detail::generation_failed(&e.user_message()),
                    view::detail::call_to_action()
                );
            }
        }
    }

    /// planned -> regenerating -> planned. The loading state and any error
    /// stay confined to the sub-region; existing detail is only replaced
    /// after a successful refetch.
    pub async fn regenerate(&mut self, course_id: i64, week_id: i64, prompt: &str) {
        match self.phase(week_id) {
            PlanPhase::Planned => {}
            other => {
                warn!(
                    "regenerate ignored for week {} in phase {:?}",
                    week_id, other
                );
                return;
            }
        }

        self.regenerating.insert(week_id);
        self.regen_note = Some(view::detail::regenerating());

        let result = self.api.regenerate_week_sessions(week_id, prompt).await;
        self.regenerating.remove(&week_id);

        match result {
            Ok(()) => {
                self.regen_note = None;
                self.show_week(course_id, week_id).await;
            }
            Err(e) => {
                error!("regeneration failed for week {}: {}", week_id, e);
                self.regen_note = Some(view::detail::regeneration_failed(&e.user_message()));
            }
        }
    }

    /// Submit the creation form. On success, "navigate" to the viewer by
    /// refetching the course list. On failure, the caller keeps the draft
    /// for retry. The blocking loader is cleared on both paths.
    pub async fn submit_course(&mut self, draft: &NewCourseRequest) -> Result<(), AppError> {
        self.loader = true;
        let result = self.api.create_course(draft).await;
        self.loader = false;

        match result {
            Ok(()) => {
                info!("course generated successfully, loading viewer");
                self.load_courses().await;
                Ok(())
            }
            Err(e) => {
                error!("course creation failed: {}", e);
                Err(e)
            }
        }
    }
}
