use serde::{Deserialize, Deserializer, Serialize};

use super::week::Week;

/// A course as served by the backend. Metadata fields are optional because
/// older records may predate the structured generation flow; the viewer
/// substitutes fallback text when they are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub objectives: Option<String>,
    #[serde(default)]
    pub prerequisites: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub duration: Option<u32>,
    #[serde(
        rename = "sessionsPerWeek",
        default,
        deserialize_with = "lenient_count"
    )]
    pub sessions_per_week: Option<u32>,
    #[serde(default)]
    pub weeks: Vec<Week>,
}

/// The nine creation-form fields, collected as entered. Counts stay strings
/// here because the form posts them as text and the backend owns validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourseRequest {
    pub teacher_email: String,
    pub course_code: String,
    pub course_name: String,
    pub content: String,
    pub objectives: String,
    pub prerequisites: String,
    pub duration: String,
    pub sessions_per_week: String,
    pub homework: String,
}

// duration / sessionsPerWeek arrive as a number from the real backend but as
// the original form string from the mock store; accept both.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_counts_from_numbers_and_strings() {
        let course: Course = serde_json::from_str(
            r#"{"id": 1, "name": "Intro", "duration": 8, "sessionsPerWeek": "2"}"#,
        )
        .unwrap();
        assert_eq!(course.duration, Some(8));
        assert_eq!(course.sessions_per_week, Some(2));
        assert!(course.weeks.is_empty());
    }

    #[test]
    fn missing_metadata_decodes_to_none() {
        let course: Course = serde_json::from_str(r#"{"id": 2, "name": "Bare"}"#).unwrap();
        assert_eq!(course.code, None);
        assert_eq!(course.duration, None);
        assert_eq!(course.sessions_per_week, None);
    }
}
