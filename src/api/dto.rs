use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{SessionPlan, TimeBlock};

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekSessionsRequest {
    pub week_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegenerateRequest {
    pub week_id: i64,
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionDto>,
}

/// Wire shape of one generated session: a JSON object keyed by time-range
/// label. Label order is document order (serde_json is built with
/// `preserve_order`), which is the order the plan should be taught in.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionDto {
    pub minutes_data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct MinuteEntry {
    topic: String,
    content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn parse_session(dto: SessionDto) -> Result<SessionPlan, AppError> {
    let mut blocks = Vec::with_capacity(dto.minutes_data.len());
    for (label, value) in dto.minutes_data {
        let entry: MinuteEntry = serde_json::from_value(value)
            .map_err(|e| AppError::Decode(format!("minutes_data[{}]: {}", label, e)))?;
        blocks.push(TimeBlock {
            label,
            topic: entry.topic,
            content: entry.content,
        });
    }
    Ok(SessionPlan { blocks })
}
