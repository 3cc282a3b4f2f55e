use serde::{Deserialize, Serialize};

/// One time-block of a session plan: a label such as "Minutes 00-15" paired
/// with the topic and teaching content for that slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub label: String,
    pub topic: String,
    pub content: String,
}

/// A generated session plan for a week: time-blocks in the order the backend
/// emitted them.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub blocks: Vec<TimeBlock>,
}
