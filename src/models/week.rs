use serde::{Deserialize, Serialize};

/// One scheduled week within a course. `planned` is owned by the backend:
/// true exactly when detailed session data exists server-side. The client
/// only ever flips it to true locally after a successful generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Week {
    pub id: i64,
    pub week_number: u32,
    pub topic: String,
    pub summary: String,
    #[serde(default)]
    pub planned: bool,
}
