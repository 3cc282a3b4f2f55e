use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the syllabus backend, without a trailing slash.
    pub base_url: String,
    /// Run against the in-memory mock store instead of the HTTP backend.
    pub use_mock: bool,
}

impl Config {
    pub fn new_from_env() -> Self {
        let base_url = env::var("SYLLABUS_API_BASE")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            base_url,
            use_mock: env::args().any(|a| a == "--mock"),
        }
    }
}
