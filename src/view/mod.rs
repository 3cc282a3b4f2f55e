pub mod detail;
pub mod sidebar;

/// Placeholder for a render target that should exist but does not (a course
/// or week that vanished from the cache). Asserts in debug builds; release
/// builds degrade to a visible placeholder instead of a silent no-op.
pub fn missing(what: &str) -> String {
    debug_assert!(false, "render target missing: {}", what);
    format!("[{} unavailable]\n", what)
}

#[cfg(all(test, debug_assertions))]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "render target missing")]
    fn missing_target_is_loud_in_debug_builds() {
        missing("course");
    }
}
