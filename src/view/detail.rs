use std::fmt::Write;

use crate::models::{Course, SessionPlan, Week};

/// Course metadata view, with textual fallbacks for fields older records
/// may be missing.
pub fn intro(course: &Course) -> String {
    let mut out = String::new();
    let code = course.code.as_deref().filter(|c| !c.is_empty());
    let _ = writeln!(out, "{} ({})", course.name, code.unwrap_or("no code"));

    let count = |n: Option<u32>| n.map_or_else(|| "?".to_string(), |n| n.to_string());
    let _ = writeln!(
        out,
        "Duration: {} weeks | Sessions: {} per week",
        count(course.duration),
        count(course.sessions_per_week)
    );

    out.push('\n');
    let _ = writeln!(
        out,
        "Content\n  {}",
        course.content.as_deref().unwrap_or("No content defined.")
    );
    let _ = writeln!(
        out,
        "Objectives\n  {}",
        course.objectives.as_deref().unwrap_or("No objectives defined.")
    );
    let _ = writeln!(
        out,
        "Prerequisites\n  {}",
        course.prerequisites.as_deref().unwrap_or("None.")
    );

    out.push('\n');
    out.push_str("Select a week from the sidebar to view its summary and session plans.\n");
    out
}

pub fn week_header(week: &Week) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Week {}: {}", week.week_number, week.topic);
    let _ = writeln!(out, "\nWeekly summary\n  {}\n", week.summary);
    out
}

pub fn sessions(plans: &[SessionPlan]) -> String {
    let mut out = String::from("Detailed session plan\n");
    for (index, plan) in plans.iter().enumerate() {
        let _ = writeln!(out, "\nSession {}", index + 1);
        for block in &plan.blocks {
            let _ = writeln!(out, "  [{}] {}", block.label, block.topic);
            let _ = writeln!(out, "      {}", block.content);
        }
    }
    out
}

pub fn call_to_action() -> String {
    "No session plans have been generated for this week yet.\n\
     Type `plan` to have the AI draft minute-by-minute sessions.\n"
        .to_string()
}

pub fn loading_details() -> String {
    "Loading details...\n".to_string()
}

pub fn details_failed(message: &str) -> String {
    format!("Error loading sessions: {}\n", message)
}

pub fn generating() -> String {
    "AI is generating minute-by-minute plans...\n".to_string()
}

pub fn generation_failed(message: &str) -> String {
    format!("Generation failed: {}\n\n", message)
}

pub fn regenerate_hint() -> String {
    "Type `redo <guidance>` to regenerate these sessions with extra instructions.\n".to_string()
}

pub fn regenerating() -> String {
    "AI is regenerating sessions based on your guidance...\n".to_string()
}

pub fn regeneration_failed(message: &str) -> String {
    format!("Regeneration failed: {}\n", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeBlock;

    #[test]
    fn intro_substitutes_fallback_text() {
        let course = Course {
            id: 1,
            code: None,
            name: "Bare".to_string(),
            content: None,
            objectives: None,
            prerequisites: None,
            duration: None,
            sessions_per_week: None,
            weeks: Vec::new(),
        };

        let out = intro(&course);
        assert!(out.contains("Bare (no code)"));
        assert!(out.contains("Duration: ? weeks | Sessions: ? per week"));
        assert!(out.contains("No content defined."));
        assert!(out.contains("No objectives defined."));
        assert!(out.contains("None."));
    }

    #[test]
    fn sessions_render_blocks_in_order() {
        let plans = vec![SessionPlan {
            blocks: vec![
                TimeBlock {
                    label: "Minutes 00-15".to_string(),
                    topic: "Warm-up".to_string(),
                    content: "Quiz.".to_string(),
                },
                TimeBlock {
                    label: "Minutes 15-45".to_string(),
                    topic: "Lecture".to_string(),
                    content: "Core material.".to_string(),
                },
            ],
        }];

        let out = sessions(&plans);
        let warmup = out.find("Warm-up").unwrap();
        let lecture = out.find("Lecture").unwrap();
        assert!(warmup < lecture);
        assert!(out.contains("Session 1"));
    }
}
