use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::app::{App, DetailView};
use crate::models::NewCourseRequest;

const HELP: &str = "Commands:
  open <n>         expand or collapse course n
  intro <n>        show course n's introduction
  week <n> <m>     show week m of course n
  plan             generate session plans for the current week
  redo <guidance>  regenerate the current week's sessions
  new              create a course (prompts for each field)
  retry            resubmit the last course form
  refresh          refetch the course list
  help             show this message
  quit             exit";

enum Command {
    Open(usize),
    Intro(usize),
    Week(usize, u32),
    Plan,
    Redo(String),
    New,
    Retry,
    Refresh,
    Help,
    Quit,
    Blank,
    Unknown,
}

fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Blank;
    }
    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or_default();
    match head {
        "open" => match parts.next().and_then(|s| s.parse().ok()) {
            Some(n) => Command::Open(n),
            None => Command::Unknown,
        },
        "intro" => match parts.next().and_then(|s| s.parse().ok()) {
            Some(n) => Command::Intro(n),
            None => Command::Unknown,
        },
        "week" => {
            let course = parts.next().and_then(|s| s.parse().ok());
            let week = parts.next().and_then(|s| s.parse().ok());
            match (course, week) {
                (Some(n), Some(m)) => Command::Week(n, m),
                _ => Command::Unknown,
            }
        }
        "plan" => Command::Plan,
        "redo" => Command::Redo(parts.collect::<Vec<_>>().join(" ")),
        "new" => Command::New,
        "retry" => Command::Retry,
        "refresh" => Command::Refresh,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown,
    }
}

type InputLines = Lines<BufReader<Stdin>>;

pub async fn run(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_draft: Option<NewCourseRequest> = None;

    println!("{}", app.screen());
    println!("{}", HELP);

    loop {
        prompt("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse(&line) {
            Command::Open(n) => match course_id(app, n) {
                Some(id) => app.toggle_course(id),
                None => println!("No such course."),
            },
            Command::Intro(n) => match course_id(app, n) {
                Some(id) => app.show_intro(id),
                None => println!("No such course."),
            },
            Command::Week(n, m) => match week_target(app, n, m) {
                Some((course_id, week_id)) => app.show_week(course_id, week_id).await,
                None => println!("No such week."),
            },
            Command::Plan => match app.current_view() {
                DetailView::Week { course_id, week_id } => {
                    println!("AI is generating minute-by-minute plans...");
                    app.generate(course_id, week_id).await;
                }
                _ => println!("Select a week first."),
            },
            Command::Redo(guidance) => match app.current_view() {
                DetailView::Week { course_id, week_id } => {
                    println!("AI is regenerating sessions based on your guidance...");
                    app.regenerate(course_id, week_id, &guidance).await;
                }
                _ => println!("Select a week first."),
            },
            Command::New => {
                if let Some(draft) = read_draft(&mut lines).await? {
                    submit(app, draft, &mut last_draft).await;
                }
            }
            Command::Retry => match last_draft.take() {
                Some(draft) => submit(app, draft, &mut last_draft).await,
                None => println!("Nothing to retry."),
            },
            Command::Refresh => app.load_courses().await,
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
            Command::Blank => continue,
            Command::Unknown => {
                println!("Unrecognized command; type `help` for the list.");
                continue;
            }
        }

        println!("{}", app.screen());
    }

    Ok(())
}

async fn submit(app: &mut App, draft: NewCourseRequest, last_draft: &mut Option<NewCourseRequest>) {
    println!("Generating course structure, this can take a while...");
    match app.submit_course(&draft).await {
        Ok(()) => {
            println!("Course generated successfully. Opening the viewer...");
            *last_draft = None;
        }
        Err(e) => {
            println!("Error: {}", e.user_message());
            println!("Your answers are kept; type `retry` to submit them again.");
            *last_draft = Some(draft);
        }
    }
}

fn course_id(app: &App, index: usize) -> Option<i64> {
    app.store()
        .course_by_index(index.checked_sub(1)?)
        .map(|c| c.id)
}

fn week_target(app: &App, course_index: usize, week_number: u32) -> Option<(i64, i64)> {
    let course = app.store().course_by_index(course_index.checked_sub(1)?)?;
    let week = course.weeks.iter().find(|w| w.week_number == week_number)?;
    Some((course.id, week.id))
}

async fn read_draft(lines: &mut InputLines) -> Result<Option<NewCourseRequest>, std::io::Error> {
    println!("New course (nine fields, blank lines are allowed):");
    macro_rules! field {
        ($label:expr) => {
            match ask(lines, $label).await? {
                Some(value) => value,
                None => return Ok(None),
            }
        };
    }

    Ok(Some(NewCourseRequest {
        teacher_email: field!("Teacher email"),
        course_code: field!("Course code"),
        course_name: field!("Course name"),
        content: field!("Content"),
        objectives: field!("Objectives"),
        prerequisites: field!("Prerequisites"),
        duration: field!("Duration (weeks)"),
        sessions_per_week: field!("Sessions per week"),
        homework: field!("Homework"),
    }))
}

async fn ask(lines: &mut InputLines, label: &str) -> Result<Option<String>, std::io::Error> {
    prompt(&format!("  {}: ", label));
    Ok(lines.next_line().await?.map(|s| s.trim().to_string()))
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}
