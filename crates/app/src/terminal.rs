//! Line-oriented command source and plain-text render sink.

use std::fmt::{self, Write};

use learn_core::Catalog;
use learn_core::model::{AuthMode, CourseId, Credentials, NavigationTarget, Screen};
use services::{AppSnapshot, Command, CourseCard, DashboardSummary, home_cards};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  login <email> <password>    sign in
  signup <email> <password>   create an account and sign in
  open <course-id>            watch a course (from home)
  back                        leave the course screen
  complete                    mark the open course as completed
  home | dashboard            switch screens
  search [text]               filter the home screen by title
  status                      redraw the current screen
  logout | quit | help";

/// One parsed line of user input.
#[derive(Debug, Clone)]
pub enum Input {
    Command(Command),
    Search(String),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("nothing entered")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    MissingArgument(&'static str),
    #[error("no course with id `{0}`")]
    UnknownCourse(String),
}

/// Parse a line into an input. Course ids are resolved against `catalog` here,
/// so the engine only ever receives courses that exist.
pub fn parse_line(line: &str, catalog: &Catalog) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(InputError::Empty);
    };

    let input = match verb.to_ascii_lowercase().as_str() {
        "login" | "signup" => {
            let mode = if verb.eq_ignore_ascii_case("signup") {
                AuthMode::SignUp
            } else {
                AuthMode::Login
            };
            // Missing fields go through as empty strings and are refused by the session.
            let email = words.next().unwrap_or_default();
            let password = words.next().unwrap_or_default();
            Input::Command(Command::Login(
                Credentials::new(email, password).with_mode(mode),
            ))
        }
        "logout" => Input::Command(Command::Logout),
        "open" => {
            let raw = words.next().ok_or(InputError::MissingArgument("open <course-id>"))?;
            let course = raw
                .parse::<CourseId>()
                .ok()
                .and_then(|id| catalog.get(&id).cloned())
                .ok_or_else(|| InputError::UnknownCourse(raw.to_string()))?;
            Input::Command(Command::OpenCourse(course))
        }
        "back" => Input::Command(Command::Back),
        "complete" => Input::Command(Command::MarkCompleted),
        "home" => Input::Command(Command::GoTo(Screen::Home)),
        "dashboard" => Input::Command(Command::GoTo(Screen::Dashboard)),
        "search" => Input::Search(words.collect::<Vec<_>>().join(" ")),
        "status" => Input::Status,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => return Err(InputError::Unknown(verb.to_string())),
    };
    Ok(input)
}

/// Draw the screen described by `snapshot`.
pub fn render(
    out: &mut impl Write,
    snapshot: &AppSnapshot,
    catalog: &Catalog,
    query: &str,
) -> fmt::Result {
    if !snapshot.session.is_authenticated() {
        writeln!(out, "== E-Learn ==")?;
        return writeln!(out, "Signed out. `login <email> <password>` or `signup <email> <password>`.");
    }

    match &snapshot.navigation {
        NavigationTarget::Home => {
            writeln!(out, "== Browse ==")?;
            if !query.is_empty() {
                writeln!(out, "search: {query}")?;
            }
            let cards = home_cards(catalog, &snapshot.progress, query);
            if cards.is_empty() {
                writeln!(out, "  no courses match")?;
            }
            for card in &cards {
                render_card(out, card)?;
            }
        }
        NavigationTarget::Dashboard => {
            let summary = DashboardSummary::build(catalog, &snapshot.progress);
            writeln!(out, "== Dashboard ==")?;
            writeln!(
                out,
                "courses completed {}/{}   overall {}%",
                summary.completed, summary.total, summary.overall_percent
            )?;
            for row in &summary.rows {
                render_card(out, row)?;
            }
        }
        NavigationTarget::CourseDetail(id) => {
            let progress = snapshot.progress.get(id);
            match &snapshot.selected_course {
                Some(course) => {
                    writeln!(out, "== {} ==", course.title)?;
                    writeln!(out, "by {} | {}", course.author, course.duration)?;
                    writeln!(out, "video: {}", course.video_ref)?;
                    writeln!(out, "{}", course.description)?;
                }
                None => writeln!(out, "== {id} ==")?,
            }
            writeln!(out, "progress {}%", progress.rounded_percent())?;
        }
    }
    Ok(())
}

fn render_card(out: &mut impl Write, card: &CourseCard) -> fmt::Result {
    writeln!(
        out,
        "  [{}] {} | {} | {} | {:>3}%",
        card.course_id,
        card.title,
        card.author,
        card.duration,
        card.percent_label()
    )
}
