//! Line-oriented driver for the project board.
//!
//! # Responsibility
//! - Mount a board on the in-memory surface and replay commands from stdin.
//! - Print the rendered lists so board behavior can be checked by eye.
//!
//! Commands:
//! - `add <title>|<description>|<people>`
//! - `move <project-id> <active|finished>`
//! - `show`, `outline`, `help`, `quit`

use log::error;
use projboard_core::{
    init_logging_from_config, BoardConfig, DropOutcome, FormInput, MemorySurface, ProjectBoard,
    ProjectStatus, SubmitOutcome,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const HELP: &str = "commands:
  add <title>|<description>|<people>
  move <project-id> <active|finished>
  show | outline | help | quit";

fn main() -> ExitCode {
    let config = match BoardConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let board = match ProjectBoard::new(MemorySurface::project_board(), &config) {
        Ok(board) => board,
        Err(err) => {
            error!("event=board_mount module=cli status=error error={err}");
            eprintln!("cannot mount board: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("projboard_core version={}", projboard_core::core_version());
    println!("{HELP}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            return ExitCode::FAILURE;
        };
        match run_command(&board, line.trim()) {
            Step::Continue(output) => {
                if !output.is_empty() {
                    println!("{output}");
                }
            }
            Step::Quit => break,
        }
        let _ = stdout.flush();
    }
    ExitCode::SUCCESS
}

enum Step {
    Continue(String),
    Quit,
}

fn run_command(board: &ProjectBoard<MemorySurface>, line: &str) -> Step {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let output = match command {
        "" => String::new(),
        "add" => add(board, rest),
        "move" => move_card(board, rest),
        "show" => show(board),
        "outline" => board.surface().borrow().render_outline(),
        "help" => HELP.to_string(),
        "quit" | "exit" => return Step::Quit,
        other => format!("unknown command `{other}`; try `help`"),
    };
    Step::Continue(output)
}

fn add(board: &ProjectBoard<MemorySurface>, rest: &str) -> String {
    let mut fields = rest.splitn(3, '|');
    let form = FormInput::new(
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default().trim(),
    );
    let outcome = board.submit(&form);
    let alerts = board.surface().borrow_mut().take_alerts();
    match outcome {
        SubmitOutcome::Committed(id) => format!("added {id}"),
        SubmitOutcome::Rejected => format!("rejected: {}", alerts.join("; ")),
    }
}

fn move_card(board: &ProjectBoard<MemorySurface>, rest: &str) -> String {
    let mut args = rest.split_whitespace();
    let (Some(id), Some(status)) = (args.next(), args.next()) else {
        return "usage: move <project-id> <active|finished>".to_string();
    };
    let Some(target) = ProjectStatus::parse(status) else {
        return format!("unknown status `{status}`");
    };
    match board.move_project(id, target) {
        DropOutcome::Moved => format!("moved {id} to {target}"),
        DropOutcome::Unchanged => format!("{id} is already {target}"),
        DropOutcome::UnknownProject | DropOutcome::Empty => format!("no project {id}"),
    }
}

fn show(board: &ProjectBoard<MemorySurface>) -> String {
    let mut out = String::new();
    for status in ProjectStatus::ALL {
        out.push_str(&format!("{} PROJECTS\n", status.as_str().to_ascii_uppercase()));
        for item in board.list(status).items() {
            let project = item.project();
            out.push_str(&format!(
                "  [{}] {} ({}): {}\n",
                project.id,
                project.title,
                projboard_core::people_label(project.people),
                project.description
            ));
        }
    }
    out.trim_end().to_string()
}
