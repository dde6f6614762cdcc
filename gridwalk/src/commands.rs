//! The non-interactive subcommands: `solve` and `play`.

use std::fmt;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;
use std::time::Duration;

use crossterm::{cursor, queue, terminal};
use gridwalk_api::{ApiError, SearchRequest, SearchResponse};
use gridwalk_core::{Board, GridError};
use gridwalk_paths::{ParentMapError, reconstruct_path};
use gridwalk_playback::{Context, Observer, Plan, PlayOutcome, PlaybackEvent, Player};

use crate::ascii;

// ---------------------------------------------------------------------------
// CommandError
// ---------------------------------------------------------------------------

/// Failures of the `solve` and `play` subcommands.
#[derive(Debug)]
pub enum CommandError {
    Io(io::Error),
    /// The request was answered with an error status.
    Rejected { status: u16, message: String },
    Board(GridError),
    Parent(ParentMapError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Rejected { status, message } => write!(f, "{status}: {message}"),
            Self::Board(e) => write!(f, "{e}"),
            Self::Parent(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Board(e) => Some(e),
            Self::Parent(e) => Some(e),
            Self::Rejected { .. } => None,
        }
    }
}

impl From<io::Error> for CommandError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ApiError> for CommandError {
    fn from(e: ApiError) -> Self {
        Self::Rejected {
            status: e.status(),
            message: e.to_string(),
        }
    }
}

/// Read the request body from `input`, or stdin when absent or `-`.
pub fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(p) if p != Path::new("-") => fs::read_to_string(p),
        _ => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;
            Ok(s)
        }
    }
}

// ---------------------------------------------------------------------------
// solve
// ---------------------------------------------------------------------------

/// Answer one request body, writing the response JSON to `out`.
pub fn solve(body: &str, out: &mut impl Write) -> Result<(), CommandError> {
    let resp = gridwalk_api::handle("POST", body);
    if !resp.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&resp.body)
            .ok()
            .and_then(|v| v["error"].as_str().map(str::to_string))
            .unwrap_or(resp.body);
        return Err(CommandError::Rejected {
            status: resp.status,
            message,
        });
    }
    writeln!(out, "{}", resp.body)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

/// Prints the board after every playback event.
struct Printer<W: Write> {
    board: Board,
    out: W,
    redraw_in_place: bool,
    error: Option<io::Error>,
}

impl<W: Write> Printer<W> {
    fn print(&mut self) -> io::Result<()> {
        if self.redraw_in_place {
            queue!(
                self.out,
                cursor::MoveTo(0, 0),
                terminal::Clear(terminal::ClearType::All)
            )?;
        }
        writeln!(self.out, "{}", ascii::render(&self.board))?;
        if !self.redraw_in_place {
            writeln!(self.out)?;
        }
        self.out.flush()
    }
}

impl<W: Write> Observer for Printer<W> {
    fn on_event(&mut self, event: PlaybackEvent) {
        let unreachable = event == PlaybackEvent::Unreachable;
        self.board.on_event(event);
        if self.error.is_some() {
            return;
        }
        let res = self.print().and_then(|()| {
            if unreachable {
                writeln!(self.out, "goal unreachable")?;
            }
            Ok(())
        });
        if let Err(e) = res {
            self.error = Some(e);
        }
    }
}

/// Rebuild the playback plan the way a client would: from the response's
/// visitation order and keyed parent map.
pub fn plan_from_response(
    req: &SearchRequest,
    resp: &SearchResponse,
    board: &Board,
) -> Result<Plan, CommandError> {
    let parent = resp
        .parent_map(board.bounds())
        .map_err(CommandError::Parent)?;
    Ok(Plan {
        start: req.start,
        goal: req.goal,
        visited_order: resp.visited_order.clone(),
        path: reconstruct_path(&parent, req.start, req.goal),
    })
}

/// Load the request's walls and markers into a board, as the engine saw
/// them.
pub fn board_for(req: &SearchRequest) -> Result<Board, CommandError> {
    let grid = req.to_grid()?;
    let board = Board::replay(&grid, req.start, req.goal).map_err(CommandError::Board)?;
    for (what, p) in [("start", req.start), ("goal", req.goal)] {
        if grid.is_blocked(p) {
            log::warn!("{what} {p} is a wall in the request");
        }
    }
    Ok(board)
}

/// Solve `body`, then replay the result onto an ASCII board written to
/// `out`, one frame per step.
pub fn play(
    body: &str,
    interval: Duration,
    out: impl Write,
    redraw_in_place: bool,
) -> Result<PlayOutcome, CommandError> {
    let req = gridwalk_api::decode(body)?;
    let resp = gridwalk_api::solve(&req)?;
    let board = board_for(&req)?;
    let plan = plan_from_response(&req, &resp, &board)?;
    let steps = plan.steps();

    let mut printer = Printer {
        board,
        out,
        redraw_in_place,
        error: None,
    };
    printer.print()?;
    let outcome = Player::new(interval).play(plan, &mut printer, &Context::new());
    if let Some(e) = printer.error {
        return Err(e.into());
    }
    log::info!(
        "{} from {} to {}: {steps} steps, {outcome:?}",
        req.strategy,
        req.start,
        req.goal
    );
    Ok(outcome)
}

/// Whether frames should overwrite each other on stdout.
pub fn stdout_is_terminal() -> bool {
    io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str =
        r#"{"grid":[[0,0,0],[1,1,0],[0,0,0]],"start":{"r":0,"c":0},"goal":{"r":2,"c":0}}"#;

    #[test]
    fn solve_writes_response() {
        let mut out = Vec::new();
        solve(BODY, &mut out).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["parent"]["2,0"], "2,1");
    }

    #[test]
    fn solve_reports_status_and_reason() {
        let mut out = Vec::new();
        let err = solve(r#"{"grid":[[0]]}"#, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "400: Missing grid/start/goal");
        assert!(out.is_empty());
    }

    #[test]
    fn play_prints_final_path() {
        let mut out = Vec::new();
        let outcome = play(BODY, Duration::ZERO, &mut out, false).unwrap();
        assert_eq!(outcome, PlayOutcome::Completed);
        let text = String::from_utf8(out).unwrap();
        let last = text.trim_end().rsplit("\n\n").next().unwrap();
        assert_eq!(last, "Soo\n##o\nGoo\nvisited 5  path 5");
    }

    #[test]
    fn play_accepts_start_equal_to_goal() {
        let body = r#"{"grid":[[0,0]],"start":{"r":0,"c":0},"goal":{"r":0,"c":0}}"#;
        let mut out = Vec::new();
        let outcome = play(body, Duration::ZERO, &mut out, false).unwrap();
        assert_eq!(outcome, PlayOutcome::Completed);
        let text = String::from_utf8(out).unwrap();
        let last = text.trim_end().rsplit("\n\n").next().unwrap();
        assert_eq!(last, "S.\nvisited 0  path 0");
    }

    #[test]
    fn board_keeps_walled_markers() {
        let body = r#"{"grid":[[1,0,0]],"start":{"r":0,"c":0},"goal":{"r":0,"c":2}}"#;
        let req = gridwalk_api::decode(body).unwrap();
        let board = board_for(&req).unwrap();
        assert!(board.at(req.start).wall);
        assert_eq!(board.snapshot(), req.to_grid().unwrap());
    }

    #[test]
    fn play_reports_unreachable() {
        let body = r#"{"grid":[[0,1,0]],"start":{"r":0,"c":0},"goal":{"r":0,"c":2},"strategy":"dfs"}"#;
        let mut out = Vec::new();
        play(body, Duration::ZERO, &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.trim_end().ends_with("goal unreachable"));
    }
}
