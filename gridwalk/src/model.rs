//! Elm-architecture Model implementation: the interactive visualizer.

use gridwalk_core::{Board, BoardConfig, Coord, GridError, Placement};
use gridwalk_paths::{Searcher, Strategy};
use gridwalk_playback::{
    Observer, Plan, PlaybackConfig, PlaybackEvent, Scheduled, Sequencer, Tick, observer_fn,
};

use crate::app::{Effect, Model};
use crate::messages::{Key, Msg, MouseAction};
use crate::screen::{Cell, Color, Screen};

/// Terminal columns per board cell.
pub const CELL_W: i32 = 2;
/// Screen row of the first board row.
pub const BOARD_TOP: i32 = 1;

const HELP: &str =
    "arrows/hjkl move  w/s/g mode  space apply  b/d run  +/- speed  r reset  R clear  q quit";

const WALL: Color = Color::from_rgb(0x55, 0x55, 0x55);
const START: Color = Color::from_rgb(0x2e, 0xa0, 0x43);
const GOAL: Color = Color::from_rgb(0xd0, 0x3a, 0x3a);
const VISITED: Color = Color::from_rgb(0x2f, 0x5d, 0x8a);
const PATH: Color = Color::from_rgb(0xe0, 0xb0, 0x30);
const TEXT: Color = Color::from_rgb(0xdd, 0xdd, 0xdd);
const DIM: Color = Color::from_rgb(0x80, 0x80, 0x80);

/// What space or a click does to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Wall,
    Start,
    Goal,
}

impl EditMode {
    fn name(self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Start => "start",
            Self::Goal => "goal",
        }
    }
}

/// Outcome line shown in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Running(Strategy),
    Found { strategy: Strategy, edges: usize },
    Unreachable(Strategy),
    Cancelled,
    Failed(String),
}

/// The visualizer model.
pub struct Visualizer {
    board: Board,
    searcher: Searcher,
    sequencer: Sequencer,
    playback: PlaybackConfig,
    cursor: Coord,
    mode: EditMode,
    /// Wall state being painted while a mouse button is held.
    painting: Option<bool>,
    strategy: Option<Strategy>,
    status: Status,
}

impl Visualizer {
    pub fn new(board: BoardConfig, playback: PlaybackConfig) -> Result<Self, GridError> {
        let board = Board::new(board)?;
        let cursor = board.start();
        Ok(Self {
            board,
            searcher: Searcher::new(),
            sequencer: Sequencer::new(),
            playback,
            cursor,
            mode: EditMode::Wall,
            painting: None,
            strategy: None,
            status: Status::Ready,
        })
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.sequencer.is_running()
    }

    // --- runs ---

    fn run(&mut self, strategy: Strategy) -> Option<Effect> {
        if self.is_running() {
            return None;
        }
        self.board.reset_visited();
        let grid = self.board.snapshot();
        let t = match self
            .searcher
            .traverse(&grid, self.board.start(), self.board.goal(), strategy)
        {
            Ok(t) => t,
            Err(e) => {
                log::error!("search rejected: {e}");
                self.status = Status::Failed(e.to_string());
                return None;
            }
        };
        let first = self.sequencer.start(Plan::new(&t), self.playback.interval());
        self.strategy = Some(strategy);
        self.status = Status::Running(strategy);
        Some(schedule(first))
    }

    fn tick(&mut self, generation: u64) -> Option<Effect> {
        let mut finished = None;
        let board = &mut self.board;
        let mut obs = observer_fn(|e: PlaybackEvent| {
            match &e {
                PlaybackEvent::Path(cells) => finished = Some(Some(cells.len() + 1)),
                PlaybackEvent::Unreachable => finished = Some(None),
                PlaybackEvent::Visit(_) => {}
            }
            board.on_event(e);
        });
        let next = self
            .sequencer
            .step(Tick::from_generation(generation), &mut obs);
        drop(obs);

        if let (Some(done), Some(strategy)) = (finished, self.strategy) {
            self.status = match done {
                Some(edges) => Status::Found { strategy, edges },
                None => Status::Unreachable(strategy),
            };
        }
        next.map(schedule)
    }

    /// Stop playback, if any, before an edit that invalidates it. Returns
    /// whether a run was stopped.
    fn interrupt(&mut self) -> bool {
        let Some(i) = self.sequencer.cancel() else {
            return false;
        };
        log::info!("playback cancelled after {}/{} entries", i.cursor, i.total);
        true
    }

    // --- editing ---

    fn apply(&mut self, p: Coord) {
        if self.is_running() {
            return;
        }
        let placed = match self.mode {
            EditMode::Wall => {
                self.board.toggle_wall(p);
                return;
            }
            EditMode::Start => self.board.place_start(p),
            EditMode::Goal => self.board.place_goal(p),
        };
        if placed == Placement::Rejected {
            log::debug!("{} marker rejected at {p}", self.mode.name());
        }
    }

    fn move_cursor(&mut self, dr: i32, dc: i32) {
        let b = self.board.bounds();
        let p = self.cursor.shift(dr, dc);
        if b.contains(p) {
            self.cursor = p;
        }
    }

    fn cell_at(&self, x: i32, y: i32) -> Option<Coord> {
        let p = Coord::new(y - BOARD_TOP, x.div_euclid(CELL_W));
        self.board.bounds().contains(p).then_some(p)
    }

    fn mouse(&mut self, action: MouseAction, x: i32, y: i32) {
        if action == MouseAction::Release {
            self.painting = None;
            return;
        }
        if self.is_running() {
            return;
        }
        let Some(p) = self.cell_at(x, y) else {
            return;
        };
        self.cursor = p;
        match action {
            MouseAction::Main if self.mode == EditMode::Wall => {
                self.painting = self.board.toggle_wall(p);
            }
            MouseAction::Main => self.apply(p),
            MouseAction::Secondary => {
                self.board.paint_wall(p, false);
                self.painting = Some(false);
            }
            MouseAction::Drag => {
                if let Some(on) = self.painting {
                    self.board.paint_wall(p, on);
                }
            }
            MouseAction::Release => {}
        }
    }

    fn key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('q') | Key::Escape => {
                self.interrupt();
                return Some(Effect::End);
            }
            Key::ArrowUp | Key::Char('k') => self.move_cursor(-1, 0),
            Key::ArrowDown | Key::Char('j') => self.move_cursor(1, 0),
            Key::ArrowLeft | Key::Char('h') => self.move_cursor(0, -1),
            Key::ArrowRight | Key::Char('l') => self.move_cursor(0, 1),
            Key::Char('w') => self.mode = EditMode::Wall,
            Key::Char('s') => self.mode = EditMode::Start,
            Key::Char('g') => self.mode = EditMode::Goal,
            Key::Space | Key::Enter => self.apply(self.cursor),
            Key::Char('b') => return self.run(Strategy::Bfs),
            Key::Char('d') => return self.run(Strategy::Dfs),
            Key::Char('+') | Key::Char('=') => self.playback = self.playback.faster(),
            Key::Char('-') => self.playback = self.playback.slower(),
            Key::Char('r') => {
                self.status = if self.interrupt() {
                    Status::Cancelled
                } else {
                    Status::Ready
                };
                self.board.reset_visited();
            }
            Key::Char('R') => {
                self.interrupt();
                self.board.hard_reset();
                self.status = Status::Ready;
            }
            _ => {}
        }
        None
    }

    // --- drawing ---

    fn header(&self) -> String {
        let status = match &self.status {
            Status::Ready => "ready".to_string(),
            Status::Running(s) => format!("running {s}..."),
            Status::Found { strategy, edges } => format!("{strategy}: path of {edges} steps"),
            Status::Unreachable(s) => format!("{s}: goal unreachable"),
            Status::Cancelled => "cancelled".to_string(),
            Status::Failed(e) => format!("error: {e}"),
        };
        format!(
            "gridwalk  mode {}  speed {}ms  visited {}  | {status}",
            self.mode.name(),
            self.playback.interval_ms(),
            self.board.visited_count(),
        )
    }

    fn cell_look(&self, p: Coord) -> (char, Color) {
        if p == self.board.start() {
            return ('S', START);
        }
        if p == self.board.goal() {
            return ('G', GOAL);
        }
        let s = self.board.at(p);
        if s.wall {
            (' ', WALL)
        } else if s.on_path {
            (' ', PATH)
        } else if s.visited {
            (' ', VISITED)
        } else {
            ('·', Color::DEFAULT)
        }
    }
}

fn schedule(s: Scheduled) -> Effect {
    Effect::After(s.delay, Msg::Tick(s.tick.generation()))
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init | Msg::Screen { .. } => None,
            Msg::Quit => {
                self.interrupt();
                Some(Effect::End)
            }
            Msg::Tick(generation) => self.tick(generation),
            Msg::KeyDown(key) => self.key(key),
            Msg::Mouse { action, x, y } => {
                self.mouse(action, x, y);
                None
            }
        }
    }

    fn draw(&self, screen: &mut Screen) {
        screen.fill(Cell::default());
        screen.text(0, 0, &self.header(), TEXT);

        for p in self.board.bounds() {
            let (ch, bg) = self.cell_look(p);
            let x = p.c * CELL_W;
            let y = p.r + BOARD_TOP;
            let fg = if ch == '·' { DIM } else { TEXT };
            screen.set(x, y, Cell::new(ch).fg(fg).bg(bg));
            screen.set(x + 1, y, Cell::new(' ').bg(bg));
            if p == self.cursor {
                screen.set(x + 1, y, Cell::new('<').fg(TEXT).bg(bg));
            }
        }

        let help_y = BOARD_TOP + self.board.bounds().rows + 1;
        screen.text(0, help_y, HELP, DIM);
    }
}
