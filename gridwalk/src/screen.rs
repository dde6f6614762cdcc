//! Character-cell screen buffer and frame diffing.

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB). Zero means "terminal
/// default".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    pub const DEFAULT: Self = Self(0);

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A styled character cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            fg: Color::DEFAULT,
            bg: Color::DEFAULT,
        }
    }

    #[inline]
    pub const fn fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    pub const fn bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ')
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// A `width × height` buffer of cells addressed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Screen {
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && x < self.width && y < self.height)
            .then(|| (y * self.width + x) as usize)
    }

    /// The cell at `(x, y)`, or a blank one outside the screen.
    pub fn at(&self, x: i32, y: i32) -> Cell {
        self.idx(x, y).map_or_else(Cell::default, |i| self.cells[i])
    }

    /// Set one cell. Writes outside the screen are dropped.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write `text` starting at `(x, y)`, clipped at the right edge.
    pub fn text(&mut self, x: i32, y: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set(x + i as i32, y, Cell::new(ch).fg(fg));
        }
    }

    /// One row as plain text, trailing blanks trimmed.
    #[cfg(test)]
    pub fn line(&self, y: i32) -> String {
        let s: String = (0..self.width).map(|x| self.at(x, y).ch).collect();
        s.trim_end().to_string()
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// A single cell that changed between two screens.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub x: i32,
    pub y: i32,
    pub cell: Cell,
}

/// The cells to repaint.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
}

/// Cells of `curr` that differ from `prev`. If the sizes differ every cell
/// of `curr` is included.
pub fn compute_frame(prev: &Screen, curr: &Screen) -> Frame {
    let full = prev.width != curr.width || prev.height != curr.height;
    let mut cells = Vec::new();
    for y in 0..curr.height {
        for x in 0..curr.width {
            let c = curr.at(x, y);
            if full || prev.at(x, y) != c {
                cells.push(FrameCell { x, y, cell: c });
            }
        }
    }
    Frame { cells }
}
