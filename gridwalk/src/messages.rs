//! Input events: [`Msg`], [`Key`], [`MouseAction`].

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Space,
    /// A printable character.
    Char(char),
}

// ---------------------------------------------------------------------------
// MouseAction
// ---------------------------------------------------------------------------

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
    /// Button released.
    Release,
    /// Pointer moved with a button held.
    Drag,
}

// ---------------------------------------------------------------------------
// Msg
// ---------------------------------------------------------------------------

/// A message delivered to the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    KeyDown(Key),
    /// A mouse event at terminal column `x`, row `y`.
    Mouse { action: MouseAction, x: i32, y: i32 },
    /// The terminal was resized.
    Screen { width: i32, height: i32 },
    /// A playback timer fired for the given run generation.
    Tick(u64),
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
}

#[cfg(test)]
impl Msg {
    /// Convenience: a printable key press.
    pub fn ch(c: char) -> Self {
        Self::KeyDown(Key::Char(c))
    }
}
