//! Key events delivered by the host's keycode dispatch
use embassy_time::Instant;

/// Matrix position of a key
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPos {
    pub row: u8,
    pub col: u8,
}

impl KeyPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Keycodes the trackball reacts to.
///
/// Everything else is passed through untouched as `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Keycode {
    /// Step to the next entry of the DPI table
    DpiConfig,
    /// Enter/leave drag-scroll
    DragScroll,
    Other(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub keycode: Keycode,
    pub pos: KeyPos,
    pub pressed: bool,
    pub time: Instant,
}

impl KeyEvent {
    pub fn new(keycode: Keycode, pos: KeyPos, pressed: bool, time: Instant) -> Self {
        Self {
            keycode,
            pos,
            pressed,
            time,
        }
    }
}
