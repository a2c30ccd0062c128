use core::num::NonZeroU16;

use embassy_time::Duration;
use heapless::Vec;

use crate::event::KeyPos;

/// Capacity of the DPI table
pub const MAX_DPI_OPTIONS: usize = 8;

const DEFAULT_DENOMINATOR_X: NonZeroU16 = NonZeroU16::new(200).unwrap();
const DEFAULT_DENOMINATOR_Y: NonZeroU16 = NonZeroU16::new(100).unwrap();

/// The config struct for the trackball.
///
/// All the options of the scroll wheel, the DPI table, drag-scroll and storage live here. Build
/// it once at startup, [`crate::Trackball::new`] validates it before use.
#[derive(Clone, Debug, Default)]
pub struct TrackballConfig {
    pub scroll_wheel: ScrollWheelConfig,
    pub dpi: DpiConfig,
    pub drag_scroll: DragScrollConfig,
    pub storage: StorageConfig,
    /// Drives the debug LED and enables verbose key logging
    pub debug: bool,
}

impl TrackballConfig {
    /// Check the options that cannot be expressed in the types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dpi.options.is_empty() {
            return Err(ConfigError::EmptyDpiTable);
        }
        if self.dpi.default_index as usize >= self.dpi.options.len() {
            return Err(ConfigError::DefaultDpiOutOfRange {
                index: self.dpi.default_index,
                len: self.dpi.options.len() as u8,
            });
        }
        if matches!(self.drag_scroll.cpi, DragScrollCpi::Scaled(m) if !(m > 0.0)) {
            return Err(ConfigError::InvalidDragScrollMultiplier);
        }
        if self.scroll_wheel.scale == 0 {
            return Err(ConfigError::ZeroScrollScale);
        }
        Ok(())
    }
}

/// Errors of an invalid [`TrackballConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The DPI table has no entry
    EmptyDpiTable,
    /// The default DPI index points outside of the table
    DefaultDpiOutOfRange { index: u8, len: u8 },
    /// The drag-scroll multiplier must be positive
    InvalidDragScrollMultiplier,
    /// A wheel step would produce no scroll
    ZeroScrollScale,
}

/// How a decoded wheel step reaches the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollOutput {
    /// Write the step into a mouse report and send it immediately
    #[default]
    Report,
    /// Tap the mouse wheel keycodes, for hosts with mouse keys
    KeyTap,
}

/// Config for the optical scroll wheel
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollWheelConfig {
    pub enabled: bool,
    /// Minimal time between two scroll events
    pub debounce: Duration,
    /// The wheel is muted for this long after the scroll button changes state
    pub mute_window: Duration,
    /// Activation threshold of the photodiodes, 0-1023
    pub threshold: u16,
    /// Scroll units per wheel step
    pub scale: i8,
    /// Reverse the decoded direction
    pub reverse: bool,
    /// Keep scrolling while the scroll button is held
    pub ignore_scroll_click: bool,
    pub output: ScrollOutput,
    /// Matrix position of the button under the wheel
    pub scroll_button: KeyPos,
    /// Log the raw photodiode readings on every sample
    pub debug_encoder: bool,
}

impl Default for ScrollWheelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce: Duration::from_millis(5),
            mute_window: Duration::from_millis(100),
            threshold: 150,
            scale: 1,
            reverse: false,
            ignore_scroll_click: false,
            output: ScrollOutput::Report,
            scroll_button: KeyPos::new(0, 1),
            debug_encoder: false,
        }
    }
}

/// Config for the DPI table
#[derive(Clone, Debug)]
pub struct DpiConfig {
    pub options: Vec<u16, MAX_DPI_OPTIONS>,
    /// Index used when nothing valid is persisted
    pub default_index: u8,
}

impl Default for DpiConfig {
    fn default() -> Self {
        let mut options = Vec::new();
        for dpi in [1200, 1600, 2400] {
            let _ = options.push(dpi);
        }
        Self {
            options,
            default_index: 1,
        }
    }
}

/// Whether the drag-scroll key has to be held
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DragScrollMode {
    /// Drag-scroll is active while the key is held
    #[default]
    Momentary,
    /// Each press toggles drag-scroll
    Latching,
}

/// Sensor resolution used while drag-scroll is active
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DragScrollCpi {
    /// Always use this CPI
    Fixed(u16),
    /// Scale the current DPI table entry
    Scaled(f32),
}

/// Config for drag-scroll
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DragScrollConfig {
    pub mode: DragScrollMode,
    pub cpi: DragScrollCpi,
    /// Horizontal motion counts per scroll unit
    pub denominator_x: NonZeroU16,
    /// Vertical motion counts per scroll unit
    pub denominator_y: NonZeroU16,
    /// When one axis is this many times larger than the other, the smaller one is dropped
    pub rubberband_mult: u16,
    /// Scroll in the same vertical direction as the ball moves
    pub invert: bool,
}

impl Default for DragScrollConfig {
    fn default() -> Self {
        Self {
            mode: DragScrollMode::Momentary,
            cpi: DragScrollCpi::Scaled(0.75),
            denominator_x: DEFAULT_DENOMINATOR_X,
            denominator_y: DEFAULT_DENOMINATOR_Y,
            rubberband_mult: 5,
            invert: false,
        }
    }
}

/// Config for storage
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StorageConfig {
    /// Offset of the trackball config word in the storage
    pub offset: u32,
}
