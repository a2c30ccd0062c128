//! Scroll wheel rate limiting
use embassy_time::{Duration, Instant};

use crate::config::ScrollWheelConfig;
use crate::driver::{AnalogReader, WheelKey};
use crate::encoder::{Direction, EncoderSampler, OpticalDecoder};
use crate::report::PointerReport;

/// One decoded wheel step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollEvent {
    pub clockwise: bool,
}

impl ScrollEvent {
    /// Report with a single vertical step, clockwise scrolls up.
    pub fn report(&self, scale: i8) -> PointerReport {
        PointerReport::scroll(if self.clockwise { scale } else { scale.saturating_neg() })
    }

    pub fn wheel_key(&self) -> WheelKey {
        if self.clockwise { WheelKey::WheelUp } else { WheelKey::WheelDown }
    }
}

/// Turns encoder samples into scroll events.
///
/// The wheel is read at most once per `debounce` and stays muted for `mute_window` after the
/// scroll button under it changes state, so clicking the wheel doesn't scroll.
pub struct ScrollEmitter<A: AnalogReader, D: OpticalDecoder> {
    sampler: EncoderSampler<A, D>,
    debounce: Duration,
    mute_window: Duration,
    ignore_scroll_click: bool,
    /// Previous confirmed wheel read
    last_scroll: Option<Instant>,
    /// Last state change of the scroll button
    last_mute_trigger: Option<Instant>,
    scroll_clicked: bool,
}

fn within(now: Instant, last: Option<Instant>, window: Duration) -> bool {
    last.is_some_and(|t| now.saturating_duration_since(t) < window)
}

impl<A: AnalogReader, D: OpticalDecoder> ScrollEmitter<A, D> {
    pub fn new(adc: A, decoder: D, config: &ScrollWheelConfig) -> Self {
        Self {
            sampler: EncoderSampler::new(adc, decoder, config.enabled, config.debug_encoder),
            debounce: config.debounce,
            mute_window: config.mute_window,
            ignore_scroll_click: config.ignore_scroll_click,
            last_scroll: None,
            last_mute_trigger: None,
            scroll_clicked: false,
        }
    }

    /// Poll the wheel.
    pub fn tick(&mut self, now: Instant) -> Option<ScrollEvent> {
        // A disabled wheel leaves the timers alone
        if !self.sampler.enabled() {
            return None;
        }

        // If the scroll button was just pressed or released, do not scroll
        if within(now, self.last_mute_trigger, self.mute_window) {
            return None;
        }

        // Limit the number of scrolls per unit time
        if within(now, self.last_scroll, self.debounce) {
            return None;
        }

        if self.scroll_clicked && !self.ignore_scroll_click {
            return None;
        }

        self.last_scroll = Some(now);
        match self.sampler.sample() {
            Direction::Clockwise => Some(ScrollEvent { clockwise: true }),
            Direction::CounterClockwise => Some(ScrollEvent { clockwise: false }),
            Direction::None => None,
        }
    }

    /// Record a state change of the scroll button.
    pub fn note_button(&mut self, pressed: bool, now: Instant) {
        self.last_mute_trigger = Some(now);
        self.scroll_clicked = pressed;
    }

    pub fn scroll_clicked(&self) -> bool {
        self.scroll_clicked
    }

    pub fn last_scroll(&self) -> Option<Instant> {
        self.last_scroll
    }

    pub fn sampler(&mut self) -> &mut EncoderSampler<A, D> {
        &mut self.sampler
    }
}
