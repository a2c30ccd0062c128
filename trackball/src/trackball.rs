//! The trackball device, gluing the scroll wheel, drag-scroll and DPI handling to the host
use embassy_time::Instant;
use embedded_hal::digital::{Error as _, OutputPin};
use embedded_storage::Storage;

use crate::config::{ConfigError, ScrollOutput, ScrollWheelConfig, TrackballConfig};
use crate::drag_scroll::DragScroll;
use crate::driver::{AnalogReader, CpiSensor, ReportSink};
use crate::encoder::{DefaultPhase, OpticalDecoder, ThresholdDecoder};
use crate::event::{KeyEvent, Keycode};
use crate::hooks::{DefaultHooks, TrackballHooks};
use crate::report::PointerReport;
use crate::scroll::ScrollEmitter;
use crate::state::TrackballState;
use crate::storage::ConfigStore;

/// Trackball with an optical scroll wheel.
///
/// All of the device state lives here. The host firmware calls the hooks in this order:
///
/// 1. [`Trackball::pre_init`], before anything else is set up
/// 2. [`Trackball::load_or_init`], once the storage is available
/// 3. [`Trackball::pointing_init`], when the pointing sensor is ready
/// 4. [`Trackball::post_init`]
///
/// After boot, [`Trackball::pointing_task`] runs on every pointing tick and
/// [`Trackball::process_record`] on every key event.
pub struct Trackball<A, D, P, R, S, H = DefaultHooks>
where
    A: AnalogReader,
    D: OpticalDecoder,
    P: CpiSensor,
    R: ReportSink,
    S: Storage,
    H: TrackballHooks,
{
    scroll: ScrollEmitter<A, D>,
    drag_scroll: DragScroll,
    state: TrackballState<S>,
    scroll_wheel: ScrollWheelConfig,
    debug: bool,
    sensor: P,
    sink: R,
    hooks: H,
}

impl<A, P, R, S> Trackball<A, ThresholdDecoder<DefaultPhase>, P, R, S, DefaultHooks>
where
    A: AnalogReader,
    P: CpiSensor,
    R: ReportSink,
    S: Storage,
{
    /// Create a trackball with the default threshold decoder and no user hooks.
    pub fn new(config: TrackballConfig, adc: A, sensor: P, sink: R, storage: S) -> Result<Self, ConfigError> {
        let decoder = ThresholdDecoder::new(config.scroll_wheel.threshold, config.scroll_wheel.reverse);
        Trackball::with_parts(config, adc, decoder, sensor, sink, storage, DefaultHooks)
    }
}

impl<A, D, P, R, S, H> Trackball<A, D, P, R, S, H>
where
    A: AnalogReader,
    D: OpticalDecoder,
    P: CpiSensor,
    R: ReportSink,
    S: Storage,
    H: TrackballHooks,
{
    pub fn with_parts(
        config: TrackballConfig,
        adc: A,
        decoder: D,
        sensor: P,
        sink: R,
        storage: S,
        hooks: H,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let store = ConfigStore::new(storage, config.storage.offset);
        Ok(Self {
            scroll: ScrollEmitter::new(adc, decoder, &config.scroll_wheel),
            drag_scroll: DragScroll::new(config.drag_scroll),
            state: TrackballState::new(config.dpi, config.drag_scroll.mode, config.drag_scroll.cpi, store),
            scroll_wheel: config.scroll_wheel,
            debug: config.debug,
            sensor,
            sink,
            hooks,
        })
    }

    /// Hardware setup.
    ///
    /// Pins which are wired to ground on the PCB are driven low, so they can't short the MCU when
    /// something else touches them. The debug LED shows whether debug mode is on.
    pub fn pre_init<O: OutputPin>(&mut self, unused_pins: &mut [O], debug_led: Option<&mut O>) {
        for pin in unused_pins.iter_mut() {
            if let Err(e) = pin.set_low() {
                warn!("Failed to ground unused pin: {:?}", e.kind());
            }
        }

        if let Some(led) = debug_led {
            if let Err(e) = led.set_state(self.debug.into()) {
                warn!("Failed to set debug LED: {:?}", e.kind());
            }
        }

        self.hooks.pre_init();
    }

    /// Load the persisted config, resetting it when it's invalid.
    pub fn load_or_init(&mut self) {
        if self.state.load_or_init() {
            self.hooks.eeconfig_init();
        }
    }

    /// Reset the persisted config to defaults.
    pub fn init_config(&mut self) {
        self.state.init_config();
        self.hooks.eeconfig_init();
    }

    /// Apply the saved DPI and initialize the scroll wheel decoder.
    pub fn pointing_init(&mut self) {
        self.apply_cpi(self.state.current_dpi());
        self.scroll.sampler().reset();
    }

    pub fn post_init(&mut self) {
        self.apply_cpi(self.state.current_dpi());
        self.hooks.post_init();
    }

    /// Process one pointing tick.
    ///
    /// The scroll wheel is polled first and sends its own report. The returned report is what
    /// the host should send for the ball motion.
    pub fn pointing_task(&mut self, report: PointerReport, now: Instant) -> PointerReport {
        self.process_wheel(report.buttons, now);

        let report = if self.state.is_drag_scroll() {
            self.drag_scroll.convert(report)
        } else {
            report
        };

        self.hooks.pointing_task(report)
    }

    /// Process a key event, returns `false` if the user hook stopped the processing.
    pub fn process_record(&mut self, event: &KeyEvent) -> bool {
        debug!(
            "KL: kc: {:?}, col: {}, row: {}, pressed: {}",
            event.keycode, event.pos.col, event.pos.row, event.pressed
        );

        // Update the timer to prevent accidental scrolls
        if event.pos == self.scroll_wheel.scroll_button {
            self.scroll.note_button(event.pressed, event.time);
        }

        if !self.hooks.process_record(event) {
            return false;
        }

        match event.keycode {
            Keycode::DpiConfig if event.pressed => self.cycle_dpi(),
            Keycode::DragScroll => self.toggle_drag_scroll(event.pressed),
            _ => {}
        }

        true
    }

    /// Step to the next DPI, persist and apply it.
    pub fn cycle_dpi(&mut self) {
        let dpi = self.state.cycle_dpi();
        info!("DPI set to {} (index {})", dpi, self.state.dpi_index());
        self.apply_cpi(self.state.effective_cpi());
    }

    /// Update drag-scroll from a drag-scroll key edge.
    pub fn toggle_drag_scroll(&mut self, pressed: bool) {
        if self.state.update_drag_scroll(pressed) {
            info!("Drag-scroll: {}", self.state.is_drag_scroll());
            self.apply_cpi(self.state.effective_cpi());
        }
    }

    pub fn is_drag_scroll(&self) -> bool {
        self.state.is_drag_scroll()
    }

    pub fn dpi_index(&self) -> u8 {
        self.state.dpi_index()
    }

    pub fn effective_cpi(&self) -> u16 {
        self.state.effective_cpi()
    }

    pub fn state(&mut self) -> &mut TrackballState<S> {
        &mut self.state
    }

    pub fn drag_scroll(&self) -> &DragScroll {
        &self.drag_scroll
    }

    pub fn scroll_emitter(&mut self) -> &mut ScrollEmitter<A, D> {
        &mut self.scroll
    }

    pub fn sensor(&mut self) -> &mut P {
        &mut self.sensor
    }

    pub fn sink(&mut self) -> &mut R {
        &mut self.sink
    }

    pub fn hooks(&mut self) -> &mut H {
        &mut self.hooks
    }

    fn process_wheel(&mut self, buttons: u8, now: Instant) {
        let Some(event) = self.scroll.tick(now) else {
            return;
        };

        if !self.hooks.encoder_update(0, event.clockwise) {
            return;
        }

        match self.scroll_wheel.output {
            ScrollOutput::KeyTap => self.sink.tap_code(event.wheel_key()),
            ScrollOutput::Report => {
                let mut report = event.report(self.scroll_wheel.scale);
                report.buttons = buttons;
                self.sink.send_report(&report);
            }
        }
    }

    fn apply_cpi(&mut self, cpi: u16) {
        if let Err(e) = self.sensor.set_cpi(cpi) {
            warn!("Failed to set CPI to {}: {:?}", cpi, e);
        }
    }
}
