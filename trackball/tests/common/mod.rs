#![allow(dead_code)]

use std::collections::VecDeque;

use embassy_time::Instant;
use embedded_storage::{ReadStorage, Storage};
use rmk_trackball::config::TrackballConfig;
use rmk_trackball::driver::{AnalogReader, CpiSensor, OpticalChannel, PointingDriverError, ReportSink, WheelKey};
use rmk_trackball::encoder::{DefaultPhase, ThresholdDecoder};
use rmk_trackball::event::{KeyEvent, KeyPos, Keycode};
use rmk_trackball::hooks::{DefaultHooks, TrackballHooks};
use rmk_trackball::report::PointerReport;
use rmk_trackball::trackball::Trackball;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const HIGH: u16 = 600;
pub const LOW: u16 = 20;

/// One full gray-code cycle of the wheel turning clockwise
pub const CLOCKWISE: [(u16, u16); 4] = [(HIGH, LOW), (LOW, LOW), (LOW, HIGH), (HIGH, HIGH)];
/// One full gray-code cycle of the wheel turning counterclockwise
pub const COUNTER_CLOCKWISE: [(u16, u16); 4] = [(LOW, HIGH), (LOW, LOW), (HIGH, LOW), (HIGH, HIGH)];

pub const SCROLL_BUTTON: KeyPos = KeyPos::new(0, 1);
pub const DPI_KEY: KeyPos = KeyPos::new(0, 3);
pub const DRAG_SCROLL_KEY: KeyPos = KeyPos::new(0, 4);

/// ADC replaying scripted photodiode readings, the last one is repeated forever
#[derive(Default)]
pub struct MockAdc {
    pub readings: VecDeque<(u16, u16)>,
    pub last: (u16, u16),
    pub reads: usize,
}

impl MockAdc {
    pub fn push(&mut self, readings: &[(u16, u16)]) {
        self.readings.extend(readings.iter().copied());
    }
}

impl AnalogReader for MockAdc {
    fn read_channel(&mut self, channel: OpticalChannel) -> u16 {
        self.reads += 1;
        match channel {
            OpticalChannel::Opt1 => {
                if let Some(next) = self.readings.pop_front() {
                    self.last = next;
                }
                self.last.0
            }
            OpticalChannel::Opt2 => self.last.1,
        }
    }
}

/// Sensor recording every applied CPI
#[derive(Default)]
pub struct MockSensor {
    pub cpi: Vec<u16>,
    pub fail: bool,
}

impl MockSensor {
    pub fn last_cpi(&self) -> Option<u16> {
        self.cpi.last().copied()
    }
}

impl CpiSensor for MockSensor {
    fn set_cpi(&mut self, cpi: u16) -> Result<(), PointingDriverError> {
        if self.fail {
            return Err(PointingDriverError::NotReady);
        }
        self.cpi.push(cpi);
        Ok(())
    }
}

/// Host side recording the sent reports and tapped keys
#[derive(Default)]
pub struct MockSink {
    pub reports: Vec<PointerReport>,
    pub taps: Vec<WheelKey>,
}

impl ReportSink for MockSink {
    fn send_report(&mut self, report: &PointerReport) {
        self.reports.push(*report);
    }

    fn tap_code(&mut self, key: WheelKey) {
        self.taps.push(key);
    }
}

/// In-memory storage, blank flash reads as 0xFF
pub struct RamStorage {
    pub data: [u8; 64],
    pub writes: usize,
}

impl RamStorage {
    pub fn blank() -> Self {
        Self {
            data: [0xFF; 64],
            writes: 0,
        }
    }

    /// Storage with the dpi index already saved at offset 0
    pub fn with_dpi_index(index: u8) -> Self {
        let mut storage = Self::blank();
        storage.data[0..4].copy_from_slice(&[index, 0, 0, 0]);
        storage
    }
}

impl ReadStorage for RamStorage {
    type Error = ();

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let offset = offset as usize;
        bytes.copy_from_slice(&self.data[offset..offset + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl Storage for RamStorage {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let offset = offset as usize;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self.writes += 1;
        Ok(())
    }
}

/// Hooks counting their calls, optionally blocking keys or wheel steps
#[derive(Default)]
pub struct RecordingHooks {
    pub block_keys: bool,
    pub swallow_wheel: bool,
    pub encoder_updates: Vec<bool>,
    pub pre_init: usize,
    pub post_init: usize,
    pub eeconfig_init: usize,
}

impl TrackballHooks for RecordingHooks {
    fn encoder_update(&mut self, _index: u8, clockwise: bool) -> bool {
        self.encoder_updates.push(clockwise);
        !self.swallow_wheel
    }

    fn process_record(&mut self, _event: &KeyEvent) -> bool {
        !self.block_keys
    }

    fn pre_init(&mut self) {
        self.pre_init += 1;
    }

    fn post_init(&mut self) {
        self.post_init += 1;
    }

    fn eeconfig_init(&mut self) {
        self.eeconfig_init += 1;
    }
}

pub type TestTrackball<H = DefaultHooks> =
    Trackball<MockAdc, ThresholdDecoder<DefaultPhase>, MockSensor, MockSink, RamStorage, H>;

pub fn create_trackball(config: TrackballConfig, storage: RamStorage) -> TestTrackball {
    Trackball::new(
        config,
        MockAdc::default(),
        MockSensor::default(),
        MockSink::default(),
        storage,
    )
    .unwrap()
}

pub fn create_trackball_with_hooks<H: TrackballHooks>(
    config: TrackballConfig,
    storage: RamStorage,
    hooks: H,
) -> TestTrackball<H> {
    let decoder = ThresholdDecoder::new(config.scroll_wheel.threshold, config.scroll_wheel.reverse);
    Trackball::with_parts(
        config,
        MockAdc::default(),
        decoder,
        MockSensor::default(),
        MockSink::default(),
        storage,
        hooks,
    )
    .unwrap()
}

/// Run the boot sequence the host firmware would run
pub fn boot<H: TrackballHooks>(trackball: &mut TestTrackball<H>) {
    trackball.load_or_init();
    trackball.pointing_init();
    trackball.post_init();
}

pub fn key(keycode: Keycode, pos: KeyPos, pressed: bool, ms: u64) -> KeyEvent {
    KeyEvent::new(keycode, pos, pressed, Instant::from_millis(ms))
}

pub fn motion(x: i16, y: i16) -> PointerReport {
    PointerReport {
        x,
        y,
        ..Default::default()
    }
}
