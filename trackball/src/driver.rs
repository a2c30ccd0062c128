//! Hardware and host capabilities the trackball consumes.
//!
//! The host firmware provides implementations of these traits; the trackball core never talks to
//! peripherals directly.
use crate::report::PointerReport;

/// The two photodiode channels of the optical scroll wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpticalChannel {
    Opt1,
    Opt2,
}

/// Raw analog reads of the scroll wheel sensor
pub trait AnalogReader {
    /// Read one channel, returns the unsigned magnitude (10 bit on most MCUs).
    fn read_channel(&mut self, channel: OpticalChannel) -> u16;
}

/// Errors of pointing sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointingDriverError {
    /// SPI communication error
    Spi,
    /// Sensor is not initialized yet
    NotReady,
    /// Invalid CPI value
    InvalidCpi(u16),
}

/// Pointing sensor whose resolution can be changed at runtime.
pub trait CpiSensor {
    fn set_cpi(&mut self, cpi: u16) -> Result<(), PointingDriverError>;
}

/// Keys tapped when the scroll wheel is routed through the keycode path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WheelKey {
    WheelUp,
    WheelDown,
}

/// Output side of the host: report transport and key taps.
pub trait ReportSink {
    /// Send the report to the host right away.
    fn send_report(&mut self, report: &PointerReport);

    /// Press and release a mouse wheel key.
    fn tap_code(&mut self, key: WheelKey);
}
