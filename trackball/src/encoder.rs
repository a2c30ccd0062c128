//! Optical scroll wheel encoder
//!
//! The wheel interrupts the light of two photodiodes which are read through the ADC. Each reading
//! is digitised against a threshold, the two resulting bits form a gray code and the transitions
//! are decoded the same way as a mechanical quadrature encoder.
//!
//! The phase tables are adapted from: <https://github.com/leshow/rotary-encoder-hal/blob/master/src/lib.rs>
use crate::driver::{AnalogReader, OpticalChannel};

/// The encoder direction is either `Clockwise`, `CounterClockwise`, or `None`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// A clockwise turn
    Clockwise,
    /// A counterclockwise turn
    CounterClockwise,
    /// No change
    None,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
            Direction::None => Direction::None,
        }
    }
}

/// One reading of both photodiodes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderSample {
    pub channel1: u16,
    pub channel2: u16,
}

/// Allows customizing which Quadrature Phases should be considered movements
/// and in which direction or ignored.
pub trait Phase {
    /// Given the current state `s`, return the direction.
    fn direction(&mut self, s: u8) -> Direction;

    /// Forget any partially counted movement.
    fn reset(&mut self) {}
}

/// Default implementation of `Phase`, every transition is a step.
pub struct DefaultPhase;

/// The useful values of `s` are:
/// - 0b0001 | 0b0111 | 0b1000 | 0b1110
/// - 0b0010 | 0b0100 | 0b1011 | 0b1101
impl Phase for DefaultPhase {
    fn direction(&mut self, s: u8) -> Direction {
        match s {
            0b0001 | 0b0111 | 0b1000 | 0b1110 => Direction::Clockwise,
            0b0010 | 0b0100 | 0b1011 | 0b1101 => Direction::CounterClockwise,
            _ => Direction::None,
        }
    }
}

/// Phase implementation which emits one step per `resolution` transitions
pub struct ResolutionPhase {
    resolution: i8,
    lut: [i8; 16],
    pulses: i8,
}

impl ResolutionPhase {
    /// `resolution` is clamped into `1..=127`, the range the pulse counter can reach.
    pub fn new(resolution: u8, reverse: bool) -> Self {
        // Each entry corresponds to a state transition and provides +1, -1, or 0 pulse
        let mut lut = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];
        if reverse {
            lut = lut.map(|x| -x);
        }
        Self {
            resolution: resolution.clamp(1, i8::MAX as u8) as i8,
            lut,
            pulses: 0,
        }
    }
}

impl Phase for ResolutionPhase {
    fn direction(&mut self, s: u8) -> Direction {
        // Only proceed if there was a state change
        if (s & 0xC) >> 2 != (s & 0x3) {
            self.pulses += self.lut[s as usize & 0xF];
            if self.pulses >= self.resolution {
                self.pulses %= self.resolution;
                return Direction::CounterClockwise;
            } else if self.pulses <= -self.resolution {
                self.pulses %= self.resolution;
                return Direction::Clockwise;
            }
        }

        Direction::None
    }

    fn reset(&mut self) {
        self.pulses = 0;
    }
}

/// Maps a pair of photodiode readings to a wheel direction.
pub trait OpticalDecoder {
    fn decode(&mut self, sample: EncoderSample) -> Direction;

    /// Called when the pointing device is (re)initialized.
    fn reset(&mut self) {}
}

/// Decoder digitising both channels against a fixed threshold.
///
/// A reading below `threshold` counts as "dark"; the dark bits of the previous and the current
/// sample are fed to the [`Phase`].
pub struct ThresholdDecoder<P: Phase> {
    threshold: u16,
    reverse: bool,
    state: u8,
    phase: P,
}

impl ThresholdDecoder<DefaultPhase> {
    pub fn new(threshold: u16, reverse: bool) -> Self {
        Self::with_phase(threshold, reverse, DefaultPhase)
    }
}

impl ThresholdDecoder<ResolutionPhase> {
    /// Creates a decoder which emits one step per `resolution` transitions
    pub fn with_resolution(threshold: u16, resolution: u8, reverse: bool) -> Self {
        Self::with_phase(threshold, false, ResolutionPhase::new(resolution, reverse))
    }
}

impl<P: Phase> ThresholdDecoder<P> {
    pub fn with_phase(threshold: u16, reverse: bool, phase: P) -> Self {
        Self {
            threshold,
            reverse,
            state: 0,
            phase,
        }
    }
}

impl<P: Phase> OpticalDecoder for ThresholdDecoder<P> {
    fn decode(&mut self, sample: EncoderSample) -> Direction {
        // use mask to get previous state value
        let mut s = self.state & 0b11;

        // move in the new state
        if sample.channel1 < self.threshold {
            s |= 0b0100;
        }
        if sample.channel2 < self.threshold {
            s |= 0b1000;
        }
        self.state = s >> 2;

        let direction = self.phase.direction(s);
        if self.reverse { direction.reverse() } else { direction }
    }

    fn reset(&mut self) {
        self.state = 0;
        self.phase.reset();
    }
}

/// Reads the photodiodes once per call and decodes the direction
pub struct EncoderSampler<A: AnalogReader, D: OpticalDecoder> {
    adc: A,
    decoder: D,
    enabled: bool,
    debug: bool,
}

impl<A: AnalogReader, D: OpticalDecoder> EncoderSampler<A, D> {
    pub fn new(adc: A, decoder: D, enabled: bool, debug: bool) -> Self {
        Self {
            adc,
            decoder,
            enabled,
            debug,
        }
    }

    /// Sample the wheel, a disabled wheel never touches the ADC.
    pub fn sample(&mut self) -> Direction {
        if !self.enabled {
            return Direction::None;
        }

        let sample = EncoderSample {
            channel1: self.adc.read_channel(OpticalChannel::Opt1),
            channel2: self.adc.read_channel(OpticalChannel::Opt2),
        };
        if self.debug {
            debug!("OPT1: {}, OPT2: {}", sample.channel1, sample.channel2);
        }

        self.decoder.decode(sample)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn reset(&mut self) {
        self.decoder.reset();
    }

    /// Returns a reference to the ADC.
    pub fn adc(&mut self) -> &mut A {
        &mut self.adc
    }
}
