//! Pulse sinks: where an encoded transmission ends up.
//!
//! The [`Transmitter`](crate::transmitter::Transmitter) never touches hardware
//! itself. It hands each `(level, duration)` [`Pulse`] to a [`PulseSink`], in
//! emission order, and returns once the last pulse has been accepted.
//!
//! Two sinks ship with the crate:
//!
//! - [`PinSink`] drives an `embedded-hal` [`OutputPin`] connected to the data
//!   line of a 433 MHz transmitter (e.g. an FS1000A), blocking on a
//!   [`DelayNs`] provider for the duration of every pulse.
//! - [`Recorder`] stores the pulses, which is how timing tables for fixed-code
//!   remote daemons are captured.
//!
//! Any `FnMut(Pulse)` closure is a sink as well.
//!
//! ## Timing
//!
//! Pulse widths of the supported protocols are a few hundred microseconds.
//! The sink is responsible for meeting them; the transmitter makes no
//! assumption about how long a call to [`PulseSink::pulse`] takes.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::consts::RECORDER_CAPACITY;
use crate::error::CaptureOverflow;

/// Carrier state of a pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Level {
    /// Carrier on
    High,
    /// Carrier off
    Low,
}

impl Level {
    /// The opposite level.
    pub const fn inverted(self) -> Self {
        match self {
            Level::High => Level::Low,
            Level::Low => Level::High,
        }
    }
}

/// A carrier level held for a number of microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Pulse {
    /// Carrier state
    pub level: Level,
    /// Duration in microseconds
    pub duration_us: u32,
}

impl Pulse {
    /// Creates a pulse.
    pub const fn new(level: Level, duration_us: u32) -> Self {
        Self { level, duration_us }
    }
}

/// Receives the pulses of a transmission, one at a time.
pub trait PulseSink {
    /// Error raised when a pulse cannot be realised.
    type Error;

    /// Realises or records one pulse.
    ///
    /// Called synchronously, in emission order. An error aborts the rest of
    /// the transmission.
    fn pulse(&mut self, pulse: Pulse) -> Result<(), Self::Error>;
}

impl<F> PulseSink for F
where
    F: FnMut(Pulse),
{
    type Error = Infallible;

    fn pulse(&mut self, pulse: Pulse) -> Result<(), Self::Error> {
        self(pulse);
        Ok(())
    }
}

/// Drives a transmitter's data pin in real time.
///
/// ## Type Parameters
///
/// - `P`: the [`OutputPin`] wired to the transmitter's data input
/// - `D`: a [`DelayNs`] provider used to hold each level
///
/// ## Example
///
/// ```rust
/// # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
/// # use embedded_hal_mock::eh1::delay::NoopDelay;
/// use rcswitch433::sink::{Level, Pulse, PinSink, PulseSink};
///
/// # let pin = Pin::new(&[
/// #     PinTransaction::set(PinState::Low),
/// #     PinTransaction::set(PinState::High),
/// # ]);
/// let mut sink = PinSink::new(pin, NoopDelay::new());
/// sink.pulse(Pulse::new(Level::High, 350)).unwrap();
/// # let (mut pin, _) = sink.release();
/// # pin.done();
/// ```
///
/// ## Notes
///
/// The pin is driven low (carrier off) on construction. Each pulse blocks the
/// calling thread for its full duration.
#[derive(Debug)]
pub struct PinSink<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pin: P,
    delay: D,
}

impl<P, D> PinSink<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Wraps `pin` and `delay`, leaving the carrier off.
    pub fn new(mut pin: P, delay: D) -> Self {
        let _ = pin.set_low(); // Ensure idle
        Self { pin, delay }
    }

    /// Drives the carrier off without waiting.
    pub fn idle(&mut self) -> Result<(), P::Error> {
        self.pin.set_low()
    }

    /// Gives the pin and delay provider back.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D> PulseSink for PinSink<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    type Error = P::Error;

    fn pulse(&mut self, pulse: Pulse) -> Result<(), Self::Error> {
        match pulse.level {
            Level::High => self.pin.set_high()?,
            Level::Low => self.pin.set_low()?,
        }
        self.delay.delay_us(pulse.duration_us);
        Ok(())
    }
}

/// Captures pulses instead of transmitting them.
///
/// With `std` the recorder grows without bound. Without it, pulses are kept in
/// a `heapless::Vec` of [`RECORDER_CAPACITY`](crate::consts::RECORDER_CAPACITY)
/// entries and [`CaptureOverflow`] is returned once it is full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recorder {
    #[cfg(feature = "std")]
    pulses: Vec<Pulse>,
    #[cfg(not(feature = "std"))]
    pulses: Vec<Pulse, RECORDER_CAPACITY>,
}

impl Recorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pulses recorded so far, in emission order.
    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Sum of all recorded durations, in microseconds.
    pub fn total_duration_us(&self) -> u64 {
        self.pulses
            .iter()
            .map(|pulse| u64::from(pulse.duration_us))
            .sum()
    }

    /// Forgets every recorded pulse.
    pub fn clear(&mut self) {
        self.pulses.clear();
    }

    /// Removes and returns the recorded pulses.
    #[cfg(feature = "std")]
    pub fn take(&mut self) -> Vec<Pulse> {
        core::mem::take(&mut self.pulses)
    }
}

impl PulseSink for Recorder {
    type Error = CaptureOverflow;

    #[cfg(feature = "std")]
    fn pulse(&mut self, pulse: Pulse) -> Result<(), Self::Error> {
        self.pulses.push(pulse);
        Ok(())
    }

    #[cfg(not(feature = "std"))]
    fn pulse(&mut self, pulse: Pulse) -> Result<(), Self::Error> {
        self.pulses.push(pulse).map_err(|_| CaptureOverflow)
    }
}
