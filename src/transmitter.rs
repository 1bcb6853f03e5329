//! Pulse emitter for tri-state codewords.
//!
//! This module provides the [`Transmitter`] struct, which turns a [`Codeword`]
//! into the on-off-keyed pulse train of the active [`Protocol`] and hands every
//! pulse to a [`PulseSink`].
//!
//! ## Transmission
//!
//! One transmission is `repeat` back-to-back repetitions of:
//!
//! 1. the protocol's sync pair, then
//! 2. the pulse pattern of every codeword symbol, in codeword order.
//!
//! Nothing is inserted between repetitions. Each [`PulsePair`] of the protocol
//! becomes two pulses (high then low, swapped for inverted protocols) whose
//! durations are the pair's multiples of the configured base pulse length.
//!
//! ## Example
//!
//! ```rust
//! use rcswitch433::protocol::ProtocolRegistry;
//! use rcswitch433::sink::Recorder;
//! use rcswitch433::transmitter::Transmitter;
//!
//! let mut transmitter = Transmitter::new(ProtocolRegistry::builtin(), Recorder::new()).unwrap();
//! transmitter.set_repeat_transmit(3).unwrap();
//! transmitter.switch_on_a("00010", 3).unwrap();
//! assert_eq!(transmitter.sink().pulses().len(), 3 * (2 + 11 * 4));
//! ```
//!
//! ## Design Notes
//!
//! `transmit` is a plain blocking call: it returns once the sink has accepted
//! the last pulse. A transmitter must not be reconfigured while a transmission
//! is in flight; share one across contexts through [`crate::shared`] (feature
//! `shared`) or another lock.

use crate::codeword::{self, Address, Codeword, State};
use crate::consts::DEFAULT_REPEAT_TRANSMIT;
use crate::error::{EncodeError, Error};
use crate::protocol::{Protocol, ProtocolRegistry, PulsePair};
use crate::sink::{Level, Pulse, PulseSink};

/// The caller-controlled parameters of a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitterConfig<'r> {
    protocol: &'r Protocol,
    pulse_length: u32,
    repeat: u16,
}

impl<'r> EmitterConfig<'r> {
    /// A configuration using `protocol` at its own base unit, sent once.
    ///
    /// Fails with [`EncodeError::InvalidPulseLength`] if the protocol's own
    /// base unit overflows a pulse duration.
    pub fn new(protocol: &'r Protocol) -> Result<Self, EncodeError> {
        Ok(Self {
            protocol,
            pulse_length: protocol.check_pulse_length(protocol.pulse_length)?,
            repeat: DEFAULT_REPEAT_TRANSMIT,
        })
    }

    /// The selected protocol.
    pub fn protocol(&self) -> &'r Protocol {
        self.protocol
    }

    /// Base pulse length in microseconds.
    pub fn pulse_length(&self) -> u32 {
        self.pulse_length
    }

    /// Number of repetitions per transmission.
    pub fn repeat(&self) -> u16 {
        self.repeat
    }

    // `pulse_length` has been checked against the protocol's widest pulse.
    fn scale(&self, multiple: u8) -> u32 {
        u32::from(multiple) * self.pulse_length
    }
}

/// Encodes remote-control commands and emits them to a [`PulseSink`].
///
/// ## Type Parameters
///
/// - `'r`: lifetime of the [`ProtocolRegistry`] table
/// - `S`: the sink receiving pulses, e.g. a [`PinSink`](crate::sink::PinSink)
///
/// ## Notes
///
/// - A fresh transmitter uses protocol
///   [`DEFAULT_PROTOCOL`](crate::consts::DEFAULT_PROTOCOL) and sends every
///   codeword once.
/// - Configuration changes only affect later transmissions.
#[derive(Debug)]
pub struct Transmitter<'r, S>
where
    S: PulseSink,
{
    registry: ProtocolRegistry<'r>,
    config: EmitterConfig<'r>,
    sink: S,
}

impl<'r, S> Transmitter<'r, S>
where
    S: PulseSink,
{
    /// Creates a transmitter over `registry`, emitting to `sink`.
    ///
    /// Fails with [`EncodeError::UnsupportedProtocol`] if the registry has no
    /// default protocol, and with [`EncodeError::InvalidPulseLength`] if that
    /// protocol's base unit overflows its widest pulse.
    pub fn new(registry: ProtocolRegistry<'r>, sink: S) -> Result<Self, EncodeError> {
        let config = EmitterConfig::new(registry.default_protocol()?)?;
        Ok(Self {
            registry,
            config,
            sink,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &EmitterConfig<'r> {
        &self.config
    }

    /// The registry protocols are looked up in.
    pub fn registry(&self) -> &ProtocolRegistry<'r> {
        &self.registry
    }

    /// Selects a protocol by identifier and resets the base pulse length to
    /// that protocol's default.
    pub fn set_protocol(&mut self, id: u8) -> Result<(), EncodeError> {
        let protocol = self.registry.get(id)?;
        let repeat = self.config.repeat;
        self.config = EmitterConfig::new(protocol)?;
        self.config.repeat = repeat;
        debug!(
            "protocol {} selected, pulse length {} us",
            id,
            protocol.pulse_length
        );
        Ok(())
    }

    /// Overrides the base pulse length, in microseconds.
    ///
    /// Fails with [`EncodeError::InvalidPulseLength`] for zero, or for a length
    /// at which the active protocol's widest pulse overflows a `u32`.
    pub fn set_pulse_length(&mut self, pulse_length: u32) -> Result<(), EncodeError> {
        self.config.pulse_length = self.config.protocol.check_pulse_length(pulse_length)?;
        debug!("pulse length set to {} us", pulse_length);
        Ok(())
    }

    /// Sets how many times each codeword is sent back to back.
    pub fn set_repeat_transmit(&mut self, repeat: u16) -> Result<(), EncodeError> {
        if repeat == 0 {
            return Err(EncodeError::InvalidRepeatCount);
        }
        self.config.repeat = repeat;
        debug!("repeat count set to {}", repeat);
        Ok(())
    }

    /// Number of pulses in one repetition of `codeword` under the active protocol.
    pub fn pulses_per_transmission(&self, codeword: &Codeword) -> Result<usize, EncodeError> {
        let protocol = self.config.protocol;
        codeword.iter().try_fold(2, |count, symbol| {
            Ok(count + 2 * protocol.require(symbol)?.len())
        })
    }

    /// Emits `codeword` `repeat` times.
    ///
    /// Every symbol is checked against the active protocol before the first
    /// pulse, so an [`EncodeError::UnsupportedSymbolForProtocol`] never leaves
    /// a partial transmission behind. A sink error aborts immediately.
    pub fn transmit(&mut self, codeword: &Codeword) -> Result<(), Error<S::Error>> {
        let protocol = self.config.protocol;
        for symbol in codeword.iter() {
            let _ = protocol.require(symbol)?;
        }
        debug!(
            "sending {} symbols, protocol {}, {} us, {} times",
            codeword.len(),
            protocol.id,
            self.config.pulse_length,
            self.config.repeat
        );

        for repetition in 0..self.config.repeat {
            trace!("repetition {}", repetition);
            self.emit(protocol.sync)?;
            for symbol in codeword.iter() {
                for &pair in protocol.require(symbol)? {
                    self.emit(pair)?;
                }
            }
        }
        Ok(())
    }

    fn emit(&mut self, pair: PulsePair) -> Result<(), Error<S::Error>> {
        let inverted = self.config.protocol.inverted;
        let level = |level: Level| if inverted { level.inverted() } else { level };
        let high = Pulse::new(level(Level::High), self.config.scale(pair.high));
        let low = Pulse::new(level(Level::Low), self.config.scale(pair.low));
        self.sink.pulse(high).map_err(Error::Sink)?;
        self.sink.pulse(low).map_err(Error::Sink)
    }

    /// Builds the codeword for `device` at `address` and transmits it.
    ///
    /// Nothing is emitted if the codeword cannot be built.
    pub fn switch(
        &mut self,
        address: &Address,
        device: u8,
        state: State,
    ) -> Result<(), Error<S::Error>> {
        let codeword = address.codeword(device, state)?;
        self.transmit(&codeword)
    }

    /// Switches on `device` of a DIP-switch remote with group code `group`.
    pub fn switch_on_a(&mut self, group: &str, device: u8) -> Result<(), Error<S::Error>> {
        self.transmit(&codeword::dip_switch(group, device, State::On)?)
    }

    /// Switches off `device` of a DIP-switch remote with group code `group`.
    pub fn switch_off_a(&mut self, group: &str, device: u8) -> Result<(), Error<S::Error>> {
        self.transmit(&codeword::dip_switch(group, device, State::Off)?)
    }

    /// Switches on `channel` of a rotary remote set to `address`.
    pub fn switch_on_b(&mut self, address: u8, channel: u8) -> Result<(), Error<S::Error>> {
        self.transmit(&codeword::rotary(address, channel, State::On)?)
    }

    /// Switches off `channel` of a rotary remote set to `address`.
    pub fn switch_off_b(&mut self, address: u8, channel: u8) -> Result<(), Error<S::Error>> {
        self.transmit(&codeword::rotary(address, channel, State::Off)?)
    }

    /// Switches on `device` in `group` of Intertechno family `family`.
    pub fn switch_on_c(
        &mut self,
        family: char,
        group: u8,
        device: u8,
    ) -> Result<(), Error<S::Error>> {
        self.transmit(&codeword::intertechno(family, group, device, State::On)?)
    }

    /// Switches off `device` in `group` of Intertechno family `family`.
    pub fn switch_off_c(
        &mut self,
        family: char,
        group: u8,
        device: u8,
    ) -> Result<(), Error<S::Error>> {
        self.transmit(&codeword::intertechno(family, group, device, State::Off)?)
    }

    /// The sink pulses are emitted to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink, e.g. to drain a [`Recorder`](crate::sink::Recorder).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the transmitter, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
