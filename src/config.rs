//! Remote configuration: which socket family to talk to, and how.
//!
//! A [`RemoteConfig`] captures everything needed to control one physical
//! remote: its [`Address`], plus optional protocol, pulse length and repeat
//! overrides. [`RemoteConfig::remote`] turns it into a [`Remote`] that only
//! needs a device index and a [`State`] per command.
//!
//! ```rust
//! use rcswitch433::codeword::{Address, State};
//! use rcswitch433::config::RemoteConfig;
//! use rcswitch433::protocol::ProtocolRegistry;
//! use rcswitch433::sink::Recorder;
//!
//! let config = RemoteConfig::new(Address::parse('A', "00010").unwrap()).with_repeat(4);
//! let mut remote = config.remote(ProtocolRegistry::builtin(), Recorder::new()).unwrap();
//! remote.send(3, State::On).unwrap();
//! ```

use crate::codeword::{Address, State};
use crate::consts::DEFAULT_REPEAT_TRANSMIT;
use crate::error::{EncodeError, Error};
use crate::protocol::ProtocolRegistry;
use crate::sink::PulseSink;
use crate::transmitter::Transmitter;

/// Addressing and timing of one remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct RemoteConfig {
    /// Fixed part of the remote's address
    pub address: Address,
    /// Protocol identifier, or the registry default
    pub protocol: Option<u8>,
    /// Base pulse length override in microseconds, or the protocol default
    pub pulse_length: Option<u32>,
    /// Repeat count, or [`DEFAULT_REPEAT_TRANSMIT`]
    pub repeat: Option<u16>,
}

impl RemoteConfig {
    /// A configuration with default protocol, pulse length and repeat count.
    pub const fn new(address: Address) -> Self {
        Self {
            address,
            protocol: None,
            pulse_length: None,
            repeat: None,
        }
    }

    /// Selects a protocol by identifier.
    pub const fn with_protocol(mut self, id: u8) -> Self {
        self.protocol = Some(id);
        self
    }

    /// Overrides the base pulse length.
    pub const fn with_pulse_length(mut self, pulse_length: u32) -> Self {
        self.pulse_length = Some(pulse_length);
        self
    }

    /// Sets the repeat count.
    pub const fn with_repeat(mut self, repeat: u16) -> Self {
        self.repeat = Some(repeat);
        self
    }

    /// Builds a configured [`Remote`] emitting to `sink`.
    ///
    /// The protocol is applied before the pulse length, so an explicit pulse
    /// length always wins over the protocol default.
    pub fn remote<'r, S>(
        &self,
        registry: ProtocolRegistry<'r>,
        sink: S,
    ) -> Result<Remote<'r, S>, EncodeError>
    where
        S: PulseSink,
    {
        let mut transmitter = Transmitter::new(registry, sink)?;
        transmitter.set_repeat_transmit(self.repeat.unwrap_or(DEFAULT_REPEAT_TRANSMIT))?;
        if let Some(id) = self.protocol {
            transmitter.set_protocol(id)?;
        }
        if let Some(pulse_length) = self.pulse_length {
            transmitter.set_pulse_length(pulse_length)?;
        }
        debug!("remote of type {} configured", self.address.kind());
        Ok(Remote {
            address: self.address,
            transmitter,
        })
    }
}

/// A transmitter bound to one remote's address.
#[derive(Debug)]
pub struct Remote<'r, S>
where
    S: PulseSink,
{
    address: Address,
    transmitter: Transmitter<'r, S>,
}

impl<'r, S> Remote<'r, S>
where
    S: PulseSink,
{
    /// Switches `device` of this remote to `state`.
    pub fn send(&mut self, device: u8, state: State) -> Result<(), Error<S::Error>> {
        self.transmitter.switch(&self.address, device, state)
    }

    /// The remote's address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The underlying transmitter.
    pub fn transmitter(&self) -> &Transmitter<'r, S> {
        &self.transmitter
    }

    /// Mutable access to the underlying transmitter.
    pub fn transmitter_mut(&mut self) -> &mut Transmitter<'r, S> {
        &mut self.transmitter
    }

    /// Consumes the remote, returning its transmitter.
    pub fn into_transmitter(self) -> Transmitter<'r, S> {
        self.transmitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codeword;
    use crate::sink::Recorder;

    #[test]
    fn test_remote_defaults() {
        let config = RemoteConfig::new(Address::Rotary(2));
        let remote = config
            .remote(ProtocolRegistry::builtin(), Recorder::new())
            .unwrap();
        let settings = remote.transmitter().config();
        assert_eq!(settings.protocol().id, 1);
        assert_eq!(settings.pulse_length(), 350);
        assert_eq!(settings.repeat(), 1);
        assert_eq!(remote.address(), &Address::Rotary(2));
    }

    #[test]
    fn test_pulse_length_overrides_protocol_default() {
        let config = RemoteConfig::new(Address::Rotary(2))
            .with_pulse_length(300)
            .with_protocol(5)
            .with_repeat(3);
        let remote = config
            .remote(ProtocolRegistry::builtin(), Recorder::new())
            .unwrap();
        let settings = remote.transmitter().config();
        assert_eq!(settings.protocol().id, 5);
        assert_eq!(settings.pulse_length(), 300);
        assert_eq!(settings.repeat(), 3);
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        let address = Address::parse('A', "11111").unwrap();
        let registry = ProtocolRegistry::builtin();
        assert_eq!(
            RemoteConfig::new(address)
                .with_protocol(0)
                .remote(registry, Recorder::new())
                .err(),
            Some(EncodeError::UnsupportedProtocol(0))
        );
        assert_eq!(
            RemoteConfig::new(address)
                .with_pulse_length(0)
                .remote(registry, Recorder::new())
                .err(),
            Some(EncodeError::InvalidPulseLength)
        );
        assert_eq!(
            RemoteConfig::new(address)
                .with_repeat(0)
                .remote(registry, Recorder::new())
                .err(),
            Some(EncodeError::InvalidRepeatCount)
        );
    }

    #[test]
    fn test_send_matches_transmitter_entry_points() {
        let config = RemoteConfig::new(Address::parse('C', "e3").unwrap());
        let mut remote = config
            .remote(ProtocolRegistry::builtin(), Recorder::new())
            .unwrap();
        remote.send(4, State::On).unwrap();
        let sent = remote.transmitter_mut().sink_mut().take();

        let mut transmitter = remote.into_transmitter();
        transmitter.switch_on_c('e', 3, 4).unwrap();
        assert_eq!(sent, transmitter.sink().pulses());

        let codeword = codeword::intertechno('e', 3, 4, State::On).unwrap();
        assert_eq!(
            transmitter.pulses_per_transmission(&codeword),
            Ok(sent.len())
        );
    }

    #[test]
    fn test_send_rejects_invalid_device() {
        let config = RemoteConfig::new(Address::Rotary(1));
        let mut remote = config
            .remote(ProtocolRegistry::builtin(), Recorder::new())
            .unwrap();
        assert_eq!(
            remote.send(5, State::Off),
            Err(Error::Encode(EncodeError::InvalidDevice(5)))
        );
        assert!(remote.transmitter().sink().pulses().is_empty());
    }
}
