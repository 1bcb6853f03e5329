//! Pulse-timing grammars of the supported 433 MHz remote protocols.
//!
//! A [`Protocol`] describes how a codeword turns into carrier on/off periods:
//! a base time unit in microseconds, a sync pattern sent at the start of every
//! repetition, and the pulse pattern of each tri-state [`Symbol`]. All pulse
//! widths are expressed as multiples of the base unit, so changing the unit
//! rescales a whole transmission uniformly.
//!
//! ## Built-in table
//!
//! | id | unit (µs) | sync  | zero | one | inverted |
//! |----|-----------|-------|------|-----|----------|
//! |  1 |       350 | 1,31  | 1,3  | 3,1 | no       |
//! |  2 |       650 | 1,10  | 1,2  | 2,1 | no       |
//! |  3 |       100 | 30,71 | 4,11 | 9,6 | no       |
//! |  4 |       380 | 1,6   | 1,3  | 3,1 | no       |
//! |  5 |       500 | 6,14  | 1,2  | 2,1 | no       |
//! |  6 |       450 | 23,1  | 1,2  | 2,1 | yes      |
//! |  7 |       150 | 2,62  | 1,6  | 6,1 | no       |
//!
//! Protocols 1–5 and 7 are PT2262-compatible tri-state encoders: a `0` symbol
//! is two zero bits, a `1` symbol is two one bits and a floating symbol is a
//! zero bit followed by a one bit. Protocol 6 (HT6P20B) is a plain binary
//! encoder with no floating symbol.

use crate::codeword::Symbol;
use crate::consts::DEFAULT_PROTOCOL;
use crate::error::EncodeError;

/// One high period followed by one low period, in multiples of the base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct PulsePair {
    /// Carrier-on multiple
    pub high: u8,
    /// Carrier-off multiple
    pub low: u8,
}

impl PulsePair {
    /// Creates a pulse pair from its high and low multiples.
    pub const fn new(high: u8, low: u8) -> Self {
        Self { high, low }
    }
}

/// An immutable protocol definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Protocol {
    /// Registry identifier
    pub id: u8,
    /// Default base unit in microseconds
    pub pulse_length: u32,
    /// Pattern sent once at the start of every repetition
    pub sync: PulsePair,
    /// Pattern of a [`Symbol::Zero`]
    pub zero: &'static [PulsePair],
    /// Pattern of a [`Symbol::One`]
    pub one: &'static [PulsePair],
    /// Pattern of a [`Symbol::Float`], if the encoder has one
    pub float: Option<&'static [PulsePair]>,
    /// Carrier-off first: the high multiple is emitted as a low level and
    /// vice versa.
    pub inverted: bool,
}

impl Protocol {
    /// Returns the pulse pattern for `symbol`, or `None` if this protocol
    /// cannot render it.
    pub fn pattern(&self, symbol: Symbol) -> Option<&'static [PulsePair]> {
        match symbol {
            Symbol::Zero => Some(self.zero),
            Symbol::One => Some(self.one),
            Symbol::Float => self.float,
        }
    }

    /// Like [`pattern`](Self::pattern), but reports a missing pattern as an error.
    pub fn require(&self, symbol: Symbol) -> Result<&'static [PulsePair], EncodeError> {
        self.pattern(symbol)
            .ok_or(EncodeError::UnsupportedSymbolForProtocol {
                symbol,
                protocol: self.id,
            })
    }

    /// The largest multiple of the base unit any pulse of this protocol uses.
    pub fn max_multiple(&self) -> u8 {
        let sync = [self.sync];
        [&sync[..], self.zero, self.one, self.float.unwrap_or(&[])]
            .into_iter()
            .flatten()
            .flat_map(|pair| [pair.high, pair.low])
            .max()
            .unwrap_or(0)
    }

    /// Checks that `pulse_length` is positive and that every pulse of this
    /// protocol, scaled by it, fits in a `u32`.
    pub fn check_pulse_length(&self, pulse_length: u32) -> Result<u32, EncodeError> {
        match u32::from(self.max_multiple()).checked_mul(pulse_length) {
            Some(_) if pulse_length > 0 => Ok(pulse_length),
            _ => Err(EncodeError::InvalidPulseLength),
        }
    }
}

macro_rules! pair {
    ($high:literal, $low:literal) => {
        PulsePair {
            high: $high,
            low: $low,
        }
    };
}

// Symbol patterns of a PT2262 protocol: 0 = zero zero, 1 = one one, F = zero one.
macro_rules! tristate_protocol {
    ($id:literal, $len:literal, sync($sh:literal, $sl:literal), zero($zh:literal, $zl:literal), one($oh:literal, $ol:literal)) => {
        Protocol {
            id: $id,
            pulse_length: $len,
            sync: pair!($sh, $sl),
            zero: &[pair!($zh, $zl), pair!($zh, $zl)],
            one: &[pair!($oh, $ol), pair!($oh, $ol)],
            float: Some(&[pair!($zh, $zl), pair!($oh, $ol)]),
            inverted: false,
        }
    };
}

static BUILTIN: [Protocol; 7] = [
    tristate_protocol!(1, 350, sync(1, 31), zero(1, 3), one(3, 1)),
    tristate_protocol!(2, 650, sync(1, 10), zero(1, 2), one(2, 1)),
    tristate_protocol!(3, 100, sync(30, 71), zero(4, 11), one(9, 6)),
    tristate_protocol!(4, 380, sync(1, 6), zero(1, 3), one(3, 1)),
    tristate_protocol!(5, 500, sync(6, 14), zero(1, 2), one(2, 1)),
    // HT6P20B
    Protocol {
        id: 6,
        pulse_length: 450,
        sync: pair!(23, 1),
        zero: &[pair!(1, 2)],
        one: &[pair!(2, 1)],
        float: None,
        inverted: true,
    },
    // HS2303-PT
    tristate_protocol!(7, 150, sync(2, 62), zero(1, 6), one(6, 1)),
];

/// An immutable set of protocol definitions, looked up by identifier.
///
/// The registry is handed to a [`Transmitter`](crate::transmitter::Transmitter)
/// at construction instead of living in global state, so callers may supply
/// their own table alongside or instead of [`ProtocolRegistry::builtin`].
#[derive(Debug, Clone, Copy)]
pub struct ProtocolRegistry<'a> {
    protocols: &'a [Protocol],
}

impl<'a> ProtocolRegistry<'a> {
    /// Creates a registry over a caller-provided table.
    pub const fn new(protocols: &'a [Protocol]) -> Self {
        Self { protocols }
    }

    /// Returns the protocol with identifier `id`.
    pub fn get(&self, id: u8) -> Result<&'a Protocol, EncodeError> {
        self.protocols
            .iter()
            .find(|protocol| protocol.id == id)
            .ok_or(EncodeError::UnsupportedProtocol(id))
    }

    /// Returns protocol [`DEFAULT_PROTOCOL`].
    pub fn default_protocol(&self) -> Result<&'a Protocol, EncodeError> {
        self.get(DEFAULT_PROTOCOL)
    }

    /// Iterates the table in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Protocol> + 'a {
        self.protocols.iter()
    }
}

impl ProtocolRegistry<'static> {
    /// The canonical RCSwitch protocol table.
    pub fn builtin() -> Self {
        Self {
            protocols: &BUILTIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = ProtocolRegistry::builtin();
        for id in 1..=7 {
            assert_eq!(registry.get(id).map(|p| p.id), Ok(id));
        }
        assert_eq!(registry.get(0), Err(EncodeError::UnsupportedProtocol(0)));
        assert_eq!(registry.get(8), Err(EncodeError::UnsupportedProtocol(8)));
    }

    #[test]
    fn test_default_protocol_timings() {
        let protocol = ProtocolRegistry::builtin().default_protocol().unwrap();
        assert_eq!(protocol.pulse_length, 350);
        assert_eq!(protocol.sync, PulsePair::new(1, 31));
        assert_eq!(protocol.zero, &[PulsePair::new(1, 3); 2]);
        assert_eq!(protocol.one, &[PulsePair::new(3, 1); 2]);
        assert_eq!(
            protocol.float,
            Some(&[PulsePair::new(1, 3), PulsePair::new(3, 1)][..])
        );
        assert!(!protocol.inverted);
        assert_eq!(protocol.max_multiple(), 31);
    }

    #[test]
    fn test_pulse_length_bounds() {
        let registry = ProtocolRegistry::builtin();
        let protocol = registry.default_protocol().unwrap();
        assert_eq!(
            protocol.check_pulse_length(0),
            Err(EncodeError::InvalidPulseLength)
        );
        assert_eq!(protocol.check_pulse_length(u32::MAX / 31), Ok(u32::MAX / 31));
        assert_eq!(
            protocol.check_pulse_length(u32::MAX / 31 + 1),
            Err(EncodeError::InvalidPulseLength)
        );
        // Protocol 3 has the widest sync: 71 units.
        assert_eq!(registry.get(3).unwrap().max_multiple(), 71);
        for protocol in registry.iter() {
            assert_eq!(
                protocol.check_pulse_length(protocol.pulse_length),
                Ok(protocol.pulse_length)
            );
        }
    }

    #[test]
    fn test_binary_protocol_rejects_float() {
        let protocol = ProtocolRegistry::builtin().get(6).unwrap();
        assert!(protocol.inverted);
        assert_eq!(
            protocol.pattern(Symbol::Zero),
            Some(&[PulsePair::new(1, 2)][..])
        );
        assert_eq!(
            protocol.require(Symbol::Float),
            Err(EncodeError::UnsupportedSymbolForProtocol {
                symbol: Symbol::Float,
                protocol: 6
            })
        );
    }

    #[test]
    fn test_custom_registry() {
        static TABLE: [Protocol; 1] = [tristate_protocol!(
            42,
            200,
            sync(1, 20),
            zero(1, 2),
            one(2, 1)
        )];
        let registry = ProtocolRegistry::new(&TABLE);
        assert_eq!(registry.iter().count(), 1);
        assert_eq!(registry.get(42).unwrap().pulse_length, 200);
        assert_eq!(
            registry.default_protocol(),
            Err(EncodeError::UnsupportedProtocol(1))
        );
    }
}
