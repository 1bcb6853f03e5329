//! Tri-state codewords for DIP-switch, rotary and Intertechno remotes.
//!
//! Cheap 433 MHz power sockets are addressed through encoder chips such as the
//! PT2262, whose address and data pins are wired high, low or left open. A
//! command is therefore a fixed-length sequence of tri-state [`Symbol`]s, and
//! this module maps the human-facing addressing of each remote family onto it.
//!
//! ## Address schemes
//!
//! | Remote | Inputs                          | Layout                                   | Length |
//! |--------|---------------------------------|------------------------------------------|--------|
//! | A      | 5 DIP switches, device 1..4     | group, device selector, state            | 11     |
//! | B      | rotary address 1..4, channel 1..4 | address selector, channel selector, state | 10     |
//! | C      | family `a..p`, group 1..4, device 1..4 | family, device, group, marker, state | 12     |
//!
//! A *selector* is four symbols with a `0` at the selected position and the
//! other three floating. The A and B state suffix is `0F` for on and `F0` for
//! off; Intertechno remotes use `FF` and `F0`.
//!
//! ## Functions
//!
//! - [`dip_switch`]: remote A
//! - [`rotary`]: remote B
//! - [`intertechno`]: remote C
//! - [`Address::codeword`]: dispatch over a configured [`Address`]
//!
//! All builders are pure; none of them emit pulses.

use core::fmt;
use core::str::FromStr;

use heapless::Vec;

use crate::consts::{CODEWORD_CAPACITY, GROUP_CODE_LEN, MAX_SELECTOR, MIN_SELECTOR};
use crate::error::EncodeError;

/// One position of a tri-state codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Symbol {
    /// Pin tied low, or a switch in the "off" position.
    Zero,
    /// Pin tied high, or a switch in the "on" position.
    One,
    /// Pin left open.
    Float,
}

impl Symbol {
    /// The conventional single-character spelling: `0`, `1` or `F`.
    pub const fn as_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Float => 'F',
        }
    }
}

/// Desired state of the addressed socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum State {
    /// Switch on
    On,
    /// Switch off
    Off,
}

impl State {
    /// Short lowercase name, as used in timing table keys.
    pub const fn name(self) -> &'static str {
        match self {
            State::On => "on",
            State::Off => "off",
        }
    }
}

impl From<bool> for State {
    fn from(on: bool) -> Self {
        if on { State::On } else { State::Off }
    }
}

use Symbol::{Float as F, Zero as O};

static SELECTORS: [[Symbol; 4]; MAX_SELECTOR as usize] = [
    [O, F, F, F],
    [F, O, F, F],
    [F, F, O, F],
    [F, F, F, O],
];

static STATE_ON: [Symbol; 2] = [O, F];
static STATE_OFF: [Symbol; 2] = [F, O];

static INTERTECHNO_MARKER: [Symbol; 2] = [O, F];
static INTERTECHNO_ON: [Symbol; 2] = [F, F];
static INTERTECHNO_OFF: [Symbol; 2] = [F, O];

fn selector(index: u8) -> Option<&'static [Symbol; 4]> {
    SELECTORS.get(usize::from(index.checked_sub(MIN_SELECTOR)?))
}

fn state_suffix(state: State) -> &'static [Symbol; 2] {
    match state {
        State::On => &STATE_ON,
        State::Off => &STATE_OFF,
    }
}

/// An ordered, bounded sequence of tri-state symbols.
///
/// Codewords are only produced by the builders in this module, so their length
/// is always the fixed length of the address scheme that built them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Codeword {
    symbols: Vec<Symbol, CODEWORD_CAPACITY>,
}

impl Codeword {
    fn append(&mut self, symbols: &[Symbol]) {
        // Lengths are fixed per scheme and well below capacity.
        let _ = self.symbols.extend_from_slice(symbols);
    }

    fn append_bits(&mut self, value: u8, width: u8) {
        for bit in 0..width {
            let symbol = if (value >> bit) & 1 == 1 { F } else { O };
            self.append(&[symbol]);
        }
    }

    /// The symbols in transmission order.
    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the codeword holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates the symbols in transmission order.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().copied()
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.iter() {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

/// The five DIP switches of an A-type remote, `'1'` meaning closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct GroupCode([Symbol; GROUP_CODE_LEN]);

impl GroupCode {
    /// Parses a group code such as `"00010"`.
    pub fn parse(code: &str) -> Result<Self, EncodeError> {
        if code.len() != GROUP_CODE_LEN {
            return Err(EncodeError::InvalidGroupCode);
        }
        let mut symbols = [O; GROUP_CODE_LEN];
        for (slot, byte) in symbols.iter_mut().zip(code.bytes()) {
            *slot = match byte {
                b'0' => Symbol::Zero,
                b'1' => Symbol::One,
                _ => return Err(EncodeError::InvalidGroupCode),
            };
        }
        Ok(Self(symbols))
    }

    /// Builds the codeword switching `device` of this group.
    pub fn codeword(&self, device: u8, state: State) -> Result<Codeword, EncodeError> {
        let device_selector = selector(device).ok_or(EncodeError::InvalidDevice(device))?;
        let mut codeword = Codeword::default();
        codeword.append(&self.0);
        codeword.append(device_selector);
        codeword.append(state_suffix(state));
        Ok(codeword)
    }
}

impl FromStr for GroupCode {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Codeword for an A-type remote with 10-pole DIP switches.
///
/// # Arguments
/// - `group`: the five group switches, e.g. `"11111"` when all are on
/// - `device`: socket `1..=4`
pub fn dip_switch(group: &str, device: u8, state: State) -> Result<Codeword, EncodeError> {
    GroupCode::parse(group)?.codeword(device, state)
}

/// Codeword for a B-type remote with two rotary or sliding switches.
///
/// # Arguments
/// - `address`: position of the first switch, `1..=4`
/// - `channel`: position of the second switch, `1..=4`
pub fn rotary(address: u8, channel: u8, state: State) -> Result<Codeword, EncodeError> {
    let address_selector = selector(address).ok_or(EncodeError::InvalidAddress(address))?;
    let channel_selector = selector(channel).ok_or(EncodeError::InvalidDevice(channel))?;
    let mut codeword = Codeword::default();
    codeword.append(address_selector);
    codeword.append(channel_selector);
    codeword.append(state_suffix(state));
    Ok(codeword)
}

/// Codeword for a C-type (Intertechno) remote.
///
/// The family letter, device and group are each written least significant
/// bit first, a set bit floating and a clear bit tied low.
///
/// # Arguments
/// - `family`: family code `'a'..='p'`
/// - `group`: group `1..=4`
/// - `device`: device `1..=4`
pub fn intertechno(
    family: char,
    group: u8,
    device: u8,
    state: State,
) -> Result<Codeword, EncodeError> {
    if !('a'..='p').contains(&family) {
        return Err(EncodeError::InvalidFamily(family));
    }
    if !(MIN_SELECTOR..=MAX_SELECTOR).contains(&group) {
        return Err(EncodeError::InvalidAddress(group));
    }
    if !(MIN_SELECTOR..=MAX_SELECTOR).contains(&device) {
        return Err(EncodeError::InvalidDevice(device));
    }
    // `family` is ASCII here.
    let family_code = family as u8 - b'a';

    let mut codeword = Codeword::default();
    codeword.append_bits(family_code, 4);
    codeword.append_bits(device - MIN_SELECTOR, 2);
    codeword.append_bits(group - MIN_SELECTOR, 2);
    codeword.append(&INTERTECHNO_MARKER);
    codeword.append(match state {
        State::On => &INTERTECHNO_ON,
        State::Off => &INTERTECHNO_OFF,
    });
    Ok(codeword)
}

/// The fixed part of a remote's addressing, one variant per remote type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Address {
    /// Remote A: DIP-switch group
    DipSwitch(GroupCode),
    /// Remote B: rotary address `1..=4`
    Rotary(u8),
    /// Remote C: Intertechno family letter and group
    Intertechno {
        /// Family code `'a'..='p'`
        family: char,
        /// Group `1..=4`
        group: u8,
    },
}

impl Address {
    /// Parses the address of a remote given its type letter.
    ///
    /// | kind | code example | meaning                   |
    /// |------|--------------|---------------------------|
    /// | `A`  | `"00010"`    | DIP-switch group          |
    /// | `B`  | `"3"`        | rotary address            |
    /// | `C`  | `"b2"`       | family `b`, group 2       |
    ///
    /// Any other kind fails with [`EncodeError::UnsupportedProtocolFamily`].
    /// A B or C code without a readable number fails with
    /// [`EncodeError::MalformedAddress`].
    pub fn parse(kind: char, code: &str) -> Result<Self, EncodeError> {
        match kind {
            'A' => GroupCode::parse(code).map(Address::DipSwitch),
            'B' => {
                let address = code.parse().map_err(|_| EncodeError::MalformedAddress)?;
                let _ = selector(address).ok_or(EncodeError::InvalidAddress(address))?;
                Ok(Address::Rotary(address))
            }
            'C' => {
                let mut chars = code.chars();
                let family = chars.next().ok_or(EncodeError::MalformedAddress)?;
                let group = chars
                    .as_str()
                    .parse()
                    .map_err(|_| EncodeError::MalformedAddress)?;
                // Validates family and group.
                let _ = intertechno(family, group, MIN_SELECTOR, State::On)?;
                Ok(Address::Intertechno { family, group })
            }
            other => Err(EncodeError::UnsupportedProtocolFamily(other)),
        }
    }

    /// The remote type letter of this address.
    pub const fn kind(&self) -> char {
        match self {
            Address::DipSwitch(_) => 'A',
            Address::Rotary(_) => 'B',
            Address::Intertechno { .. } => 'C',
        }
    }

    /// Builds the codeword switching `device` at this address.
    pub fn codeword(&self, device: u8, state: State) -> Result<Codeword, EncodeError> {
        match *self {
            Address::DipSwitch(ref group) => group.codeword(device, state),
            Address::Rotary(address) => rotary(address, device, state),
            Address::Intertechno { family, group } => intertechno(family, group, device, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{
        DIP_SWITCH_CODEWORD_LEN as DIP_SWITCH_LEN, INTERTECHNO_CODEWORD_LEN as INTERTECHNO_LEN,
        ROTARY_CODEWORD_LEN as ROTARY_LEN,
    };

    #[test]
    fn test_dip_switch_layout() {
        let on = dip_switch("00010", 3, State::On).unwrap();
        assert_eq!(on.to_string(), "00010FF0F0F");
        assert_eq!(on.len(), DIP_SWITCH_LEN);

        let off = dip_switch("00010", 3, State::Off).unwrap();
        assert_eq!(off.to_string(), "00010FF0FF0");
        assert_eq!(on.as_slice()[..9], off.as_slice()[..9]);
        assert_ne!(on.as_slice()[9..], off.as_slice()[9..]);
    }

    #[test]
    fn test_dip_switch_length_is_constant() {
        for group in ["00000", "11111", "10101"] {
            for device in 1..=4 {
                for state in [State::On, State::Off] {
                    let codeword = dip_switch(group, device, state).unwrap();
                    assert_eq!(codeword.len(), DIP_SWITCH_LEN);
                    assert_eq!(&codeword.as_slice()[9..], state_suffix(state));
                }
            }
        }
    }

    #[test]
    fn test_device_selector_has_single_active_position() {
        for device in 1..=4u8 {
            let codeword = dip_switch("11111", device, State::On).unwrap();
            let selector = &codeword.as_slice()[5..9];
            assert_eq!(selector.iter().filter(|&&s| s == Symbol::Zero).count(), 1);
            assert_eq!(selector[usize::from(device - 1)], Symbol::Zero);
        }
    }

    #[test]
    fn test_dip_switch_rejects_bad_input() {
        assert_eq!(
            dip_switch("00010", 0, State::On),
            Err(EncodeError::InvalidDevice(0))
        );
        assert_eq!(
            dip_switch("00010", 5, State::Off),
            Err(EncodeError::InvalidDevice(5))
        );
        assert_eq!(
            dip_switch("0001", 1, State::On),
            Err(EncodeError::InvalidGroupCode)
        );
        assert_eq!(
            dip_switch("000102", 1, State::On),
            Err(EncodeError::InvalidGroupCode)
        );
        assert_eq!(
            dip_switch("0F010", 1, State::On),
            Err(EncodeError::InvalidGroupCode)
        );
    }

    #[test]
    fn test_rotary_layout() {
        let codeword = rotary(2, 4, State::On).unwrap();
        assert_eq!(codeword.to_string(), "F0FFFFF00F");
        assert_eq!(
            rotary(2, 4, State::Off).unwrap().to_string(),
            "F0FFFFF0F0"
        );
        assert_eq!(rotary(0, 1, State::On), Err(EncodeError::InvalidAddress(0)));
        assert_eq!(rotary(1, 5, State::On), Err(EncodeError::InvalidDevice(5)));
    }

    #[test]
    fn test_rotary_length_is_constant() {
        for address in 1..=4 {
            for channel in 1..=4 {
                for state in [State::On, State::Off] {
                    let codeword = rotary(address, channel, state).unwrap();
                    let symbols = codeword.as_slice();
                    assert_eq!(codeword.len(), ROTARY_LEN);
                    assert_eq!(Some(&symbols[..4]), selector(address).map(|s| &s[..]));
                    assert_eq!(Some(&symbols[4..8]), selector(channel).map(|s| &s[..]));
                    assert_eq!(&symbols[8..], state_suffix(state));
                }
            }
        }
    }

    #[test]
    fn test_intertechno_length_is_constant() {
        for family in 'a'..='p' {
            for group in 1..=4 {
                for device in 1..=4 {
                    let on = intertechno(family, group, device, State::On).unwrap();
                    let off = intertechno(family, group, device, State::Off).unwrap();
                    assert_eq!(on.len(), INTERTECHNO_LEN);
                    assert_eq!(off.len(), INTERTECHNO_LEN);
                    assert_eq!(on.as_slice()[..10], off.as_slice()[..10]);
                    assert_eq!(on.as_slice()[8..10], INTERTECHNO_MARKER);
                    assert_eq!(on.as_slice()[10..], INTERTECHNO_ON);
                    assert_eq!(off.as_slice()[10..], INTERTECHNO_OFF);
                    assert!(on.iter().all(|s| s != Symbol::One));
                }
            }
        }
    }

    #[test]
    fn test_intertechno_layout() {
        // family 'c' = 2 = 0b0010, device 2 -> 1 = 0b01, group 3 -> 2 = 0b10
        let codeword = intertechno('c', 3, 2, State::On).unwrap();
        assert_eq!(codeword.to_string(), "0F00F00F0FFF");
        assert_eq!(codeword.len(), INTERTECHNO_LEN);
        assert_eq!(
            intertechno('c', 3, 2, State::Off).unwrap().to_string(),
            "0F00F00F0FF0"
        );
        assert_eq!(
            intertechno('a', 1, 1, State::On).unwrap().to_string(),
            "000000000FFF"
        );
        assert_eq!(
            intertechno('p', 4, 4, State::On).unwrap().to_string(),
            "FFFFFFFF0FFF"
        );
    }

    #[test]
    fn test_intertechno_rejects_bad_input() {
        assert_eq!(
            intertechno('q', 1, 1, State::On),
            Err(EncodeError::InvalidFamily('q'))
        );
        assert_eq!(
            intertechno('A', 1, 1, State::On),
            Err(EncodeError::InvalidFamily('A'))
        );
        assert_eq!(
            intertechno('a', 5, 1, State::On),
            Err(EncodeError::InvalidAddress(5))
        );
        assert_eq!(
            intertechno('a', 1, 0, State::On),
            Err(EncodeError::InvalidDevice(0))
        );
    }

    #[test]
    fn test_builders_are_pure() {
        assert_eq!(
            dip_switch("10101", 2, State::On),
            dip_switch("10101", 2, State::On)
        );
        assert_eq!(
            intertechno('f', 2, 4, State::Off),
            intertechno('f', 2, 4, State::Off)
        );
    }

    #[test]
    fn test_address_parse_and_dispatch() {
        let a = Address::parse('A', "00010").unwrap();
        assert_eq!(a.kind(), 'A');
        assert_eq!(
            a.codeword(3, State::On),
            dip_switch("00010", 3, State::On)
        );

        let b = Address::parse('B', "3").unwrap();
        assert_eq!(b, Address::Rotary(3));
        assert_eq!(b.codeword(1, State::Off), rotary(3, 1, State::Off));

        let c = Address::parse('C', "b2").unwrap();
        assert_eq!(
            c,
            Address::Intertechno {
                family: 'b',
                group: 2
            }
        );
        assert_eq!(
            c.codeword(4, State::On),
            intertechno('b', 2, 4, State::On)
        );
    }

    #[test]
    fn test_address_parse_errors() {
        assert_eq!(
            Address::parse('D', "00010"),
            Err(EncodeError::UnsupportedProtocolFamily('D'))
        );
        assert_eq!(Address::parse('B', "x"), Err(EncodeError::MalformedAddress));
        assert_eq!(Address::parse('B', "300"), Err(EncodeError::MalformedAddress));
        assert_eq!(Address::parse('B', ""), Err(EncodeError::MalformedAddress));
        assert_eq!(Address::parse('B', "7"), Err(EncodeError::InvalidAddress(7)));
        assert_eq!(
            Address::parse('C', "z1"),
            Err(EncodeError::InvalidFamily('z'))
        );
        assert_eq!(Address::parse('C', ""), Err(EncodeError::MalformedAddress));
        assert_eq!(Address::parse('C', "b"), Err(EncodeError::MalformedAddress));
        assert_eq!(Address::parse('C', "bx"), Err(EncodeError::MalformedAddress));
        assert_eq!(Address::parse('C', "b0"), Err(EncodeError::InvalidAddress(0)));
        assert_eq!(Address::parse('A', "2"), Err(EncodeError::InvalidGroupCode));
    }

    #[test]
    fn test_state_from_bool() {
        assert_eq!(State::from(true), State::On);
        assert_eq!(State::from(false).name(), "off");
    }
}
