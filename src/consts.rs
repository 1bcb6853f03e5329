//! Constants shared by the codeword builders and the transmitter.
//!
//! ## Key Concepts
//!
//! - **Selectors**: device, channel and address indices are all `1..=4`.
//! - **Codeword lengths**: fixed per address scheme, never longer than
//!   [`CODEWORD_CAPACITY`].
//! - **Defaults**: a fresh transmitter uses protocol [`DEFAULT_PROTOCOL`] at
//!   its own base unit and sends each codeword [`DEFAULT_REPEAT_TRANSMIT`] time.

/// Protocol selected by a freshly constructed transmitter.
pub const DEFAULT_PROTOCOL: u8 = 1;

/// Repeat count of a freshly constructed transmitter.
pub const DEFAULT_REPEAT_TRANSMIT: u16 = 1;

/// Lowest valid device, channel, address or group index.
pub const MIN_SELECTOR: u8 = 1;

/// Highest valid device, channel, address or group index.
pub const MAX_SELECTOR: u8 = 4;

/// Number of DIP switches that make up a group code.
pub const GROUP_CODE_LEN: usize = 5;

/// Codeword length of a DIP-switch remote: group, device selector, state.
pub const DIP_SWITCH_CODEWORD_LEN: usize = GROUP_CODE_LEN + 4 + 2;

/// Codeword length of a rotary remote: address selector, channel selector, state.
pub const ROTARY_CODEWORD_LEN: usize = 4 + 4 + 2;

/// Codeword length of an Intertechno remote: family, device, group, marker, state.
pub const INTERTECHNO_CODEWORD_LEN: usize = 4 + 2 + 2 + 2 + 2;

/// Upper bound on the length of any codeword.
pub const CODEWORD_CAPACITY: usize = 16;

/// Pulses a [`Recorder`](crate::sink::Recorder) can hold without `std`.
///
/// One repetition of the longest codeword under a tri-state protocol is
/// `2 + 12 * 4 = 50` pulses.
pub const RECORDER_CAPACITY: usize = 256;
