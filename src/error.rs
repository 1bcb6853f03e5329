//! Error types for codeword building and pulse transmission.
//!
//! Every failure in this crate is deterministic: encoding is a pure function of
//! its inputs, so the same call always fails the same way and nothing is retried.
//! Errors are raised before the first pulse leaves the encoder, with the single
//! exception of [`Error::Sink`], which reports a failure of the pulse sink itself.

use thiserror::Error;

use crate::codeword::Symbol;

/// Errors raised while building a codeword or configuring a transmitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum EncodeError {
    /// The device (or channel) index is outside `1..=4`.
    #[error("device index {0} is outside 1..=4")]
    InvalidDevice(u8),
    /// The rotary address or Intertechno group number is outside `1..=4`.
    #[error("address {0} is outside 1..=4")]
    InvalidAddress(u8),
    /// A DIP-switch group code is not exactly five `'0'`/`'1'` characters.
    #[error("group code must be exactly 5 characters of '0' or '1'")]
    InvalidGroupCode,
    /// A rotary or Intertechno address code is empty or not a number.
    #[error("address code is empty or not a number")]
    MalformedAddress,
    /// An Intertechno family letter is outside `'a'..='p'`.
    #[error("family code {0:?} is outside 'a'..='p'")]
    InvalidFamily(char),
    /// No protocol with this identifier exists in the registry.
    #[error("protocol {0} is not in the registry")]
    UnsupportedProtocol(u8),
    /// The remote type letter does not name a known address scheme.
    #[error("remote type {0:?} is not one of 'A', 'B' or 'C'")]
    UnsupportedProtocolFamily(char),
    /// The codeword holds a symbol the active protocol has no pulse pattern for.
    #[error("protocol {protocol} cannot render symbol {symbol:?}")]
    UnsupportedSymbolForProtocol {
        /// The offending symbol
        symbol: Symbol,
        /// Identifier of the active protocol
        protocol: u8,
    },
    /// The base pulse length must be at least one microsecond.
    #[error("pulse length must be a positive number of microseconds")]
    InvalidPulseLength,
    /// The repeat count must be at least one.
    #[error("repeat count must be at least 1")]
    InvalidRepeatCount,
}

/// Errors raised by a transmission.
///
/// `E` is the error type of the [`PulseSink`](crate::sink::PulseSink) driving the
/// transmission, e.g. the pin error of a [`PinSink`](crate::sink::PinSink).
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error<E> {
    /// The command could not be encoded; no pulse was emitted.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// The sink rejected a pulse; the transmission was aborted mid-way.
    #[error("pulse sink failed")]
    Sink(E),
}

/// Returned by a [`Recorder`](crate::sink::Recorder) that has no room left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[error("recorder capacity exhausted")]
pub struct CaptureOverflow;
