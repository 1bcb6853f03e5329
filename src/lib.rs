//! # rcswitch433
//!
//! A portable, no_std Rust encoder for the cheap 433 MHz remote-controlled power
//! sockets sold under countless brands, driven through OOK transmitter modules
//! like the FS1000A.
//!
//! The crate turns a command such as "switch device 3 of group `00010` on" into
//! the exact pulse train the socket's receiver expects, and keeps that encoding
//! separate from the act of transmitting:
//! - the [`codeword`] builders map remote addressing onto tri-state codewords
//! - the [`transmitter`] renders codewords with a [`protocol`] timing grammar
//! - a [`sink`] realises the pulses, on a real `embedded-hal` pin or as data
//!
//! ## Crate features
//! | Feature     | Description |
//! |-------------|-------------|
//! | `std`       | Disables `#![no_std]` support, replaces `heapless::Vec`s with
//! `std::vec::Vec`s and enables the [`table`] module |
//! | `shared`    | Enables the `critical_section`-backed `shared` module |
//! | `defmt-0-3` | Uses `defmt` logging |
//! | `log`       | Uses `log` logging |
//!
//! ## Supported remotes
//!
//! - **A**: 10-pole DIP switches, 5 for the group and 5 for the device
//! - **B**: two rotary or sliding switches, address and channel
//! - **C**: Intertechno family letter, group and device
//!
//! ## Usage
//!
//! ```rust
//! use embedded_hal_mock::eh1::delay::NoopDelay;
//! use embedded_hal_mock::eh1::digital::Mock as Pin;
//! use rcswitch433::protocol::ProtocolRegistry;
//! use rcswitch433::sink::{PinSink, Recorder};
//! use rcswitch433::transmitter::Transmitter;
//!
//! // Capture the pulses of a command ...
//! let mut transmitter = Transmitter::new(ProtocolRegistry::builtin(), Recorder::new()).unwrap();
//! transmitter.switch_on_a("00010", 3).unwrap();
//! assert_eq!(transmitter.sink().pulses().len(), 2 + 11 * 4);
//!
//! // ... or send them on a pin.
//! # use embedded_hal_mock::eh1::digital::{State as PinState, Transaction as PinTransaction};
//! # let mut expectations = vec![PinTransaction::set(PinState::Low)];
//! # expectations.extend(transmitter.sink().pulses().iter().map(|p| match p.level {
//! #     rcswitch433::sink::Level::High => PinTransaction::set(PinState::High),
//! #     rcswitch433::sink::Level::Low => PinTransaction::set(PinState::Low),
//! # }));
//! # let tx_pin = Pin::new(&expectations);
//! let sink = PinSink::new(tx_pin, NoopDelay::new());
//! let mut transmitter = Transmitter::new(ProtocolRegistry::builtin(), sink).unwrap();
//! transmitter.switch_on_a("00010", 3).unwrap();
//! # let (mut tx_pin, _) = transmitter.into_sink().release();
//! # tx_pin.done();
//! ```
//!
//! ## Integration Notes
//!
//! - Transmission is blocking: the pin sink waits out every pulse on the
//!   calling thread
//! - Pulse widths are a few hundred microseconds; a precise `DelayNs` is required
//! - Only one transmission per transmitter may be in flight; see `shared`
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "shared")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

#[macro_use]
mod fmt;

pub mod codeword;
pub mod config;
pub mod consts;
pub mod error;
pub mod protocol;
#[cfg(feature = "shared")]
pub mod shared;
pub mod sink;
#[cfg(feature = "std")]
pub mod table;
pub mod transmitter;

pub use codeword::{Address, Codeword, State, Symbol};
pub use error::{EncodeError, Error};
pub use transmitter::Transmitter;
