//! A remote shared between the main loop and interrupt handlers.
//!
//! Firmware that triggers commands from several contexts (a button ISR, a
//! serial command handler, ...) must not reconfigure a transmitter while it is
//! sending. These helpers keep one [`Remote`] in a static guarded by a
//! `critical_section::Mutex`, so configuration and transmission are always
//! serialised.
//!
//! ## Example
//!
//! ```rust
//! use rcswitch433::codeword::{Address, State};
//! use rcswitch433::config::RemoteConfig;
//! use rcswitch433::protocol::ProtocolRegistry;
//! use rcswitch433::shared::{SharedRemote, global_remote_init, global_remote_send, global_remote_setup};
//! use rcswitch433::sink::Recorder;
//!
//! static REMOTE: SharedRemote<Recorder> = global_remote_init();
//!
//! let remote = RemoteConfig::new(Address::Rotary(1))
//!     .remote(ProtocolRegistry::builtin(), Recorder::new())
//!     .unwrap();
//! global_remote_setup(&REMOTE, remote);
//! global_remote_send(&REMOTE, 2, State::On).unwrap().unwrap();
//! ```
//!
//! ## Notes
//!
//! A transmission runs inside the critical section. With a [`PinSink`](crate::sink::PinSink)
//! that blocks interrupts for the whole pulse train, typically tens of
//! milliseconds.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::codeword::State;
use crate::config::Remote;
use crate::error::Error;
use crate::sink::PulseSink;

/// A global slot for a [`Remote`] over a `'static` protocol registry.
pub type SharedRemote<S> = Mutex<RefCell<Option<Remote<'static, S>>>>;

/// Used to initialise the global static [`SharedRemote`].
///
/// # Returns
/// * An empty slot; fill it with [`global_remote_setup`]
pub const fn global_remote_init<S: PulseSink>() -> SharedRemote<S> {
    Mutex::new(RefCell::new(None))
}

/// Stores `remote` in the global slot, replacing any previous one.
pub fn global_remote_setup<S: PulseSink>(global: &SharedRemote<S>, remote: Remote<'static, S>) {
    critical_section::with(|cs| {
        let _ = global.borrow(cs).replace(Some(remote));
    });
}

/// Sends a command through the global remote.
///
/// # Returns
/// * `None` if [`global_remote_setup`] has not been called yet
/// * `Some` with the outcome of the transmission otherwise
pub fn global_remote_send<S: PulseSink>(
    global: &SharedRemote<S>,
    device: u8,
    state: State,
) -> Option<Result<(), Error<S::Error>>> {
    critical_section::with(|cs| {
        global
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .map(|remote| remote.send(device, state))
    })
}

/// Takes the remote back out of the global slot.
pub fn global_remote_release<S: PulseSink>(global: &SharedRemote<S>) -> Option<Remote<'static, S>> {
    critical_section::with(|cs| global.borrow(cs).take())
}
