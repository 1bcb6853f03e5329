//! Timing tables for fixed-code remote daemons.
//!
//! Daemons such as LIRC replay raw timing tables rather than encoding
//! commands themselves. [`generate`] runs every command of a remote through a
//! [`Recorder`] and collects the resulting pulse lists, one entry per device
//! and state, named `a_on`, `a_off`, `b_on`, ... `d_off`.
//!
//! Rendering a table into a particular daemon's file syntax is left to the
//! caller.

use crate::codeword::State;
use crate::config::RemoteConfig;
use crate::consts::{MAX_SELECTOR, MIN_SELECTOR};
use crate::error::{CaptureOverflow, Error};
use crate::protocol::ProtocolRegistry;
use crate::sink::{Pulse, Recorder};

/// The recorded transmission of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingEntry {
    /// Command name, `<device letter>_<on|off>`
    pub name: String,
    /// Pulses in emission order
    pub pulses: Vec<Pulse>,
    /// Sum of all pulse durations, in microseconds
    pub total_length_us: u64,
}

/// All commands of one remote, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingTable {
    entries: Vec<TimingEntry>,
}

impl TimingTable {
    /// Looks up an entry by command name.
    pub fn get(&self, name: &str) -> Option<&TimingEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Entries in generation order.
    pub fn entries(&self) -> &[TimingEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn device_letter(device: u8) -> char {
    char::from(b'a' + (device - MIN_SELECTOR))
}

/// Records every device/state command of the remote described by `config`.
///
/// Devices are visited in order, each switched on then off.
pub fn generate(
    config: &RemoteConfig,
    registry: ProtocolRegistry<'_>,
) -> Result<TimingTable, Error<CaptureOverflow>> {
    let mut remote = config.remote(registry, Recorder::new())?;
    let mut table = TimingTable::default();

    for device in MIN_SELECTOR..=MAX_SELECTOR {
        for state in [State::On, State::Off] {
            remote.send(device, state)?;
            let recorder = remote.transmitter_mut().sink_mut();
            let total_length_us = recorder.total_duration_us();
            let entry = TimingEntry {
                name: format!("{}_{}", device_letter(device), state.name()),
                pulses: recorder.take(),
                total_length_us,
            };
            debug!(
                "{}: {} pulses, {} us",
                entry.name.as_str(),
                entry.pulses.len(),
                total_length_us
            );
            table.entries.push(entry);
        }
    }
    Ok(table)
}
