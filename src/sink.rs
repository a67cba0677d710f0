//! Output destination registry
//!
//! The active sink is a single function pointer stored in an `AtomicPtr`.
//! A null pointer selects the default destination (stderr). Writers load
//! the pointer once and use that snapshot for the whole write, so a
//! concurrent swap never splits one write across two destinations.

use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};
use std::io::{self, Write};

/// Custom sink callback.
///
/// Receives every byte of one write in a single call and must consume all of
/// it before returning. It must not call back into the logging API.
pub type SinkFn = fn(&[u8]);

const _: () = assert!(size_of::<SinkFn>() == size_of::<*mut ()>());

/// Snapshot of the destination taken at the start of a write
#[derive(Debug, Clone, Copy)]
pub enum Sink {
    /// stderr, with retry on interrupted writes
    Stderr,
    /// A caller-installed callback
    Custom(SinkFn),
}

impl Sink {
    /// Delivers `bytes` to this destination.
    ///
    /// Custom sinks get the whole slice at once. Stderr writes resume from
    /// the unwritten remainder after an interrupt and give up silently on
    /// any other failure.
    pub fn write(self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        match self {
            Sink::Custom(sink) => sink(bytes),
            Sink::Stderr => write_retrying(&mut io::stderr().lock(), bytes),
        }
    }
}

/// Writes all of `bytes` unless the writer fails with something other than
/// an interrupt. Partial output is not reported.
pub(crate) fn write_retrying(out: &mut impl Write, mut bytes: &[u8]) {
    while !bytes.is_empty() {
        match out.write(bytes) {
            Ok(0) => break,
            Ok(written) => bytes = &bytes[written..],
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
}

/// Holds the current destination
pub struct SinkRegistry {
    current: AtomicPtr<()>,
}

impl SinkRegistry {
    /// A registry pointing at the default destination
    pub const fn new() -> Self {
        Self {
            current: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Installs `sink`; `None` restores the default destination.
    pub fn set(&self, sink: Option<SinkFn>) {
        let raw = match sink {
            Some(f) => f as *mut (),
            None => ptr::null_mut(),
        };
        self.current.store(raw, Ordering::Release);
    }

    /// Restores the default destination
    pub fn reset(&self) {
        self.set(None);
    }

    /// The installed custom sink, if any
    pub fn custom(&self) -> Option<SinkFn> {
        match self.load() {
            Sink::Custom(f) => Some(f),
            Sink::Stderr => None,
        }
    }

    /// Takes a snapshot of the current destination
    pub fn load(&self) -> Sink {
        let raw = self.current.load(Ordering::Acquire);
        if raw.is_null() {
            Sink::Stderr
        } else {
            // Only ever stored from a `SinkFn` in `set`.
            Sink::Custom(unsafe { core::mem::transmute::<*mut (), SinkFn>(raw) })
        }
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}
