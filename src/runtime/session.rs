//! The thin adapter between tagged results and host error conventions.

use crate::base::{Handle, Language};
use crate::host::{HostBridge, TypePredicate};
use crate::runtime::Runtime;
use crate::text::TextSource;

/// Pairs a [`Runtime`] with a [`HostBridge`] for the duration of one host
/// call.
///
/// Core operations return tagged `Result`s; this adapter is the only place
/// they are translated into the host's error convention. Each method
/// signals at most one error and then returns `None` immediately - the
/// core never catches or suppresses what it signaled, and never retries.
pub struct HostSession<'a, B: HostBridge> {
    runtime: &'a mut Runtime,
    bridge: &'a mut B,
}

impl<'a, B: HostBridge> HostSession<'a, B> {
    pub fn new(runtime: &'a mut Runtime, bridge: &'a mut B) -> Self {
        Self { runtime, bridge }
    }

    /// Validate a host value before it crosses into core logic. On failure
    /// the bridge has already signaled a wrong-type error; the caller must
    /// return to the host without calling further into the core.
    pub fn assert_type(&mut self, value: &B::Value, predicate: &dyn TypePredicate<B::Value>) -> bool {
        self.bridge.assert_type(value, predicate)
    }

    pub fn create_parser(&mut self, language: Language) -> Option<Handle> {
        self.run(|runtime| runtime.create_parser(language))
    }

    pub fn feed(&mut self, parser: Handle, source: &dyn TextSource) -> Option<Handle> {
        self.run(|runtime| runtime.feed(parser, source))
    }

    pub fn record_edit(
        &mut self,
        parser: Handle,
        start: usize,
        old_end: usize,
        new_end: usize,
    ) -> Option<()> {
        self.run(|runtime| runtime.record_edit(parser, start, old_end, new_end))
    }

    /// Release is infallible and idempotent, so nothing is ever signaled.
    pub fn release(&mut self, handle: Handle) -> bool {
        self.runtime.release(handle)
    }

    fn run<T>(
        &mut self,
        op: impl FnOnce(&mut Runtime) -> Result<T, crate::base::EngineError>,
    ) -> Option<T> {
        match op(self.runtime) {
            Ok(value) => Some(value),
            Err(error) => {
                self.bridge.signal_error(&error);
                None
            }
        }
    }
}
