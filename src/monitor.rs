//! Fault reporting for recoverable anomalies.
//!
//! Generation never hard-stops on bad data; it substitutes a safe default
//! and reports what happened through a [`FaultSink`]. The default sink
//! forwards to the `log` facade; tests install a recording sink instead.

use crate::errors::TeamGenError;

/// Receives recoverable-but-notable anomalies together with a label naming
/// the generation path that hit them.
pub trait FaultSink {
    fn report(&self, error: &TeamGenError, context: &str);
}

/// Default sink: forwards every fault to `log::warn!`.
#[derive(Debug, Default)]
pub struct LogFaultSink;

impl FaultSink for LogFaultSink {
    fn report(&self, error: &TeamGenError, context: &str) {
        log::warn!("{}: {}", context, error);
    }
}

pub(crate) static LOG_FAULT_SINK: LogFaultSink = LogFaultSink;
