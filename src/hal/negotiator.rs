use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, warn};

use super::format;
use super::traits::{HardwareProperties, PropertyListener, Sleeper, StdSleeper};
use super::types::{FormatSelector, ObjectId, StreamFormat};

/// Poll interval while waiting for the hardware to apply a format change.
const POLL_INTERVAL: Duration = Duration::from_millis(10);
/// Poll attempts before giving up on confirmation (500 ms total).
const POLL_BUDGET: u32 = 50;

/// Drives a hardware stream to a requested format. The hardware applies
/// format changes asynchronously, so the negotiator registers a change
/// listener and polls a shared flag until the change is observed or the
/// budget runs out.
pub struct FormatNegotiator<'a> {
    hw: &'a dyn HardwareProperties,
    sleeper: &'a dyn Sleeper,
    poll_interval: Duration,
    poll_budget: u32,
}

impl<'a> FormatNegotiator<'a> {
    pub fn new(hw: &'a dyn HardwareProperties) -> Self {
        Self::with_sleeper(hw, &StdSleeper)
    }

    /// Negotiator with a caller-controlled polling clock.
    pub fn with_sleeper(hw: &'a dyn HardwareProperties, sleeper: &'a dyn Sleeper) -> Self {
        Self {
            hw,
            sleeper,
            poll_interval: POLL_INTERVAL,
            poll_budget: POLL_BUDGET,
        }
    }

    /// Change the stream's format and wait for the hardware to confirm it.
    /// A confirmation timeout is reported as a warning, not a failure; the
    /// change request itself already succeeded.
    pub fn change_format(
        &self,
        stream: ObjectId,
        new_format: &StreamFormat,
        selector: FormatSelector,
    ) -> Result<()> {
        let current = self
            .hw
            .stream_format(stream, selector)
            .context("can't fetch format property")?;

        if format::is_best(&current, new_format) {
            debug!("requested format matches current format");
            return Ok(());
        }

        let changed = Arc::new(AtomicBool::new(false));
        let listener = PropertyListener::new(selector, Arc::clone(&changed));
        self.hw
            .add_listener(stream, selector, listener)
            .context("can't add format property listener")?;

        if let Err(err) = self.hw.set_stream_format(stream, selector, new_format) {
            // A failed request never signals the flag; roll the
            // registration back before bailing.
            if let Err(remove_err) = self.hw.remove_listener(stream, selector) {
                warn!("can't remove format property listener: {remove_err:#}");
            }
            return Err(err.context("error changing format"));
        }

        let mut polls = 0;
        while !changed.load(Ordering::SeqCst) && polls < self.poll_budget {
            self.sleeper.sleep(self.poll_interval);
            polls += 1;
        }

        if !changed.load(Ordering::SeqCst) {
            warn!("reached timeout while polling for format changes");
        }

        if let Err(err) = self.hw.remove_listener(stream, selector) {
            warn!("can't remove format property listener: {err:#}");
        }

        Ok(())
    }

    /// Issue the format change without waiting for confirmation, for
    /// callers that do not need to observe the applied format.
    pub fn change_format_sync(
        &self,
        stream: ObjectId,
        new_format: &StreamFormat,
        selector: FormatSelector,
    ) -> Result<()> {
        self.hw
            .set_stream_format(stream, selector, new_format)
            .context("error changing format")
    }
}
