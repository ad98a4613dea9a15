//! Runtime configuration of the panel controllers

use crate::traits::RefreshLut;

/// How the busy line is awaited.
///
/// The line is read, and while it reports busy the driver sleeps for `poll_interval_ms`
/// before reading it again. Without a timeout a panel that never leaves the busy state
/// blocks the caller forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusyWait {
    /// Sleep between two reads of the busy line, in ms
    pub poll_interval_ms: u32,
    /// Give up with [`ErrorKind::BusyTimeout`](crate::error::ErrorKind::BusyTimeout)
    /// after polling for this many ms
    pub timeout_ms: Option<u32>,
}

impl BusyWait {
    /// 100ms polling without a timeout
    pub const DEFAULT: BusyWait = BusyWait {
        poll_interval_ms: 100,
        timeout_ms: None,
    };

    /// Polls every `poll_interval_ms`, without a timeout
    pub const fn new(poll_interval_ms: u32) -> Self {
        BusyWait {
            poll_interval_ms,
            timeout_ms: None,
        }
    }

    /// Bounds the wait to `timeout_ms`
    pub const fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

impl Default for BusyWait {
    fn default() -> Self {
        BusyWait::DEFAULT
    }
}

/// What happens to a partial frame window that doesn't fit the RAM addressing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowCheck {
    /// Round x and width down to whole bytes, clip the window to the panel and ignore
    /// windows (and buffers) that end up empty or too short.
    #[default]
    Clip,
    /// Reject unaligned, empty or out of panel windows and short buffers with an error.
    Strict,
}

/// Everything a controller needs besides its pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// Busy line polling
    pub busy_wait: BusyWait,
    /// Handling of partial windows
    pub window_check: WindowCheck,
    /// LUT loaded by `new`, only used by panels with a partial refresh waveform
    pub refresh: RefreshLut,
}

impl PanelConfig {
    /// Defaults: 100ms unbounded busy polling, clipping windows, full refresh
    pub const fn new() -> Self {
        PanelConfig {
            busy_wait: BusyWait::DEFAULT,
            window_check: WindowCheck::Clip,
            refresh: RefreshLut::Full,
        }
    }

    /// Sets the busy line polling
    pub const fn busy_wait(mut self, busy_wait: BusyWait) -> Self {
        self.busy_wait = busy_wait;
        self
    }

    /// Sets the window handling
    pub const fn window_check(mut self, window_check: WindowCheck) -> Self {
        self.window_check = window_check;
        self
    }

    /// Sets the LUT loaded on init
    pub const fn refresh(mut self, refresh: RefreshLut) -> Self {
        self.refresh = refresh;
        self
    }
}
