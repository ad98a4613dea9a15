//! Errors of the panel controllers

use core::fmt::{Display, Formatter};

use embedded_hal::{digital, spi};

use crate::state::PanelState;

/// Epd error type
///
/// Bus and pin errors are reduced to the `embedded-hal` error kinds so the same error
/// type works for every pin combination.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Encountered an SPI error
    SpiError(spi::ErrorKind),

    /// Encountered an error on Busy GPIO
    BusyError(digital::ErrorKind),

    /// Encountered an error on DC GPIO
    DcError(digital::ErrorKind),

    /// Encountered an error on RST GPIO
    RstError(digital::ErrorKind),

    /// The busy line didn't report idle within the configured timeout
    BusyTimeout,

    /// The frame window is not byte aligned, empty or leaves the panel
    InvalidWindow,

    /// A frame buffer is shorter than the window it should fill
    BufferTooSmall {
        /// Bytes needed
        required: usize,
        /// Bytes provided
        actual: usize,
    },

    /// The controller isn't initialised or sleeps
    NotReady(PanelState),
}

impl ErrorKind {
    pub(crate) fn spi<E: spi::Error>(err: E) -> Self {
        ErrorKind::SpiError(err.kind())
    }

    pub(crate) fn busy<E: digital::Error>(err: E) -> Self {
        ErrorKind::BusyError(err.kind())
    }

    pub(crate) fn dc<E: digital::Error>(err: E) -> Self {
        ErrorKind::DcError(err.kind())
    }

    pub(crate) fn rst<E: digital::Error>(err: E) -> Self {
        ErrorKind::RstError(err.kind())
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => write!(f, "spi: {}", err),
            Self::BusyError(err) => write!(f, "busy pin: {}", err),
            Self::DcError(err) => write!(f, "dc pin: {}", err),
            Self::RstError(err) => write!(f, "rst pin: {}", err),
            Self::BusyTimeout => write!(f, "the display stayed busy past the timeout"),
            Self::InvalidWindow => write!(
                f,
                "the window must be byte aligned, non empty and inside the display"
            ),
            Self::BufferTooSmall { required, actual } => write!(
                f,
                "the buffer holds {} bytes but {} are needed",
                actual, required
            ),
            Self::NotReady(state) => write!(f, "the display is not ready ({:?})", state),
        }
    }
}

impl core::error::Error for ErrorKind {}
