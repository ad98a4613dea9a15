//! A simple Driver for the 1.54" E-Ink Displays via SPI
//!
//! This driver was built using [`embedded-hal`] traits and ships with [`Paint`](paint::Paint),
//! a packed 1 bit per pixel framebuffer with line, rectangle, circle and bitmap font drawing.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1.0.0
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is not connected/available
//! - SPI_MODE_0 is used (CPHL = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//! - Waveshare's sample code runs the bus at 2Mhz
//!
//! ### Other....
//!
//! - Buffersize: Wherever a buffer is used it always needs to be of the size: `width / 8 * height`,
//!   where width and height being either the full e-ink size or the partial update window size
//! - The busy line is polled every 100ms by default, without a timeout.
//!   See [`BusyWait`](config::BusyWait) to change either.
//!
//! # Examples
//!
//! ```ignore
//! use epd154::{epd1in54::*, paint::*, prelude::*};
//!
//! let mut epd = Epd1in54::new(&mut spi, busy, dc, rst, &mut delay, None)?;
//!
//! // Both panels show a set bit as white, so colored pixels clear their bit
//! let mut buffer = [0u8; NUM_DISPLAY_BYTES];
//! let mut paint: Paint<'_, false> = Paint::new(&mut buffer, WIDTH, HEIGHT)?;
//! paint.clear(false);
//! paint.draw_string_at(8, 8, "Hello", &my_font, true);
//! paint.draw_filled_circle(100, 120, 40, true);
//!
//! epd.set_frame_memory_full(&mut spi, &mut delay, paint.buffer())?;
//! epd.display_frame(&mut spi, &mut delay)?;
//!
//! epd.sleep(&mut spi, &mut delay)?;
//! ```
//!
#![no_std]
#![warn(missing_docs)]

#[cfg(feature = "graphics")]
pub mod graphics;

mod traits;

pub mod color;
pub mod config;
pub mod error;
pub mod paint;
pub mod rect;
pub mod state;

/// Interface for the physical connection between display and the controlling device
mod interface;

#[cfg(feature = "epd1in54")]
pub mod epd1in54;

#[cfg(feature = "epd1in54c")]
pub mod epd1in54c;

#[cfg(test)]
pub(crate) mod test_utils;

pub mod prelude {
    //! Everything needed to drive a panel
    pub use crate::color::Color;
    pub use crate::config::{BusyWait, PanelConfig, WindowCheck};
    pub use crate::error::ErrorKind;
    pub use crate::state::{PanelState, RamPlane};
    pub use crate::paint::{DisplayRotation, Font, Paint};
    pub use crate::traits::{RefreshLut, WaveshareDisplay, WaveshareThreeColorDisplay};
    pub use crate::SPI_MODE;
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};

/// Computes the needed buffer length. Takes care of rounding up in case width
/// is not divisible by 8.
///
///  unused
///  bits        width
/// <----><------------------------>
/// \[XXXXX210\]\[76543210\]...\[76543210\] ^
/// \[XXXXX210\]\[76543210\]...\[76543210\] | height
/// \[XXXXX210\]\[76543210\]...\[76543210\] v
pub const fn buffer_len(width: usize, height: usize) -> usize {
    (width + 7) / 8 * height
}
