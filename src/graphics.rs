//! Graphics Support for [`Paint`]
//!
//! [`BinaryColor::On`] is a colored pixel. Every pixel goes through the rotation of the
//! canvas, pixels outside of it are dropped.

use crate::paint::Paint;
use core::convert::Infallible;
use embedded_graphics_core::{pixelcolor::BinaryColor, prelude::*};

/// For use with embedded_grahics
impl<const INVERT: bool> DrawTarget for Paint<'_, INVERT> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.draw_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Paint::clear(self, color.is_on());
        Ok(())
    }
}

/// For use with embedded_grahics
impl<const INVERT: bool> OriginDimensions for Paint<'_, INVERT> {
    fn size(&self) -> Size {
        let (width, height) = self.rotated_size();
        Size::new(width, height)
    }
}
