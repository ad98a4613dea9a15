//! Packed 1 bit per pixel framebuffer with basic rasterization
//!
//! [`Paint`] draws into a caller owned byte buffer laid out the way both 1.54" controllers
//! expect their RAM: row major, 8 horizontal pixels per byte, most significant bit first.
//! Every shape is rasterized pixel by pixel through [`Paint::draw_pixel`], so rotation and
//! clipping apply to everything drawn.

use bit_field::BitField;
use core::fmt::{Display, Formatter};

use crate::buffer_len;

/// Display rotation, only 90° increments supported
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayRotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// First character of every font table
pub const FIRST_CHAR: char = ' ';

/// A bitmap font: fixed size glyphs stored back to back, starting with [`FIRST_CHAR`].
///
/// Every glyph row takes `ceil(width / 8)` bytes, most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font<'a> {
    /// Glyph width in pixels, also the cursor advance
    pub width: u32,
    /// Glyph height in pixels
    pub height: u32,
    /// Glyph bitmaps
    pub table: &'a [u8],
}

impl<'a> Font<'a> {
    /// Describes a glyph table
    pub const fn new(width: u32, height: u32, table: &'a [u8]) -> Self {
        Font {
            width,
            height,
            table,
        }
    }

    /// Bytes of one glyph row
    pub const fn bytes_per_row(&self) -> usize {
        (self.width as usize + 7) / 8
    }

    /// Bytes of one glyph
    pub const fn glyph_len(&self) -> usize {
        self.bytes_per_row() * self.height as usize
    }

    /// The bitmap of `ch`, `None` if the table doesn't contain it
    pub fn glyph(&self, ch: char) -> Option<&'a [u8]> {
        let glyph_len = self.glyph_len();
        if glyph_len == 0 {
            return None;
        }
        let index = (ch as u32).checked_sub(FIRST_CHAR as u32)? as usize;
        let start = index.checked_mul(glyph_len)?;
        self.table.get(start..start.checked_add(glyph_len)?)
    }
}

/// Error found during setup or resizing of a [`Paint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaintError {
    /// The provided buffer was too small
    BufferTooSmall {
        /// Bytes the geometry needs
        required: usize,
        /// Bytes the buffer has
        actual: usize,
    },
}

impl Display for PaintError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PaintError::BufferTooSmall { required, actual } => write!(
                f,
                "the buffer holds {} bytes but the canvas needs {}",
                actual, required
            ),
        }
    }
}

impl core::error::Error for PaintError {}

/// A monochrome canvas on top of a caller owned buffer.
///
/// - INVERT: with `true` a colored pixel sets its bit and an uncolored pixel clears it,
///   `false` swaps both.
///
/// The width is rounded up to a multiple of 8, one byte holds 8 horizontal pixels.
/// The buffer must hold at least `width / 8 * height` bytes, which [`Paint::new`],
/// [`Paint::set_width`] and [`Paint::set_height`] check.
pub struct Paint<'a, const INVERT: bool = true> {
    buffer: &'a mut [u8],
    width: u32,
    height: u32,
    rotation: DisplayRotation,
}

// 1 byte = 8 pixels, so the width is a multiple of 8
const fn byte_aligned_width(width: u32) -> u32 {
    width.saturating_add(7) & !0b111
}

fn check_capacity(actual: usize, width: u32, height: u32) -> Result<usize, PaintError> {
    let required = buffer_len(width as usize, height as usize);
    if required > actual {
        return Err(PaintError::BufferTooSmall { required, actual });
    }
    Ok(required)
}

impl<'a, const INVERT: bool> Paint<'a, INVERT> {
    /// Creates a canvas of `width` x `height` unrotated pixels over `buffer`.
    ///
    /// The buffer content is left as it is, call [`Paint::clear`] to start from a blank canvas.
    pub fn new(buffer: &'a mut [u8], width: u32, height: u32) -> Result<Self, PaintError> {
        let width = byte_aligned_width(width);
        check_capacity(buffer.len(), width, height)?;
        Ok(Paint {
            buffer,
            width,
            height,
            rotation: DisplayRotation::default(),
        })
    }

    /// Unrotated width in pixels, always a multiple of 8
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Changes the width, rounded up to a multiple of 8.
    ///
    /// Nothing is moved in the buffer. Fails without changing anything if the buffer
    /// is too small for the new geometry.
    pub fn set_width(&mut self, width: u32) -> Result<(), PaintError> {
        let width = byte_aligned_width(width);
        check_capacity(self.buffer.len(), width, self.height)?;
        self.width = width;
        Ok(())
    }

    /// Unrotated height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Changes the height.
    ///
    /// Nothing is moved in the buffer. Fails without changing anything if the buffer
    /// is too small for the new geometry.
    pub fn set_height(&mut self, height: u32) -> Result<(), PaintError> {
        check_capacity(self.buffer.len(), self.width, height)?;
        self.height = height;
        Ok(())
    }

    /// Set the display rotation.
    ///
    /// This only concerns future drawing made to it. Anything aready drawn
    /// stays as it is in the buffer.
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// Get current rotation
    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Width and height as seen through the current rotation
    pub fn rotated_size(&self) -> (u32, u32) {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => (self.width, self.height),
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => (self.height, self.width),
        }
    }

    /// The bytes of the canvas, ready to be sent to the display
    pub fn buffer(&self) -> &[u8] {
        &self.buffer[..self.len()]
    }

    fn len(&self) -> usize {
        buffer_len(self.width as usize, self.height as usize)
    }

    // bit value a pixel of the given kind is stored as
    fn bit_value(colored: bool) -> bool {
        colored == INVERT
    }

    /// Sets every pixel of the canvas to `colored`
    pub fn clear(&mut self, colored: bool) {
        let byte = if Self::bit_value(colored) { 0xFF } else { 0x00 };
        let len = self.len();
        self.buffer[..len].fill(byte);
    }

    /// Draws a pixel by absolute coordinates.
    ///
    /// The rotation is ignored, pixels outside of the canvas are dropped.
    pub fn draw_absolute_pixel(&mut self, x: i32, y: i32, colored: bool) {
        if let Some((index, bit)) = self.bit_position(x, y) {
            self.buffer[index].set_bit(bit, Self::bit_value(colored));
        }
    }

    /// Whether the pixel at absolute coordinates is colored, `None` outside of the canvas
    pub fn absolute_pixel(&self, x: i32, y: i32) -> Option<bool> {
        let (index, bit) = self.bit_position(x, y)?;
        Some(self.buffer[index].get_bit(bit) == Self::bit_value(true))
    }

    // byte index and bit number (0 = lsb) of an absolute position
    fn bit_position(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((x + y * self.width as usize) / 8, 7 - x % 8))
    }

    // maps rotated coordinates to absolute ones, bounds are checked in rotated space
    fn absolute_position(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        let (rotated_width, rotated_height) = self.rotated_size();
        if x < 0 || y < 0 || x as u32 >= rotated_width || y as u32 >= rotated_height {
            return None;
        }
        // as i32 = never use more than 2 billion pixel per line or per column
        let (width, height) = (self.width as i32, self.height as i32);
        Some(match self.rotation {
            DisplayRotation::Rotate0 => (x, y),
            DisplayRotation::Rotate90 => (width - 1 - y, x),
            DisplayRotation::Rotate180 => (width - 1 - x, height - 1 - y),
            DisplayRotation::Rotate270 => (y, height - 1 - x),
        })
    }

    /// Draws a pixel through the current rotation
    pub fn draw_pixel(&mut self, x: i32, y: i32, colored: bool) {
        if let Some((x, y)) = self.absolute_position(x, y) {
            self.draw_absolute_pixel(x, y, colored);
        }
    }

    /// Whether the pixel at rotated coordinates is colored, `None` outside of the canvas
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        let (x, y) = self.absolute_position(x, y)?;
        self.absolute_pixel(x, y)
    }

    /// Draws a character with its top left corner at (x, y).
    ///
    /// Only the set bits of the glyph are drawn, the rest of the cell stays untouched.
    /// Characters missing in the font are skipped.
    pub fn draw_char_at(&mut self, x: i32, y: i32, ch: char, font: &Font<'_>, colored: bool) {
        let Some(glyph) = font.glyph(ch) else {
            return;
        };

        for (row, line) in glyph.chunks(font.bytes_per_row()).enumerate() {
            for column in 0..font.width as usize {
                if line[column / 8].get_bit(7 - column % 8) {
                    self.plot(x as i64 + column as i64, y as i64 + row as i64, colored);
                }
            }
        }
    }

    /// Draws a string from left to right, advancing by the font width.
    ///
    /// There is no wrapping, whatever leaves the canvas is clipped.
    pub fn draw_string_at(&mut self, x: i32, y: i32, text: &str, font: &Font<'_>, colored: bool) {
        let mut column = x;
        for ch in text.chars() {
            self.draw_char_at(column, y, ch, font, colored);
            column = column.saturating_add(i32::try_from(font.width).unwrap_or(i32::MAX));
        }
    }

    /// Draws a line between both points, both included (Bresenham)
    ///
    /// Only the steps that land on the canvas are walked, so far away end points cost nothing.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, colored: bool) {
        let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        let (dx, dy) = (x1 - x0, y1 - y0);
        let (rotated_width, rotated_height) = self.rotated_size();
        let x_major = dx.abs() >= dy.abs();

        // walk along the longer axis, the other one follows the rounded slope
        let (major_start, major_sign, major_len, major_size, minor_start, minor_sign, minor_len) =
            if x_major {
                (x0, dx.signum(), dx.abs(), rotated_width, y0, dy.signum(), dy.abs())
            } else {
                (y0, dy.signum(), dy.abs(), rotated_height, x0, dx.signum(), dx.abs())
            };

        if major_len == 0 {
            self.plot(x0, y0, colored);
            return;
        }
        let Some((first, last)) = steps_on_canvas(major_start, major_sign, major_len, major_size)
        else {
            return;
        };

        for step in first..=last {
            let major = major_start + major_sign * step;
            // round(step * minor_len / major_len), halves away from the start
            let offset = (2 * step as i128 * minor_len as i128 + major_len as i128)
                / (2 * major_len as i128);
            let minor = minor_start + minor_sign * offset as i64;
            if x_major {
                self.plot(major, minor, colored);
            } else {
                self.plot(minor, major, colored);
            }
        }
    }

    /// Draws `line_width` pixels to the right, starting at (x, y)
    pub fn draw_horizontal_line(&mut self, x: i32, y: i32, line_width: i32, colored: bool) {
        if line_width > 0 {
            let x = x as i64;
            self.horizontal_span(x, x + line_width as i64 - 1, y as i64, colored);
        }
    }

    /// Draws `line_height` pixels downwards, starting at (x, y)
    pub fn draw_vertical_line(&mut self, x: i32, y: i32, line_height: i32, colored: bool) {
        if line_height > 0 {
            let y = y as i64;
            self.vertical_span(x as i64, y, y + line_height as i64 - 1, colored);
        }
    }

    /// Draws the outline of the rectangle spanned by two opposite corners
    pub fn draw_rectangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, colored: bool) {
        let (min_x, max_x) = (x0.min(x1) as i64, x0.max(x1) as i64);
        let (min_y, max_y) = (y0.min(y1) as i64, y0.max(y1) as i64);

        self.horizontal_span(min_x, max_x, min_y, colored);
        self.horizontal_span(min_x, max_x, max_y, colored);
        self.vertical_span(min_x, min_y, max_y, colored);
        self.vertical_span(max_x, min_y, max_y, colored);
    }

    /// Fills the rectangle spanned by two opposite corners
    pub fn draw_filled_rectangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, colored: bool) {
        let (min_x, max_x) = (x0.min(x1) as i64, x0.max(x1) as i64);
        let (min_y, max_y) = (y0.min(y1) as i64, y0.max(y1) as i64);
        let (_, rotated_height) = self.rotated_size();

        for row in min_y.max(0)..=max_y.min(rotated_height as i64 - 1) {
            self.horizontal_span(min_x, max_x, row, colored);
        }
    }

    /// Draws a circle around (x, y). A radius of 0 is a single pixel.
    pub fn draw_circle(&mut self, x: i32, y: i32, radius: i32, colored: bool) {
        let (x, y) = (x as i64, y as i64);
        let Some(reach) = self.circle_reach(x, y, radius) else {
            return;
        };
        walk_circle(radius as i64, reach, |x_pos, y_pos| {
            self.plot(x - x_pos, y + y_pos, colored);
            self.plot(x + x_pos, y + y_pos, colored);
            self.plot(x + x_pos, y - y_pos, colored);
            self.plot(x - x_pos, y - y_pos, colored);
        });
    }

    /// Draws a disc around (x, y)
    pub fn draw_filled_circle(&mut self, x: i32, y: i32, radius: i32, colored: bool) {
        let (x, y) = (x as i64, y as i64);
        let Some(reach) = self.circle_reach(x, y, radius) else {
            return;
        };
        walk_circle(radius as i64, reach, |x_pos, y_pos| {
            self.horizontal_span(x + x_pos, x - x_pos, y + y_pos, colored);
            self.horizontal_span(x + x_pos, x - x_pos, y - y_pos, colored);
        });
    }

    // `None` if the bounding box of the circle misses the canvas
    fn circle_reach(&self, x: i64, y: i64, radius: i32) -> Option<CircleReach> {
        let (rotated_width, rotated_height) = self.rotated_size();
        let (width, height) = (rotated_width as i64, rotated_height as i64);
        let radius = radius as i64;
        if radius < 0
            || x + radius < 0
            || y + radius < 0
            || x - radius >= width
            || y - radius >= height
        {
            return None;
        }
        Some(CircleReach {
            min_x_offset: (x - (width - 1)).max(-x).max(0),
            max_y_offset: y.max(height - 1 - y),
        })
    }

    // pixel by 64 bit rotated coordinates, whatever doesn't fit an i32 is off the canvas
    fn plot(&mut self, x: i64, y: i64, colored: bool) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.draw_pixel(x, y, colored);
        }
    }

    // pixels x0..=x1 of row y, cut to the canvas first
    fn horizontal_span(&mut self, x0: i64, x1: i64, y: i64, colored: bool) {
        let (rotated_width, rotated_height) = self.rotated_size();
        if y < 0 || y >= rotated_height as i64 {
            return;
        }
        for x in x0.max(0)..=x1.min(rotated_width as i64 - 1) {
            self.plot(x, y, colored);
        }
    }

    // pixels y0..=y1 of column x, cut to the canvas first
    fn vertical_span(&mut self, x: i64, y0: i64, y1: i64, colored: bool) {
        let (rotated_width, rotated_height) = self.rotated_size();
        if x < 0 || x >= rotated_width as i64 {
            return;
        }
        for y in y0.max(0)..=y1.min(rotated_height as i64 - 1) {
            self.plot(x, y, colored);
        }
    }
}

// Range of steps in 0..=len for which start + sign * step lies inside 0..size
fn steps_on_canvas(start: i64, sign: i64, len: i64, size: u32) -> Option<(i64, i64)> {
    let last_on_canvas = size as i64 - 1;
    let (first, last) = if sign > 0 {
        (-start, last_on_canvas - start)
    } else {
        (start - last_on_canvas, start)
    };
    let (first, last) = (first.max(0), last.min(len));
    (first <= last).then_some((first, last))
}

// Offsets from the center beyond which the arc can't come back onto the canvas.
// Neither mirrored point nor the span between them reaches the canvas once the
// horizontal offset drops below `min_x_offset` or the vertical one passes `max_y_offset`.
#[derive(Debug, Clone, Copy)]
struct CircleReach {
    min_x_offset: i64,
    max_y_offset: i64,
}

// Bresenham circle walk over one quadrant. `visit` gets the offsets (x_pos <= 0, y_pos >= 0)
// of every arc point, mirroring them is up to the caller. Along the walk -x_pos only shrinks
// and y_pos only grows, so it ends as soon as either leaves `reach`.
fn walk_circle(radius: i64, reach: CircleReach, mut visit: impl FnMut(i64, i64)) {
    if radius < 0 {
        return;
    }
    let mut x_pos = -radius;
    let mut y_pos = 0;
    let mut err = 2 - 2 * radius;

    while x_pos <= 0 && -x_pos >= reach.min_x_offset && y_pos <= reach.max_y_offset {
        visit(x_pos, y_pos);
        let mut e2 = err;
        if e2 <= y_pos {
            y_pos += 1;
            err += y_pos * 2 + 1;
            if -x_pos == y_pos && e2 <= x_pos {
                e2 = 0;
            }
        }
        if e2 > x_pos {
            x_pos += 1;
            err += x_pos * 2 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 5x3 glyphs, one byte per row: ' ', '!' and an L standing in for '"'
    const TABLE: [u8; 9] = [
        0b0000_0000, 0b0000_0000, 0b0000_0000, // ' '
        0b0010_0000, 0b0010_0000, 0b0000_0000, // '!'
        0b1000_0000, 0b1000_0000, 0b1111_1000, // '"' drawn as an L
    ];
    const FONT: Font<'static> = Font::new(5, 3, &TABLE);

    fn colored_pixels<const INVERT: bool>(paint: &Paint<'_, INVERT>) -> usize {
        let mut count = 0;
        for y in 0..paint.height() as i32 {
            for x in 0..paint.width() as i32 {
                if paint.absolute_pixel(x, y) == Some(true) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn width_is_rounded_up() {
        let mut buffer = [0u8; 8];
        let paint: Paint = Paint::new(&mut buffer, 13, 4).unwrap();
        assert_eq!(paint.width(), 16);
        assert_eq!(paint.buffer().len(), 8);
    }

    #[test]
    fn too_small_buffer_is_rejected() {
        let mut buffer = [0u8; 7];
        let result: Result<Paint, _> = Paint::new(&mut buffer, 8, 8);
        assert_eq!(
            result.err(),
            Some(PaintError::BufferTooSmall {
                required: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn resize_is_checked() {
        let mut buffer = [0u8; 16];
        let mut paint: Paint = Paint::new(&mut buffer, 16, 8).unwrap();
        assert!(paint.set_height(9).is_err());
        assert_eq!(paint.height(), 8);
        assert!(paint.set_width(17).is_err());
        assert_eq!(paint.width(), 16);
        paint.set_width(8).unwrap();
        paint.set_height(16).unwrap();
        assert_eq!(paint.buffer().len(), 16);
    }

    #[test]
    fn first_pixel_sets_msb() {
        let mut buffer = [0xAAu8; 8];
        let mut paint: Paint = Paint::new(&mut buffer, 8, 8).unwrap();
        paint.clear(false);
        paint.draw_pixel(0, 0, true);
        assert_eq!(paint.buffer(), &[0x80, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn non_inverted_clears_bits() {
        let mut buffer = [0u8; 8];
        let mut paint: Paint<'_, false> = Paint::new(&mut buffer, 8, 8).unwrap();
        paint.clear(false);
        assert!(paint.buffer().iter().all(|&b| b == 0xFF));
        paint.draw_pixel(1, 0, true);
        assert_eq!(paint.buffer()[0], 0b1011_1111);
        assert_eq!(paint.pixel(1, 0), Some(true));
        assert_eq!(paint.pixel(0, 0), Some(false));
    }

    #[test]
    fn clear_only_touches_the_canvas() {
        let mut buffer = [0u8; 10];
        {
            let mut paint: Paint = Paint::new(&mut buffer, 8, 8).unwrap();
            paint.clear(true);
        }
        assert_eq!(&buffer[..8], &[0xFF; 8]);
        assert_eq!(&buffer[8..], &[0, 0]);
    }

    #[test]
    fn out_of_canvas_is_clipped() {
        let mut buffer = [0u8; 8];
        let mut paint: Paint = Paint::new(&mut buffer, 8, 8).unwrap();
        paint.draw_absolute_pixel(-1, 0, true);
        paint.draw_absolute_pixel(8, 0, true);
        paint.draw_absolute_pixel(0, 8, true);
        paint.draw_pixel(0, -3, true);
        assert!(paint.buffer().iter().all(|&b| b == 0));
        assert_eq!(paint.pixel(8, 0), None);
    }

    #[test]
    fn rotations_map_the_origin_to_each_corner() {
        // 16 wide, 8 high
        let mut buffer = [0u8; 16];
        let mut paint: Paint = Paint::new(&mut buffer, 16, 8).unwrap();

        paint.set_rotation(DisplayRotation::Rotate90);
        assert_eq!(paint.rotated_size(), (8, 16));
        paint.draw_pixel(0, 0, true);
        assert_eq!(paint.absolute_pixel(15, 0), Some(true));

        paint.clear(false);
        paint.set_rotation(DisplayRotation::Rotate180);
        paint.draw_pixel(0, 0, true);
        assert_eq!(paint.absolute_pixel(15, 7), Some(true));

        paint.clear(false);
        paint.set_rotation(DisplayRotation::Rotate270);
        paint.draw_pixel(0, 0, true);
        assert_eq!(paint.absolute_pixel(0, 7), Some(true));
        // x beyond the rotated width (8) is clipped even though 8 < 16
        paint.draw_pixel(8, 0, true);
        assert_eq!(colored_pixels(&paint), 1);
    }

    #[test]
    fn horizontal_line_fills_a_byte() {
        let mut buffer = [0u8; 8];
        let mut paint: Paint = Paint::new(&mut buffer, 8, 8).unwrap();
        paint.draw_horizontal_line(0, 2, 8, true);
        assert_eq!(paint.buffer()[2], 0xFF);
        assert_eq!(colored_pixels(&paint), 8);
        paint.draw_horizontal_line(0, 3, 0, true);
        paint.draw_horizontal_line(0, 3, -4, true);
        assert_eq!(colored_pixels(&paint), 8);
    }

    #[test]
    fn lines_include_both_ends() {
        let mut buffer = [0u8; 8];
        let mut paint: Paint = Paint::new(&mut buffer, 8, 8).unwrap();

        paint.draw_line(1, 1, 6, 1, true);
        assert_eq!(colored_pixels(&paint), 6);

        paint.clear(false);
        paint.draw_line(2, 7, 2, 0, true);
        assert_eq!(colored_pixels(&paint), 8);

        paint.clear(false);
        paint.draw_line(0, 0, 7, 7, true);
        assert_eq!(colored_pixels(&paint), 8);
        for i in 0..8 {
            assert_eq!(paint.pixel(i, i), Some(true));
        }

        paint.clear(false);
        paint.draw_line(3, 3, 3, 3, true);
        assert_eq!(colored_pixels(&paint), 1);
    }

    #[test]
    fn rectangle_corners_in_any_order() {
        let mut a = [0u8; 8];
        let mut b = [0u8; 8];
        {
            let mut paint: Paint = Paint::new(&mut a, 8, 8).unwrap();
            paint.draw_rectangle(1, 1, 6, 5, true);
            assert_eq!(colored_pixels(&paint), 2 * 6 + 2 * 3);
            assert_eq!(paint.pixel(3, 3), Some(false));
        }
        {
            let mut paint: Paint = Paint::new(&mut b, 8, 8).unwrap();
            paint.draw_rectangle(6, 5, 1, 1, true);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn filled_rectangle() {
        let mut buffer = [0u8; 8];
        let mut paint: Paint = Paint::new(&mut buffer, 8, 8).unwrap();
        paint.draw_filled_rectangle(5, 4, 2, 1, true);
        assert_eq!(colored_pixels(&paint), 4 * 4);
        assert_eq!(paint.buffer()[1], 0b0011_1100);
        assert_eq!(paint.buffer()[4], 0b0011_1100);
        assert_eq!(paint.buffer()[5], 0);
    }

    #[test]
    fn circle_of_radius_zero_is_a_dot() {
        let mut buffer = [0u8; 8];
        let mut paint: Paint = Paint::new(&mut buffer, 8, 8).unwrap();
        paint.draw_circle(3, 3, 0, true);
        assert_eq!(colored_pixels(&paint), 1);
        paint.draw_circle(3, 3, -2, true);
        assert_eq!(colored_pixels(&paint), 1);
    }

    #[test]
    fn circle_radius_one_and_two() {
        let mut buffer = [0u8; 8];
        let mut paint: Paint = Paint::new(&mut buffer, 8, 8).unwrap();
        paint.draw_circle(3, 3, 1, true);
        for (x, y) in [(2, 3), (4, 3), (3, 2), (3, 4)] {
            assert_eq!(paint.pixel(x, y), Some(true));
        }
        assert_eq!(paint.pixel(3, 3), Some(false));

        paint.clear(false);
        paint.draw_circle(3, 3, 2, true);
        for (x, y) in [(1, 3), (5, 3), (3, 1), (3, 5)] {
            assert_eq!(paint.pixel(x, y), Some(true));
        }
        assert_eq!(paint.pixel(3, 3), Some(false));
    }

    #[test]
    fn filled_circle_has_no_holes() {
        let mut buffer = [0u8; 16];
        let mut paint: Paint = Paint::new(&mut buffer, 16, 8).unwrap();
        paint.draw_filled_circle(8, 4, 3, true);
        for x in 5..=11 {
            assert_eq!(paint.pixel(x, 4), Some(true));
        }
        for y in 1..=7 {
            assert_eq!(paint.pixel(8, y), Some(true));
        }
        assert_eq!(paint.pixel(4, 4), Some(false));
    }

    #[test]
    fn extreme_coordinates_are_clipped() {
        let mut buffer = [0u8; 8];
        let mut paint: Paint = Paint::new(&mut buffer, 8, 8).unwrap();

        paint.draw_line(i32::MIN, 0, 0, 0, true);
        assert_eq!(colored_pixels(&paint), 1);
        assert_eq!(paint.pixel(0, 0), Some(true));

        paint.clear(false);
        paint.draw_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, true);
        assert_eq!(colored_pixels(&paint), 8);
        for i in 0..8 {
            assert_eq!(paint.pixel(i, i), Some(true));
        }

        paint.clear(false);
        paint.draw_line(i32::MAX, 3, i32::MIN, 3, true);
        assert_eq!(paint.buffer()[3], 0xFF);
        assert_eq!(colored_pixels(&paint), 8);

        paint.clear(false);
        paint.draw_rectangle(i32::MIN, 0, i32::MAX, 1, true);
        assert_eq!(colored_pixels(&paint), 16);

        paint.clear(false);
        paint.draw_filled_rectangle(i32::MIN, i32::MIN, i32::MAX, i32::MAX, true);
        assert_eq!(colored_pixels(&paint), 64);

        paint.clear(false);
        paint.draw_horizontal_line(i32::MAX, 0, i32::MAX, true);
        paint.draw_vertical_line(0, i32::MIN, i32::MAX, true);
        paint.draw_char_at(i32::MAX, i32::MAX, '"', &FONT, true);
        paint.draw_string_at(i32::MAX - 4, 0, "\"\"", &FONT, true);
        assert_eq!(colored_pixels(&paint), 0);

        // the whole canvas lies deep inside these circles
        paint.draw_circle(0, 0, i32::MAX, true);
        assert_eq!(colored_pixels(&paint), 0);
        paint.draw_filled_circle(0, 0, i32::MAX, true);
        assert_eq!(colored_pixels(&paint), 64);

        // bounding box touches the canvas, the arc passes far from it
        paint.clear(false);
        paint.draw_circle(i32::MAX, i32::MAX, i32::MAX, true);
        paint.draw_filled_circle(-i32::MAX, i32::MAX, i32::MAX, true);
        assert_eq!(colored_pixels(&paint), 0);
    }

    #[test]
    fn glyph_lookup() {
        assert_eq!(FONT.bytes_per_row(), 1);
        assert_eq!(FONT.glyph_len(), 3);
        assert_eq!(FONT.glyph('!'), Some(&TABLE[3..6]));
        assert_eq!(FONT.glyph('#'), None);
        assert_eq!(FONT.glyph('\n'), None);
        assert_eq!(Font::new(0, 3, &TABLE).glyph(' '), None);
    }

    #[test]
    fn wide_glyph_rows_take_two_bytes() {
        let table = [0u8; 2 * 2 * 2];
        let font = Font::new(12, 2, &table);
        assert_eq!(font.bytes_per_row(), 2);
        assert_eq!(font.glyph('!'), Some(&table[4..8]));
    }

    #[test]
    fn char_is_transparent() {
        let mut buffer = [0u8; 8];
        let mut paint: Paint = Paint::new(&mut buffer, 8, 8).unwrap();
        paint.clear(true);
        paint.draw_char_at(0, 0, '"', &FONT, false);
        assert_eq!(paint.buffer()[0], 0b0111_1111);
        assert_eq!(paint.buffer()[1], 0b0111_1111);
        assert_eq!(paint.buffer()[2], 0b0000_0111);
        assert_eq!(paint.buffer()[3], 0xFF);
    }

    #[test]
    fn string_advances_by_glyph_width() {
        let mut buffer = [0u8; 4 * 3];
        let mut paint: Paint = Paint::new(&mut buffer, 32, 3).unwrap();
        paint.draw_string_at(0, 0, "!!\"", &FONT, true);
        // '!' column 2 of each 5 pixel cell
        assert_eq!(paint.pixel(2, 0), Some(true));
        assert_eq!(paint.pixel(7, 0), Some(true));
        // the L starts at column 10
        assert_eq!(paint.pixel(10, 2), Some(true));
        assert_eq!(paint.pixel(14, 2), Some(true));
        assert_eq!(paint.pixel(15, 2), Some(false));
        assert_eq!(colored_pixels(&paint), 2 + 2 + 7);
    }

    #[test]
    fn string_is_clipped_at_the_edge() {
        let mut buffer = [0u8; 3];
        let mut paint: Paint = Paint::new(&mut buffer, 8, 3).unwrap();
        paint.draw_string_at(0, 0, "\"\"", &FONT, true);
        // the second L starts at column 5, only 3 of its bottom pixels fit
        assert_eq!(paint.buffer()[2], 0b1111_1111);
        assert_eq!(colored_pixels(&paint), 7 + 2 + 3);
    }
}
