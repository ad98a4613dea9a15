//! Panel colors

/// Background color of the B/W planes.
///
/// On both 1.54" panels a set bit is a white pixel, both on the monochrome RAM and on the
/// black plane of the tri-color panel. On the red plane a cleared bit is a red pixel.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Black pixel
    Black,
    /// White pixel
    #[default]
    White,
}

impl Color {
    /// Gets a full byte of black or white pixels
    pub fn get_byte_value(&self) -> u8 {
        match self {
            Color::White => 0xff,
            Color::Black => 0x00,
        }
    }
}
