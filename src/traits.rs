use core::marker::Sized;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

use crate::config::PanelConfig;
use crate::error::ErrorKind;
use crate::state::PanelState;

/// All commands need to have this trait which gives the address of the command
/// which needs to be send via SPI with activated CommandsPin (Data/Command Pin in CommandMode)
pub(crate) trait Command: Copy {
    fn address(self) -> u8;
}

/// Seperates the different LUT for the Display Refresh process
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshLut {
    /// The "normal" full Lookuptable for the Refresh-Sequence
    #[default]
    Full,
    /// The quick LUT where not the full refresh sequence is followed.
    /// This might lead to some ghosting, do a full refresh every few updates.
    Quick,
}

pub(crate) trait InternalWiAdditions<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// This initialises the EPD and powers it up with the LUTs the instance currently holds
    ///
    /// This function is already called from
    ///  - [new()](WaveshareDisplay::new())
    ///  - [`wake_up`]
    ///
    /// This function starts with a hardware reset,
    /// so you don't need to reset the device yourself when trying to wake it up
    /// after setting it to sleep.
    fn init_current(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind>;
}

/// Functions to interact with three color panels
pub trait WaveshareThreeColorDisplay<SPI, BUSY, DC, RST, DELAY>:
    WaveshareDisplay<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Transmits the black and/or the chromatic plane and refreshes the display.
    ///
    /// A plane given as `None` isn't transmitted at all, the panel keeps what its RAM holds.
    fn display_color_frame(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        black: Option<&[u8]>,
        chromatic: Option<&[u8]>,
    ) -> Result<(), ErrorKind>;
}

/// All the functions to interact with the EPDs
///
/// This trait includes all public functions both 1.54" panels share
pub trait WaveshareDisplay<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// The Color Type used by the Display
    type DisplayColor;

    /// Creates a new driver from a SPI peripheral, Busy InputPin, DC and RST
    ///
    /// `config` selects busy polling, window handling and the initial LUT,
    /// `None` means the defaults of [`PanelConfig`] are used.
    ///
    /// This already initialises the device.
    fn new(
        spi: &mut SPI,
        busy: BUSY,
        dc: DC,
        rst: RST,
        delay: &mut DELAY,
        config: Option<PanelConfig>,
    ) -> Result<Self, ErrorKind>
    where
        Self: Sized;

    /// Let the device enter deep-sleep mode to save power.
    ///
    /// The deep sleep mode returns to standby with a hardware reset.
    fn sleep(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind>;

    /// Wakes the device up from sleep
    ///
    /// Also reintialises the device if necessary.
    fn wake_up(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind>;

    /// Sets the backgroundcolor for various commands like [clear_frame](WaveshareDisplay::clear_frame)
    fn set_background_color(&mut self, color: Self::DisplayColor);

    /// Get current background color
    fn background_color(&self) -> &Self::DisplayColor;

    /// Get the width of the display
    fn width(&self) -> u32;

    /// Get the height of the display
    fn height(&self) -> u32;

    /// Where the controller is in its lifecycle
    fn state(&self) -> PanelState;

    /// Clears the frame buffer on the EPD with the declared background color
    ///
    /// The background color can be changed with [`WaveshareDisplay::set_background_color`]
    fn clear_frame(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind>;

    /// Wait until the display has stopped processing data
    ///
    /// You can call this to make sure a frame is displayed before goin further
    fn wait_until_idle(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind>;
}
