//! A simple Driver for the 1.54" (C) E-Ink Display (152x152, black/white/red) via SPI
//!
//! The panel takes two full planes per refresh: the black/white one and the red one.
//! Either can be left out, the panel then keeps what its RAM held before.
//!
//! # Example
//!
//!```ignore
//! use epd154::{epd1in54c::*, prelude::*};
//!
//! let mut epd = Epd1in54c::new(&mut spi, busy, dc, rst, &mut delay, None)?;
//!
//! epd.display_frame(&mut spi, &mut delay, Some(&black), Some(&red))?;
//!
//! // only redraw the black/white plane
//! epd.display_frame(&mut spi, &mut delay, Some(&black), None)?;
//!
//! epd.sleep(&mut spi, &mut delay)?;
//!```

/// Width of epd1in54c in pixels
pub const WIDTH: u32 = 152;
/// Height of epd1in54c in pixels
pub const HEIGHT: u32 = 152;
/// Default Background Color (white)
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::White;
/// Bytes of one plane
pub const NUM_DISPLAY_BYTES: usize = buffer_len(WIDTH as usize, HEIGHT as usize);
const IS_BUSY_LOW: bool = true;
const RESET_DELAY_MS: u32 = 200;
// around every plane transmission
const TRANSMISSION_DELAY_MS: u32 = 2;
const NO_RED: u8 = 0xFF;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

pub(crate) mod command;
use self::command::Command;

mod constants;
use self::constants::*;

use crate::buffer_len;
use crate::color::Color;
use crate::config::PanelConfig;
use crate::error::ErrorKind;
use crate::interface::DisplayInterface;
use crate::state::PanelState;
use crate::traits::{InternalWiAdditions, WaveshareDisplay, WaveshareThreeColorDisplay};

/// The eight waveform tables of the panel, 15 bytes each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriColorLuts {
    /// VCOM of the black/white phase (0x20)
    pub vcom0: [u8; 15],
    /// white to white (0x21)
    pub white: [u8; 15],
    /// black to white (0x22)
    pub black: [u8; 15],
    /// white to black (0x23)
    pub gray1: [u8; 15],
    /// black to black (0x24)
    pub gray2: [u8; 15],
    /// VCOM of the red phase (0x25)
    pub vcom1: [u8; 15],
    /// red phase 0 (0x26)
    pub red0: [u8; 15],
    /// red phase 1 (0x27)
    pub red1: [u8; 15],
}

impl TriColorLuts {
    /// The tables the panel ships with
    pub const DEFAULT: TriColorLuts = TriColorLuts {
        vcom0: LUT_VCOM0,
        white: LUT_W,
        black: LUT_B,
        gray1: LUT_G1,
        gray2: LUT_G2,
        vcom1: LUT_VCOM1,
        red0: LUT_RED0,
        red1: LUT_RED1,
    };
}

impl Default for TriColorLuts {
    fn default() -> Self {
        TriColorLuts::DEFAULT
    }
}

/// Epd1in54c driver
pub struct Epd1in54c<SPI, BUSY, DC, RST, DELAY> {
    interface: DisplayInterface<SPI, BUSY, DC, RST, DELAY>,
    color: Color,
    luts: TriColorLuts,
    state: PanelState,
}

impl<SPI, BUSY, DC, RST, DELAY> InternalWiAdditions<SPI, BUSY, DC, RST, DELAY>
    for Epd1in54c<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn init_current(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind> {
        self.init(spi, delay)
    }
}

impl<SPI, BUSY, DC, RST, DELAY> WaveshareThreeColorDisplay<SPI, BUSY, DC, RST, DELAY>
    for Epd1in54c<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn display_color_frame(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        black: Option<&[u8]>,
        chromatic: Option<&[u8]>,
    ) -> Result<(), ErrorKind> {
        self.display_frame(spi, delay, black, chromatic)
    }
}

impl<SPI, BUSY, DC, RST, DELAY> WaveshareDisplay<SPI, BUSY, DC, RST, DELAY>
    for Epd1in54c<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    type DisplayColor = Color;

    fn new(
        spi: &mut SPI,
        busy: BUSY,
        dc: DC,
        rst: RST,
        delay: &mut DELAY,
        config: Option<PanelConfig>,
    ) -> Result<Self, ErrorKind> {
        let mut epd = Epd1in54c::with_config(busy, dc, rst, config.unwrap_or_default());
        epd.init(spi, delay)?;
        Ok(epd)
    }

    fn sleep(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind> {
        self.interface
            .cmd_with_data(spi, Command::VcomAndDataIntervalSetting, &[0x17])?;
        // to solve Vcom drop
        self.interface
            .cmd_with_data(spi, Command::VcmDcSetting, &[0x00])?;
        // gate switch to external
        self.interface
            .cmd_with_data(spi, Command::PowerSetting, &[0x02, 0x00, 0x00, 0x00])?;
        self.interface.wait_until_idle(delay, IS_BUSY_LOW)?;
        self.interface.cmd(spi, Command::PowerOff)?;
        self.state = PanelState::Asleep;

        #[cfg(feature = "defmt")]
        defmt::debug!("epd1in54c: powered off");
        Ok(())
    }

    fn wake_up(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind> {
        self.init(spi, delay)
    }

    fn set_background_color(&mut self, color: Color) {
        self.color = color;
    }

    fn background_color(&self) -> &Color {
        &self.color
    }

    fn width(&self) -> u32 {
        WIDTH
    }

    fn height(&self) -> u32 {
        HEIGHT
    }

    fn state(&self) -> PanelState {
        self.state
    }

    fn clear_frame(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind> {
        self.ensure_ready()?;
        // a cleared bit on the red plane is red
        let planes = [
            (Command::DataStartTransmission1, self.color.get_byte_value()),
            (Command::DataStartTransmission2, NO_RED),
        ];

        self.state = PanelState::Writing;
        for (command, color) in planes {
            self.interface.cmd(spi, command)?;
            delay.delay_ms(TRANSMISSION_DELAY_MS);
            self.interface
                .data_x_times(spi, color, NUM_DISPLAY_BYTES as u32)?;
            delay.delay_ms(TRANSMISSION_DELAY_MS);
        }
        self.state = PanelState::Idle;
        Ok(())
    }

    fn wait_until_idle(&mut self, _spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind> {
        self.interface.wait_until_idle(delay, IS_BUSY_LOW)
    }
}

impl<SPI, BUSY, DC, RST, DELAY> Epd1in54c<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates the driver without touching the panel.
    ///
    /// Call [`init`](Epd1in54c::init) before anything else, or use
    /// [`WaveshareDisplay::new`] which does both. Only the busy wait of `config`
    /// applies to this panel.
    pub fn with_config(busy: BUSY, dc: DC, rst: RST, config: PanelConfig) -> Self {
        Epd1in54c {
            interface: DisplayInterface::new(busy, dc, rst, config.busy_wait),
            color: DEFAULT_BACKGROUND_COLOR,
            luts: TriColorLuts::DEFAULT,
            state: PanelState::Uninitialized,
        }
    }

    /// Resets the panel, powers it up and loads the waveform tables
    pub fn init(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind> {
        self.state = PanelState::Uninitialized;
        self.interface.reset(delay, RESET_DELAY_MS, RESET_DELAY_MS)?;

        self.interface
            .cmd_with_data(spi, Command::PowerSetting, &[0x07, 0x00, 0x08, 0x00])?;

        // start the booster
        self.interface
            .cmd_with_data(spi, Command::BoosterSoftStart, &[0x17, 0x17, 0x17])?;

        // power on
        self.interface.cmd(spi, Command::PowerOn)?;
        self.interface.wait_until_idle(delay, IS_BUSY_LOW)?;

        // set the panel settings
        self.interface
            .cmd_with_data(spi, Command::PanelSetting, &[0x0F, 0x0D])?;

        self.interface
            .cmd_with_data(spi, Command::VcomAndDataIntervalSetting, &[0xF7])?;

        // set resolution
        self.send_resolution(spi)?;

        self.interface
            .cmd_with_data(spi, Command::VcmDcSetting, &[0xF7])?;

        self.write_luts(spi)?;

        self.state = PanelState::Idle;

        #[cfg(feature = "defmt")]
        defmt::debug!("epd1in54c: initialised");
        Ok(())
    }

    /// Sends the waveform tables again
    pub fn set_lut(&mut self, spi: &mut SPI) -> Result<(), ErrorKind> {
        self.ensure_ready()?;
        self.write_luts(spi)
    }

    /// Replaces the waveform tables, they're kept for later wake ups
    pub fn set_luts(&mut self, spi: &mut SPI, luts: &TriColorLuts) -> Result<(), ErrorKind> {
        self.ensure_ready()?;
        self.luts = *luts;
        self.write_luts(spi)
    }

    /// Waveform tables loaded on every init
    pub fn luts(&self) -> &TriColorLuts {
        &self.luts
    }

    /// Transmits the given planes and refreshes the panel, waiting until it is done.
    ///
    /// Both planes are `WIDTH / 8 * HEIGHT` bytes. A plane given as `None` isn't sent.
    /// Nothing is sent if a plane is too short.
    pub fn display_frame(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        black: Option<&[u8]>,
        red: Option<&[u8]>,
    ) -> Result<(), ErrorKind> {
        self.ensure_ready()?;
        for plane in [black, red].into_iter().flatten() {
            if plane.len() < NUM_DISPLAY_BYTES {
                return Err(ErrorKind::BufferTooSmall {
                    required: NUM_DISPLAY_BYTES,
                    actual: plane.len(),
                });
            }
        }

        self.state = PanelState::Writing;
        if let Some(black) = black {
            self.transmit_plane(spi, delay, Command::DataStartTransmission1, black)?;
        }
        if let Some(red) = red {
            self.transmit_plane(spi, delay, Command::DataStartTransmission2, red)?;
        }

        self.state = PanelState::Refreshing;
        self.interface.cmd(spi, Command::DisplayRefresh)?;
        self.interface.wait_until_idle(delay, IS_BUSY_LOW)?;
        self.state = PanelState::Idle;

        #[cfg(feature = "defmt")]
        defmt::debug!("epd1in54c: refreshed");
        Ok(())
    }

    /// Checks if the panel is still busy
    pub fn is_busy(&mut self) -> Result<bool, ErrorKind> {
        self.interface.is_busy(IS_BUSY_LOW)
    }

    fn ensure_ready(&self) -> Result<(), ErrorKind> {
        if self.state.is_awake() {
            Ok(())
        } else {
            Err(ErrorKind::NotReady(self.state))
        }
    }

    fn transmit_plane(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        command: Command,
        plane: &[u8],
    ) -> Result<(), ErrorKind> {
        self.interface.cmd(spi, command)?;
        delay.delay_ms(TRANSMISSION_DELAY_MS);
        self.interface.data(spi, &plane[..NUM_DISPLAY_BYTES])?;
        delay.delay_ms(TRANSMISSION_DELAY_MS);
        Ok(())
    }

    fn write_luts(&mut self, spi: &mut SPI) -> Result<(), ErrorKind> {
        let luts = self.luts;
        self.set_lut_bw(spi, &luts)?;
        self.set_lut_red(spi, &luts)
    }

    fn set_lut_bw(&mut self, spi: &mut SPI, luts: &TriColorLuts) -> Result<(), ErrorKind> {
        self.interface
            .cmd_with_data(spi, Command::LutForVcom, &luts.vcom0)?;
        self.interface
            .cmd_with_data(spi, Command::LutWhiteToWhite, &luts.white)?;
        self.interface
            .cmd_with_data(spi, Command::LutBlackToWhite, &luts.black)?;
        self.interface
            .cmd_with_data(spi, Command::LutWhiteToBlack, &luts.gray1)?;
        self.interface
            .cmd_with_data(spi, Command::LutBlackToBlack, &luts.gray2)
    }

    fn set_lut_red(&mut self, spi: &mut SPI, luts: &TriColorLuts) -> Result<(), ErrorKind> {
        self.interface
            .cmd_with_data(spi, Command::LutRedVcom, &luts.vcom1)?;
        self.interface
            .cmd_with_data(spi, Command::LutRed0, &luts.red0)?;
        self.interface
            .cmd_with_data(spi, Command::LutRed1, &luts.red1)
    }

    fn send_resolution(&mut self, spi: &mut SPI) -> Result<(), ErrorKind> {
        // | D7 | D6 | D5 | D4 | D3 | D2 | D1 | D0 |
        // |       HRES[7:3]        |  0 |  0 |  0 |
        // | D7 | D6 | D5 | D4 | D3 | D2 | D1 |      D0 |
        // |  - |  - |  - |  - |  - |  - |  - | VRES[8] |
        // |                  VRES[7:0]                 |
        self.interface.cmd_with_data(
            spi,
            Command::TconResolution,
            &[(WIDTH as u8) & 0b1111_1000, (HEIGHT >> 8) as u8, HEIGHT as u8],
        )
    }
}

#[cfg(feature = "async")]
impl<SPI, BUSY, DC, RST, DELAY> Epd1in54c<SPI, BUSY, DC, RST, DELAY>
where
    BUSY: InputPin + embedded_hal_async::digital::Wait,
{
    /// Suspends until the panel reports idle
    pub async fn wait_until_idle_async(&mut self) -> Result<(), ErrorKind> {
        self.interface.wait_until_idle_async(IS_BUSY_LOW).await
    }
}
