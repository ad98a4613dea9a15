//! A simple Driver for the 1.54" E-Ink Display (200x200, black/white) via SPI
//!
//! The controller holds two RAM planes and swaps them on every refresh, so the frame
//! written after a [`display_frame`](Epd1in54::display_frame) lands in the plane that is
//! not shown. Write the full frame again (or the same partial windows) after every refresh
//! when using the quick LUT.
//!
//! # Example
//!
//!```ignore
//! use epd154::{epd1in54::*, prelude::*};
//!
//! // Setup EPD, loading the partial refresh waveform
//! let config = PanelConfig::new().refresh(RefreshLut::Quick);
//! let mut epd = Epd1in54::new(&mut spi, busy, dc, rst, &mut delay, Some(config))?;
//!
//! // Full frame, then a 64x32 window updated in place
//! epd.set_frame_memory_full(&mut spi, &mut delay, &frame)?;
//! epd.display_frame(&mut spi, &mut delay)?;
//! epd.set_frame_memory_full(&mut spi, &mut delay, &frame)?;
//! epd.set_frame_memory(&mut spi, &mut delay, &clock, 64, 80, 64, 32)?;
//! epd.display_frame(&mut spi, &mut delay)?;
//!
//! // Set the EPD to sleep
//! epd.sleep(&mut spi, &mut delay)?;
//!```

/// Width of the display
pub const WIDTH: u32 = 200;
/// Height of the display
pub const HEIGHT: u32 = 200;
/// Default Background Color
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::White;
/// Bytes of a full frame
pub const NUM_DISPLAY_BYTES: usize = buffer_len(WIDTH as usize, HEIGHT as usize);
/// Bytes of a waveform LUT
pub const LUT_LEN: usize = 30;
const IS_BUSY_LOW: bool = false;
const RESET_DELAY_MS: u32 = 200;
const PANEL: Rect = Rect::new(0, 0, WIDTH, HEIGHT);

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

pub(crate) mod command;
use self::command::Command;

mod constants;
pub use self::constants::{LUT_FULL_UPDATE, LUT_PARTIAL_UPDATE};

use crate::buffer_len;
use crate::color::Color;
use crate::config::{PanelConfig, WindowCheck};
use crate::error::ErrorKind;
use crate::interface::DisplayInterface;
use crate::rect::Rect;
use crate::state::{PanelState, RamPlane};
use crate::traits::{InternalWiAdditions, RefreshLut, WaveshareDisplay};

/// The canonical waveform of a refresh mode
pub const fn lut_for(refresh: RefreshLut) -> &'static [u8; LUT_LEN] {
    match refresh {
        RefreshLut::Full => &LUT_FULL_UPDATE,
        RefreshLut::Quick => &LUT_PARTIAL_UPDATE,
    }
}

/// Epd1in54 driver
pub struct Epd1in54<SPI, BUSY, DC, RST, DELAY> {
    /// Connection Interface
    interface: DisplayInterface<SPI, BUSY, DC, RST, DELAY>,
    /// Background Color
    background_color: Color,
    /// Waveform loaded on every init
    lut: [u8; LUT_LEN],
    state: PanelState,
    /// Plane the next RAM write goes to
    active_plane: RamPlane,
    window_check: WindowCheck,
}

impl<SPI, BUSY, DC, RST, DELAY> Epd1in54<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates the driver without touching the panel.
    ///
    /// Call [`init`](Epd1in54::init) before anything else, or use
    /// [`WaveshareDisplay::new`] which does both.
    pub fn with_config(busy: BUSY, dc: DC, rst: RST, config: PanelConfig) -> Self {
        Epd1in54 {
            interface: DisplayInterface::new(busy, dc, rst, config.busy_wait),
            background_color: DEFAULT_BACKGROUND_COLOR,
            lut: *lut_for(config.refresh),
            state: PanelState::Uninitialized,
            active_plane: RamPlane::A,
            window_check: config.window_check,
        }
    }

    /// Resets and configures the panel, then loads `lut`.
    ///
    /// Also the way out of deep sleep. Afterwards the next RAM write goes to plane A.
    pub fn init(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        lut: &[u8; LUT_LEN],
    ) -> Result<(), ErrorKind> {
        self.state = PanelState::Uninitialized;
        self.interface.reset(delay, RESET_DELAY_MS, RESET_DELAY_MS)?;

        // 3 Databytes:
        // A[7:0]
        // 0.. A[8]
        // 0.. B[2:0]
        // A = HEIGHT - 1, B = 0x00 (GD = 0, SM = 0, TB = 0)
        self.interface.cmd_with_data(
            spi,
            Command::DriverOutputControl,
            &[(HEIGHT - 1) as u8, ((HEIGHT - 1) >> 8) as u8, 0x00],
        )?;

        self.interface.cmd_with_data(
            spi,
            Command::BoosterSoftStartControl,
            &[0xD7, 0xD6, 0x9D],
        )?;

        // VCOM 7C
        self.interface
            .cmd_with_data(spi, Command::WriteVcomRegister, &[0xA8])?;

        // 4 dummy lines per gate
        self.interface
            .cmd_with_data(spi, Command::SetDummyLinePeriod, &[0x1A])?;

        // 2us per line
        self.interface
            .cmd_with_data(spi, Command::SetGateTime, &[0x08])?;

        // x increment, y increment
        self.interface
            .cmd_with_data(spi, Command::DataEntryModeSetting, &[0x03])?;

        self.write_lut(spi, lut)?;

        self.state = PanelState::Idle;
        self.active_plane = RamPlane::A;

        #[cfg(feature = "defmt")]
        defmt::debug!("epd1in54: initialised");
        Ok(())
    }

    /// Loads a waveform and keeps it for later wake ups
    pub fn set_lut(&mut self, spi: &mut SPI, lut: &[u8; LUT_LEN]) -> Result<(), ErrorKind> {
        self.ensure_ready()?;
        self.write_lut(spi, lut)
    }

    /// Loads [`LUT_FULL_UPDATE`] or [`LUT_PARTIAL_UPDATE`]
    pub fn set_refresh(&mut self, spi: &mut SPI, refresh: RefreshLut) -> Result<(), ErrorKind> {
        self.set_lut(spi, lut_for(refresh))
    }

    fn write_lut(&mut self, spi: &mut SPI, lut: &[u8; LUT_LEN]) -> Result<(), ErrorKind> {
        self.interface
            .cmd_with_data(spi, Command::WriteLutRegister, lut)?;
        self.lut = *lut;
        Ok(())
    }

    /// Writes a window of an image into the active RAM plane, without refreshing.
    ///
    /// `x` and `width` are rounded down to multiples of 8. A row of `buffer` is
    /// `width / 8` bytes long, even when the window gets clipped by the panel border.
    /// See [`WindowCheck`] for what happens to windows that don't fit.
    #[allow(clippy::too_many_arguments)]
    pub fn set_frame_memory(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        buffer: &[u8],
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<(), ErrorKind> {
        self.ensure_ready()?;
        let Some((window, stride)) = self.frame_window(Rect::new(x, y, width, height), buffer.len())?
        else {
            return Ok(());
        };

        self.state = PanelState::Writing;
        self.use_window(spi, delay, window)?;
        self.interface.cmd(spi, Command::WriteRam)?;

        let row_len = (window.w / 8) as usize;
        for row in buffer.chunks(stride).take(window.h as usize) {
            self.interface.data(spi, &row[..row_len])?;
        }

        self.state = PanelState::Idle;
        Ok(())
    }

    /// Writes a whole frame of `WIDTH / 8 * HEIGHT` bytes into the active RAM plane
    pub fn set_frame_memory_full(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        buffer: &[u8],
    ) -> Result<(), ErrorKind> {
        self.ensure_ready()?;
        if buffer.len() < NUM_DISPLAY_BYTES {
            return Err(ErrorKind::BufferTooSmall {
                required: NUM_DISPLAY_BYTES,
                actual: buffer.len(),
            });
        }

        self.state = PanelState::Writing;
        self.use_window(spi, delay, PANEL)?;
        self.interface
            .cmd_with_data(spi, Command::WriteRam, &buffer[..NUM_DISPLAY_BYTES])?;
        self.state = PanelState::Idle;
        Ok(())
    }

    /// Fills the active RAM plane with `color` (8 pixels per byte), without refreshing
    pub fn clear_frame_memory(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        color: u8,
    ) -> Result<(), ErrorKind> {
        self.ensure_ready()?;

        self.state = PanelState::Writing;
        self.use_window(spi, delay, PANEL)?;
        self.interface.cmd(spi, Command::WriteRam)?;
        self.interface
            .data_x_times(spi, color, NUM_DISPLAY_BYTES as u32)?;
        self.state = PanelState::Idle;
        Ok(())
    }

    /// Shows the active RAM plane and waits until the refresh is done.
    ///
    /// Afterwards RAM writes go to the other plane.
    pub fn display_frame(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind> {
        self.ensure_ready()?;
        self.start_refresh(spi)?;
        self.interface.wait_until_idle(delay, IS_BUSY_LOW)?;
        self.finish_refresh();
        Ok(())
    }

    /// [`set_frame_memory_full`](Epd1in54::set_frame_memory_full) followed by
    /// [`display_frame`](Epd1in54::display_frame)
    pub fn update_and_display_frame(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        buffer: &[u8],
    ) -> Result<(), ErrorKind> {
        self.set_frame_memory_full(spi, delay, buffer)?;
        self.display_frame(spi, delay)
    }

    /// Checks if the panel is still busy
    pub fn is_busy(&mut self) -> Result<bool, ErrorKind> {
        self.interface.is_busy(IS_BUSY_LOW)
    }

    /// RAM plane the next write goes to
    pub fn active_plane(&self) -> RamPlane {
        self.active_plane
    }

    /// Waveform loaded on the next init or wake up
    pub fn lut(&self) -> &[u8; LUT_LEN] {
        &self.lut
    }

    fn ensure_ready(&self) -> Result<(), ErrorKind> {
        if self.state.is_awake() {
            Ok(())
        } else {
            Err(ErrorKind::NotReady(self.state))
        }
    }

    /// The part of `requested` that gets written, and the row length of the buffer in bytes.
    ///
    /// `None` when there is nothing to write.
    fn frame_window(
        &self,
        requested: Rect,
        buffer_len: usize,
    ) -> Result<Option<(Rect, usize)>, ErrorKind> {
        if self.window_check == WindowCheck::Strict
            && (requested.is_empty()
                || !requested.is_byte_aligned()
                || !PANEL.contains(requested))
        {
            return Err(ErrorKind::InvalidWindow);
        }

        let aligned = requested.byte_aligned();
        let window = PANEL.intersect(aligned);
        if window.is_empty() {
            #[cfg(feature = "defmt")]
            defmt::debug!("epd1in54: nothing left of window {}", requested);
            return Ok(None);
        }

        let stride = (aligned.w / 8) as usize;
        let required = stride * (window.h as usize - 1) + (window.w / 8) as usize;
        if buffer_len < required {
            return match self.window_check {
                WindowCheck::Strict => Err(ErrorKind::BufferTooSmall {
                    required,
                    actual: buffer_len,
                }),
                WindowCheck::Clip => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "epd1in54: ignoring window {}, buffer has {} of {} bytes",
                        requested,
                        buffer_len,
                        required
                    );
                    Ok(None)
                }
            };
        }
        Ok(Some((window, stride)))
    }

    fn use_window(&mut self, spi: &mut SPI, delay: &mut DELAY, window: Rect) -> Result<(), ErrorKind> {
        self.set_memory_area(spi, window.x, window.y, window.x_end(), window.y_end())?;
        self.set_memory_pointer(spi, delay, window.x, window.y)
    }

    /// Specifies the RAM area for data R/W, both ends inclusive
    pub(crate) fn set_memory_area(
        &mut self,
        spi: &mut SPI,
        start_x: u32,
        start_y: u32,
        end_x: u32,
        end_y: u32,
    ) -> Result<(), ErrorKind> {
        // x is positioned in bytes, so the last 3 bits which show the position inside a byte in the ram
        // aren't relevant
        self.interface.cmd_with_data(
            spi,
            Command::SetRamXAddressStartEndPosition,
            &[(start_x >> 3) as u8, (end_x >> 3) as u8],
        )?;

        // 2 Databytes: A[7:0] & 0..A[8] for each - start and end
        self.interface.cmd_with_data(
            spi,
            Command::SetRamYAddressStartEndPosition,
            &[
                start_y as u8,
                (start_y >> 8) as u8,
                end_y as u8,
                (end_y >> 8) as u8,
            ],
        )
    }

    /// Specifies the start point for data R/W
    pub(crate) fn set_memory_pointer(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        x: u32,
        y: u32,
    ) -> Result<(), ErrorKind> {
        self.interface
            .cmd_with_data(spi, Command::SetRamXAddressCounter, &[(x >> 3) as u8])?;

        // 2 Databytes: A[7:0] & 0..A[8]
        self.interface.cmd_with_data(
            spi,
            Command::SetRamYAddressCounter,
            &[y as u8, (y >> 8) as u8],
        )?;

        self.interface.wait_until_idle(delay, IS_BUSY_LOW)
    }

    fn start_refresh(&mut self, spi: &mut SPI) -> Result<(), ErrorKind> {
        // enable clock signal, enable cp, display pattern
        self.interface
            .cmd_with_data(spi, Command::DisplayUpdateControl2, &[0xC4])?;
        self.interface.cmd(spi, Command::MasterActivation)?;
        // MASTER Activation should not be interupted to avoid currption of panel images
        // therefore a terminate command is send
        self.interface.cmd(spi, Command::TerminateFrameReadWrite)?;
        self.state = PanelState::Refreshing;
        Ok(())
    }

    fn finish_refresh(&mut self) {
        self.state = PanelState::Idle;
        self.active_plane = self.active_plane.other();

        #[cfg(feature = "defmt")]
        defmt::debug!("epd1in54: refreshed, writing to plane {}", self.active_plane);
    }
}

#[cfg(feature = "async")]
impl<SPI, BUSY, DC, RST, DELAY> Epd1in54<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin + embedded_hal_async::digital::Wait,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Suspends until the panel reports idle
    pub async fn wait_until_idle_async(&mut self) -> Result<(), ErrorKind> {
        self.interface.wait_until_idle_async(IS_BUSY_LOW).await
    }

    /// Like [`display_frame`](Epd1in54::display_frame), but the refresh is awaited
    /// instead of polled
    pub async fn display_frame_async(&mut self, spi: &mut SPI) -> Result<(), ErrorKind> {
        self.ensure_ready()?;
        self.start_refresh(spi)?;
        self.interface.wait_until_idle_async(IS_BUSY_LOW).await?;
        self.finish_refresh();
        Ok(())
    }
}

impl<SPI, BUSY, DC, RST, DELAY> InternalWiAdditions<SPI, BUSY, DC, RST, DELAY>
    for Epd1in54<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn init_current(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind> {
        let lut = self.lut;
        self.init(spi, delay, &lut)
    }
}

impl<SPI, BUSY, DC, RST, DELAY> WaveshareDisplay<SPI, BUSY, DC, RST, DELAY>
    for Epd1in54<SPI, BUSY, DC, RST, DELAY>
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
        let mut epd = Epd1in54::with_config(busy, dc, rst, config.unwrap_or_default());
        epd.init_current(spi, delay)?;
        Ok(epd)
    }

    fn sleep(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind> {
        self.interface.cmd(spi, Command::DeepSleepMode)?;
        self.interface.wait_until_idle(delay, IS_BUSY_LOW)?;
        self.state = PanelState::Asleep;

        #[cfg(feature = "defmt")]
        defmt::debug!("epd1in54: asleep");
        Ok(())
    }

    fn wake_up(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind> {
        self.init_current(spi, delay)
    }

    fn set_background_color(&mut self, background_color: Color) {
        self.background_color = background_color;
    }

    fn background_color(&self) -> &Color {
        &self.background_color
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
        let color = self.background_color.get_byte_value();
        self.clear_frame_memory(spi, delay, color)
    }

    fn wait_until_idle(&mut self, _spi: &mut SPI, delay: &mut DELAY) -> Result<(), ErrorKind> {
        self.interface.wait_until_idle(delay, IS_BUSY_LOW)
    }
}
