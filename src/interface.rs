use crate::{config::BusyWait, error::ErrorKind, traits::Command};
use core::marker::PhantomData;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// The Connection Interface of the 1.54" EPD-Devices
///
/// Both controllers latch every byte on its own chip select cycle, so data is always
/// written one byte per SPI transaction.
pub(crate) struct DisplayInterface<SPI, BUSY, DC, RST, DELAY> {
    /// SPI
    _spi: PhantomData<SPI>,
    /// DELAY
    _delay: PhantomData<DELAY>,
    /// Busy pin, its idle level depends on the panel
    busy: BUSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Resetting
    rst: RST,
    /// How the busy pin is polled
    busy_wait: BusyWait,
}

impl<SPI, BUSY, DC, RST, DELAY> DisplayInterface<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new `DisplayInterface` struct
    pub fn new(busy: BUSY, dc: DC, rst: RST, busy_wait: BusyWait) -> Self {
        DisplayInterface {
            _spi: PhantomData,
            _delay: PhantomData,
            busy,
            dc,
            rst,
            busy_wait,
        }
    }

    /// Basic function for sending [Commands](Command).
    ///
    /// Enables direct interaction with the device with the help of [data()](DisplayInterface::data())
    pub(crate) fn cmd<T: Command>(&mut self, spi: &mut SPI, command: T) -> Result<(), ErrorKind> {
        // low for commands
        self.dc.set_low().map_err(ErrorKind::dc)?;

        // Transfer the command over spi
        self.write(spi, command.address())
    }

    /// Basic function for sending an array of u8-values of data over spi
    ///
    /// Enables direct interaction with the device with the help of [cmd()](DisplayInterface::cmd())
    pub(crate) fn data(&mut self, spi: &mut SPI, data: &[u8]) -> Result<(), ErrorKind> {
        // high for data
        self.dc.set_high().map_err(ErrorKind::dc)?;

        for val in data.iter().copied() {
            // Transfer data one u8 at a time over spi
            self.write(spi, val)?;
        }
        Ok(())
    }

    /// Basic function for sending [Commands](Command) and the data belonging to it.
    pub(crate) fn cmd_with_data<T: Command>(
        &mut self,
        spi: &mut SPI,
        command: T,
        data: &[u8],
    ) -> Result<(), ErrorKind> {
        self.cmd(spi, command)?;
        self.data(spi, data)
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi
    ///
    /// Enables direct interaction with the device with the help of [cmd()](DisplayInterface::cmd())
    pub(crate) fn data_x_times(
        &mut self,
        spi: &mut SPI,
        val: u8,
        repetitions: u32,
    ) -> Result<(), ErrorKind> {
        // high for data
        self.dc.set_high().map_err(ErrorKind::dc)?;
        // Transfer data (u8) over spi
        for _ in 0..repetitions {
            self.write(spi, val)?;
        }
        Ok(())
    }

    // one byte, one transaction
    fn write(&mut self, spi: &mut SPI, byte: u8) -> Result<(), ErrorKind> {
        spi.write(&[byte]).map_err(ErrorKind::spi)
    }

    /// Waits until device isn't busy anymore
    ///
    /// This is normally handled by the more complicated commands themselves,
    /// but in the case you send data and commands directly you might need to check
    /// if the device is still busy
    ///
    /// is_busy_low
    ///
    ///  - TRUE for epd1in54c (busy low, idle high)
    ///  - FALSE for epd1in54 (busy high, idle low)
    ///
    /// The line is read before the first sleep, so an idle panel costs a single read.
    pub(crate) fn wait_until_idle(
        &mut self,
        delay: &mut DELAY,
        is_busy_low: bool,
    ) -> Result<(), ErrorKind> {
        let BusyWait {
            poll_interval_ms,
            timeout_ms,
        } = self.busy_wait;
        let mut waited_ms: u32 = 0;

        while self.is_busy(is_busy_low)? {
            if let Some(timeout_ms) = timeout_ms {
                if waited_ms >= timeout_ms {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("busy line still active after {} ms", waited_ms);
                    return Err(ErrorKind::BusyTimeout);
                }
            }
            delay.delay_ms(poll_interval_ms);
            waited_ms = waited_ms.saturating_add(poll_interval_ms);
        }
        Ok(())
    }

    /// Checks if device is still busy
    ///
    /// is_busy_low
    ///
    ///  - TRUE for epd1in54c
    ///  - FALSE for epd1in54
    pub(crate) fn is_busy(&mut self, is_busy_low: bool) -> Result<bool, ErrorKind> {
        if is_busy_low {
            self.busy.is_low().map_err(ErrorKind::busy)
        } else {
            self.busy.is_high().map_err(ErrorKind::busy)
        }
    }

    /// Resets the device.
    ///
    /// Often used to awake the module from deep sleep.
    ///
    /// The reset pin is kept low for `duration_ms` and the device gets `settle_ms`
    /// after the release before any command is sent. Both 1.54" panels use 200ms each.
    pub(crate) fn reset(
        &mut self,
        delay: &mut DELAY,
        duration_ms: u32,
        settle_ms: u32,
    ) -> Result<(), ErrorKind> {
        self.rst.set_low().map_err(ErrorKind::rst)?;
        delay.delay_ms(duration_ms);
        self.rst.set_high().map_err(ErrorKind::rst)?;
        delay.delay_ms(settle_ms);
        Ok(())
    }
}

#[cfg(feature = "async")]
impl<SPI, BUSY, DC, RST, DELAY> DisplayInterface<SPI, BUSY, DC, RST, DELAY>
where
    BUSY: InputPin + embedded_hal_async::digital::Wait,
{
    /// Suspends until the busy pin reports idle
    ///
    /// Nothing bounds this wait, wrap it in the executor's timeout if the panel might hang.
    pub(crate) async fn wait_until_idle_async(&mut self, is_busy_low: bool) -> Result<(), ErrorKind> {
        if is_busy_low {
            self.busy.wait_for_high().await.map_err(ErrorKind::busy)
        } else {
            self.busy.wait_for_low().await.map_err(ErrorKind::busy)
        }
    }
}
