#![deny(warnings)]

use embedded_hal::delay::DelayNs;
use epd154::{
    epd1in54c::{Epd1in54c, HEIGHT, NUM_DISPLAY_BYTES, WIDTH},
    prelude::*,
};
use linux_embedded_hal::{
    spidev::{self, SpidevOptions},
    sysfs_gpio::Direction,
    Delay, SpidevDevice, SysfsPin,
};

// activate spi, gpio in raspi-config
// needs to be run with sudo because of some sysfs_gpio permission problems and follow-up timing problems

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut spi = SpidevDevice::open("/dev/spidev0.0")?;
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(2_000_000)
        .mode(spidev::SpiModeFlags::SPI_MODE_0)
        .build();
    spi.configure(&options)?;

    let busy = SysfsPin::new(24);
    busy.export()?;
    while !busy.is_exported() {}
    busy.set_direction(Direction::In)?;

    let dc = SysfsPin::new(25);
    dc.export()?;
    while !dc.is_exported() {}
    dc.set_direction(Direction::Out)?;
    dc.set_value(1)?;

    let rst = SysfsPin::new(17);
    rst.export()?;
    while !rst.is_exported() {}
    rst.set_direction(Direction::Out)?;
    rst.set_value(1)?;

    let mut delay = Delay {};

    let mut epd = Epd1in54c::new(&mut spi, busy, dc, rst, &mut delay, None)?;

    // cleared bits are black on the first plane and red on the second one
    let mut black = [0u8; NUM_DISPLAY_BYTES];
    let mut paint: Paint<'_, false> = Paint::new(&mut black, WIDTH, HEIGHT)?;
    paint.clear(false);
    paint.draw_rectangle(4, 4, 147, 147, true);
    paint.draw_line(4, 4, 147, 147, true);

    let mut red = [0u8; NUM_DISPLAY_BYTES];
    let mut red_paint: Paint<'_, false> = Paint::new(&mut red, WIDTH, HEIGHT)?;
    red_paint.clear(false);
    red_paint.draw_filled_circle(76, 76, 30, true);

    epd.display_frame(&mut spi, &mut delay, Some(paint.buffer()), Some(red_paint.buffer()))?;
    delay.delay_ms(5_000);

    epd.clear_frame(&mut spi, &mut delay)?;
    epd.display_frame(&mut spi, &mut delay, None, None)?;

    epd.sleep(&mut spi, &mut delay)?;

    Ok(())
}
