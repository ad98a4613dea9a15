#![deny(warnings)]

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::Text,
};
use embedded_hal::delay::DelayNs;
use epd154::{
    epd1in54::{Epd1in54, HEIGHT, NUM_DISPLAY_BYTES, WIDTH},
    prelude::*,
};
use linux_embedded_hal::{
    spidev::{self, SpidevOptions},
    sysfs_gpio::Direction,
    Delay, SpidevDevice, SysfsPin,
};

// activate spi, gpio in raspi-config
// needs to be run with sudo because of some sysfs_gpio permission problems and follow-up timing problems
// see https://github.com/rust-embedded/rust-sysfs-gpio/issues/5 and follow-up issues

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configure SPI, mode 0 at 2Mhz
    let mut spi = SpidevDevice::open("/dev/spidev0.0")?;
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(2_000_000)
        .mode(spidev::SpiModeFlags::SPI_MODE_0)
        .build();
    spi.configure(&options)?;

    let busy = SysfsPin::new(24); // GPIO 24, board J-18
    busy.export()?;
    while !busy.is_exported() {}
    busy.set_direction(Direction::In)?;

    let dc = SysfsPin::new(25); // GPIO 25, board J-22
    dc.export()?;
    while !dc.is_exported() {}
    dc.set_direction(Direction::Out)?;
    dc.set_value(1)?;

    let rst = SysfsPin::new(17); // GPIO 17, board J-11
    rst.export()?;
    while !rst.is_exported() {}
    rst.set_direction(Direction::Out)?;
    rst.set_value(1)?;

    let mut delay = Delay {};

    let config = PanelConfig::new().busy_wait(BusyWait::DEFAULT.with_timeout(10_000));
    let mut epd = Epd1in54::new(&mut spi, busy, dc, rst, &mut delay, Some(config))?;

    // Both RAM planes white
    epd.clear_frame(&mut spi, &mut delay)?;
    epd.display_frame(&mut spi, &mut delay)?;
    epd.clear_frame(&mut spi, &mut delay)?;
    epd.display_frame(&mut spi, &mut delay)?;

    // a set bit is white on this panel, colored pixels clear it
    let mut buffer = [0u8; NUM_DISPLAY_BYTES];
    let mut paint: Paint<'_, false> = Paint::new(&mut buffer, WIDTH, HEIGHT)?;
    paint.clear(false);
    paint.draw_rectangle(0, 0, 199, 199, true);
    paint.draw_filled_rectangle(10, 140, 60, 190, true);
    paint.draw_circle(130, 165, 25, true);
    paint.draw_line(10, 30, 190, 30, true);

    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    Text::new("1.54\" e-paper", Point::new(10, 20), style).draw(&mut paint)?;

    paint.set_rotation(DisplayRotation::Rotate90);
    Text::new("Rotate 90!", Point::new(40, 100), style).draw(&mut paint)?;

    epd.update_and_display_frame(&mut spi, &mut delay, paint.buffer())?;
    delay.delay_ms(2_000);

    // Quick refresh: a 32x32 window moving across the panel.
    // Both planes need the new content, the controller swaps them on every refresh.
    epd.set_refresh(&mut spi, RefreshLut::Quick)?;
    let mut window = [0u8; 32 / 8 * 32];
    for i in 0..5 {
        let mut square: Paint<'_, false> = Paint::new(&mut window, 32, 32)?;
        square.clear(i % 2 == 0);
        square.draw_filled_circle(15, 15, 8, i % 2 != 0);
        let x = 40 + i * 24;
        for _ in 0..2 {
            epd.set_frame_memory(&mut spi, &mut delay, square.buffer(), x, 60, 32, 32)?;
            epd.display_frame(&mut spi, &mut delay)?;
        }
    }

    // Back to a clean full refresh before going to sleep
    epd.set_refresh(&mut spi, RefreshLut::Full)?;
    epd.clear_frame(&mut spi, &mut delay)?;
    epd.display_frame(&mut spi, &mut delay)?;

    epd.sleep(&mut spi, &mut delay)?;

    Ok(())
}
