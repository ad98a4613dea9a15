use epd154::paint::{DisplayRotation, Paint};
use proptest::prelude::*;

const SIDE: u32 = 32;

fn rotation() -> impl Strategy<Value = DisplayRotation> {
    prop_oneof![
        Just(DisplayRotation::Rotate0),
        Just(DisplayRotation::Rotate90),
        Just(DisplayRotation::Rotate180),
        Just(DisplayRotation::Rotate270),
    ]
}

fn colored_bits(paint: &Paint<'_>) -> u32 {
    paint.buffer().iter().map(|b| b.count_ones()).sum()
}

fn square_buffer() -> Vec<u8> {
    vec![0u8; (SIDE / 8 * SIDE) as usize]
}

proptest! {
    #[test]
    fn every_rotation_covers_the_canvas(
        rotation in rotation(),
        width_bytes in 1u32..5,
        height in 1u32..24,
    ) {
        let width = width_bytes * 8;
        let mut buffer = vec![0u8; (width / 8 * height) as usize];
        let mut paint: Paint = Paint::new(&mut buffer, width, height).unwrap();
        paint.set_rotation(rotation);

        let (rotated_width, rotated_height) = paint.rotated_size();
        for y in 0..rotated_height as i32 {
            for x in 0..rotated_width as i32 {
                paint.draw_pixel(x, y, true);
            }
        }
        // as many logical as physical pixels, all of them reached
        prop_assert!(paint.buffer().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn a_pixel_is_a_single_bit(
        rotation in rotation(),
        x in 0i32..SIDE as i32,
        y in 0i32..SIDE as i32,
    ) {
        let mut buffer = square_buffer();
        let mut paint: Paint = Paint::new(&mut buffer, SIDE, SIDE).unwrap();
        paint.set_rotation(rotation);
        paint.draw_pixel(x, y, true);
        prop_assert_eq!(colored_bits(&paint), 1);
        prop_assert_eq!(paint.pixel(x, y), Some(true));
    }

    #[test]
    fn clear_is_idempotent(colored in any::<bool>(), noise in prop::collection::vec(any::<u8>(), 128)) {
        let mut buffer = noise;
        let mut paint: Paint = Paint::new(&mut buffer, SIDE, SIDE).unwrap();
        paint.clear(colored);
        let once = paint.buffer().to_vec();
        paint.clear(colored);
        prop_assert_eq!(paint.buffer(), &once[..]);
        let expected = if colored { 0xFF } else { 0x00 };
        prop_assert!(once.iter().all(|&b| b == expected));
    }

    #[test]
    fn filled_rectangle_is_a_run_of_vertical_lines(
        rotation in rotation(),
        x0 in -4i32..36,
        y0 in -4i32..36,
        x1 in -4i32..36,
        y1 in -4i32..36,
    ) {
        let mut filled = square_buffer();
        let mut lines = square_buffer();
        {
            let mut paint: Paint = Paint::new(&mut filled, SIDE, SIDE).unwrap();
            paint.set_rotation(rotation);
            paint.draw_filled_rectangle(x0, y0, x1, y1, true);
        }
        {
            let mut paint: Paint = Paint::new(&mut lines, SIDE, SIDE).unwrap();
            paint.set_rotation(rotation);
            for x in x0.min(x1)..=x0.max(x1) {
                paint.draw_vertical_line(x, y0.min(y1), (y1 - y0).abs() + 1, true);
            }
        }
        prop_assert_eq!(filled, lines);
    }

    #[test]
    fn circles_are_mirror_symmetric(
        cx in 8i32..24,
        cy in 8i32..24,
        radius in 0i32..8,
        filled in any::<bool>(),
    ) {
        let mut buffer = square_buffer();
        let mut paint: Paint = Paint::new(&mut buffer, SIDE, SIDE).unwrap();
        if filled {
            paint.draw_filled_circle(cx, cy, radius, true);
        } else {
            paint.draw_circle(cx, cy, radius, true);
        }

        for dy in 0..=radius {
            for dx in 0..=radius {
                let pixel = paint.pixel(cx + dx, cy + dy);
                prop_assert_eq!(pixel, paint.pixel(cx - dx, cy + dy));
                prop_assert_eq!(pixel, paint.pixel(cx + dx, cy - dy));
                prop_assert_eq!(pixel, paint.pixel(cx - dx, cy - dy));
            }
        }
        prop_assert_eq!(paint.pixel(cx + radius, cy), Some(true));
        prop_assert_eq!(paint.pixel(cx, cy - radius), Some(true));
    }

    #[test]
    fn lines_reach_both_ends(
        x0 in 0i32..SIDE as i32,
        y0 in 0i32..SIDE as i32,
        x1 in 0i32..SIDE as i32,
        y1 in 0i32..SIDE as i32,
    ) {
        let mut buffer = square_buffer();
        let mut paint: Paint = Paint::new(&mut buffer, SIDE, SIDE).unwrap();
        paint.draw_line(x0, y0, x1, y1, true);
        prop_assert_eq!(paint.pixel(x0, y0), Some(true));
        prop_assert_eq!(paint.pixel(x1, y1), Some(true));
        let steps = (x1 - x0).abs().max((y1 - y0).abs()) as u32;
        prop_assert_eq!(colored_bits(&paint), steps + 1);
    }
}
