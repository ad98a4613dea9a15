//! Rectangle operations for RAM windows
use core::cmp;

/// A rectangle
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    /// Origin X
    pub x: u32,
    /// Origin Y
    pub y: u32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl Rect {
    /// Construct a new rectangle
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Rect {
        Rect { x, y, w, h }
    }

    /// Compute intersection with another rectangle
    pub fn intersect(&self, other: Rect) -> Rect {
        let x = cmp::max(self.x, other.x);
        let y = cmp::max(self.y, other.y);
        let w = cmp::min(self.x.saturating_add(self.w), other.x.saturating_add(other.w))
            .saturating_sub(x);
        let h = cmp::min(self.y.saturating_add(self.h), other.y.saturating_add(other.h))
            .saturating_sub(y);
        Rect { x, y, w, h }
    }

    /// Shrinks the rectangle horizontally to whole bytes: x and width are rounded down
    /// to multiples of 8, the last 3 bits address a pixel inside a byte.
    pub fn byte_aligned(&self) -> Rect {
        Rect {
            x: self.x & !0b111,
            y: self.y,
            w: self.w & !0b111,
            h: self.h,
        }
    }

    /// Whether x and width already are multiples of 8
    pub fn is_byte_aligned(&self) -> bool {
        self.byte_aligned() == *self
    }

    /// Whether `other` lies completely inside this rectangle
    pub fn contains(&self, other: Rect) -> bool {
        self.intersect(other) == other
    }

    /// Last column, inclusive. Only meaningful for non empty rectangles.
    pub fn x_end(&self) -> u32 {
        self.x + self.w - 1
    }

    /// Last row, inclusive. Only meaningful for non empty rectangles.
    pub fn y_end(&self) -> u32 {
        self.y + self.h - 1
    }

    /// Test whether the rectangle is empty.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

#[test]
fn test_intersect() {
    let r1 = Rect::new(0, 0, 10, 10);
    let r2 = Rect::new(6, 3, 10, 10);
    let r3 = r1.intersect(r2);
    assert!(matches!(
        r3,
        Rect {
            x: 6,
            y: 3,
            w: 4,
            h: 7
        }
    ));

    let r1 = Rect::new(0, 0, 10, 10);
    let r2 = Rect::new(10, 11, 10, 10);
    let r3 = r1.intersect(r2);
    assert!(matches!(
        r3,
        Rect {
            x: _,
            y: _,
            w: 0,
            h: 0
        }
    ));
}

#[test]
fn intersect_does_not_overflow() {
    let panel = Rect::new(0, 0, 200, 200);
    let huge = Rect::new(192, 0, u32::MAX, u32::MAX);
    assert_eq!(panel.intersect(huge), Rect::new(192, 0, 8, 200));
}

#[test]
fn byte_alignment() {
    let r = Rect::new(13, 2, 21, 5);
    assert_eq!(r.byte_aligned(), Rect::new(8, 2, 16, 5));
    assert!(!r.is_byte_aligned());
    assert!(Rect::new(16, 3, 8, 1).is_byte_aligned());
}

#[test]
fn containment_and_ends() {
    let panel = Rect::new(0, 0, 200, 200);
    assert!(panel.contains(Rect::new(192, 192, 8, 8)));
    assert!(!panel.contains(Rect::new(192, 192, 16, 8)));
    let r = Rect::new(8, 16, 16, 4);
    assert_eq!((r.x_end(), r.y_end()), (23, 19));
    assert!(Rect::new(8, 8, 0, 4).is_empty());
}
