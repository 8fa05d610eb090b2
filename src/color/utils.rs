use crate::{color::Rgb, math8::scale8};

/// Scale every channel of a color by `scale` (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_rgb(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Dim a color toward black
///
/// # Arguments
/// * `color` - Source color
/// * `amount` - How much to take away (0 = unchanged, 255 = black)
#[inline]
pub const fn fade_to_black_by(color: Rgb, amount: u8) -> Rgb {
    scale_rgb(color, 255 - amount)
}

/// White at the given level
#[inline]
pub const fn gray(level: u8) -> Rgb {
    Rgb {
        r: level,
        g: level,
        b: level,
    }
}
