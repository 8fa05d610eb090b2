/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Re-map a number from one range to another
///
/// Integer arithmetic, truncating toward zero. Values outside the input range
/// are extrapolated, so callers clamp the result themselves. A degenerate
/// input range maps everything to `out_min`.
#[inline]
pub const fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Re-map and clamp into an 8-bit level
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn level8(
    x: i32,
    in_min: i32,
    in_max: i32,
    out_from: u8,
    out_to: u8,
    floor: u8,
    ceil: u8,
) -> u8 {
    let mapped = map_range(x, in_min, in_max, i32::from(out_from), i32::from(out_to));
    mapped.clamp(i32::from(floor), i32::from(ceil)) as u8
}
