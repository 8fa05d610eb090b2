//! Strip geometry helpers
//!
//! Modes address the strip with plain indices; these helpers keep the
//! center/half arithmetic in one place and turn signed positions into
//! checked indices.

/// Index of the first LED of the second half (`len / 2`)
pub const fn half_point(len: usize) -> usize {
    len / 2
}

/// Largest radius an expansion can reach on a strip of `len` LEDs
pub const fn max_radius(len: usize) -> usize {
    len / 2
}

/// LEDs lit at radius zero
///
/// Odd strips have a single center LED. Even strips have two symmetric
/// center LEDs, `len / 2 - 1` and `len / 2`.
pub const fn center_positions(len: usize) -> [Option<usize>; 2] {
    if len == 0 {
        return [None, None];
    }
    let center = len / 2;
    if len.is_multiple_of(2) {
        [Some(center - 1), Some(center)]
    } else {
        [Some(center), None]
    }
}

/// The pair of LEDs forming ring `ring` around the center
///
/// Ring 0 is the innermost ring; on odd strips it collapses to the single
/// center LED. Positions outside the strip are `None`.
pub const fn ring_positions(len: usize, ring: usize) -> [Option<usize>; 2] {
    let center = len / 2;
    let (left, right) = if len.is_multiple_of(2) {
        (center.checked_sub(ring + 1), center + ring)
    } else {
        if ring == 0 {
            return [Some(center), None];
        }
        (center.checked_sub(ring), center + ring)
    };
    let right = if right < len { Some(right) } else { None };
    [left, right]
}

/// Convert a signed position into an index on a strip of `len` LEDs
pub fn signed_index(len: usize, position: i32) -> Option<usize> {
    usize::try_from(position).ok().filter(|&index| index < len)
}
