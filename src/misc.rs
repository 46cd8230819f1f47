//! Small constants and helpers shared across the decoding pipeline.

/// Maps a zig-zag scan position to its natural (row-major) index inside an
/// 8x8 block. A permutation of `0..64` — see the `zig_zag_is_a_permutation`
/// test below for the testable invariant from the spec.
#[rustfmt::skip]
pub const UN_ZIGZAG: [usize; 64] = [
    0,  1,  8,  16, 9,  2,  3,  10,
    17, 24, 32, 25, 18, 11, 4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13, 6,  7,  14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63
];

/// Number of 8-pixel blocks needed to cover `dimension` pixels.
#[must_use]
pub const fn blocks_for_dimension(dimension: u16) -> u16
{
    (dimension + 7) / 8
}
