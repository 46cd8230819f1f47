//! The 2-D separable AAN inverse DCT (C6 IDCT).
//!
//! Ported line-for-line from `original_source/mxgui/jpeg_image.cpp`'s
//! `inverseDCTComponent`: a column pass (no rounding bias) followed by a row
//! pass (with the `+0.5` rounding bias before truncation to `i32`), using
//! the Arai-Agui-Nakajima factorization (5 multiplications per 1-D pass).
//! The scaling constants are derived once, from cosine identities at
//! multiples of `pi/16`, and fixed here as compile-time literals per the
//! "Numeric constants derived at initialization" design note.

#[allow(clippy::excessive_precision)]
const M1: f32 = 1.414_213_6; // 2*cos(2/16*2*pi), == sqrt(2)
#[allow(clippy::excessive_precision)]
const M2: f32 = 1.082_392_2; // m0 - m5
#[allow(clippy::excessive_precision)]
const M3: f32 = 1.414_213_6; // same as m1
#[allow(clippy::excessive_precision)]
const M4: f32 = 2.613_125_9; // m0 + m5
#[allow(clippy::excessive_precision)]
const M5: f32 = 0.765_366_9; // 2*cos(3/16*2*pi)

#[allow(clippy::excessive_precision)]
const S0: f32 = 0.353_553_39; // cos(0/16*pi)/sqrt(8)
#[allow(clippy::excessive_precision)]
const S1: f32 = 0.490_392_64; // cos(1/16*pi)/2
#[allow(clippy::excessive_precision)]
const S2: f32 = 0.461_939_77; // cos(2/16*pi)/2
#[allow(clippy::excessive_precision)]
const S3: f32 = 0.415_734_81; // cos(3/16*pi)/2
#[allow(clippy::excessive_precision)]
const S4: f32 = 0.353_553_39; // cos(4/16*pi)/2
#[allow(clippy::excessive_precision)]
const S5: f32 = 0.277_785_12; // cos(5/16*pi)/2
#[allow(clippy::excessive_precision)]
const S6: f32 = 0.191_341_72; // cos(6/16*pi)/2
#[allow(clippy::excessive_precision)]
const S7: f32 = 0.097_545_16; // cos(7/16*pi)/2

/// One 1-D AAN butterfly, shared between the column and row passes. `read`
/// fetches the 8 dequantized inputs along the current line; `write` stores
/// the 8 outputs, with `bias` (`0.0` for the column pass, `0.5` for the row
/// pass) already folded into the result before truncation.
fn butterfly<F: FnMut(usize) -> f32, W: FnMut(usize, f32)>(mut read: F, mut write: W, bias: f32)
{
    let g0 = read(0) * S0;
    let g1 = read(4) * S4;
    let g2 = read(2) * S2;
    let g3 = read(6) * S6;
    let g4 = read(5) * S5;
    let g5 = read(1) * S1;
    let g6 = read(7) * S7;
    let g7 = read(3) * S3;

    let f0 = g0;
    let f1 = g1;
    let f2 = g2;
    let f3 = g3;
    let f4 = g4 - g7;
    let f5 = g5 + g6;
    let f6 = g5 - g6;
    let f7 = g4 + g7;

    let e0 = f0;
    let e1 = f1;
    let e2 = f2 - f3;
    let e3 = f2 + f3;
    let e4 = f4;
    let e5 = f5 - f7;
    let e6 = f6;
    let e7 = f5 + f7;
    let e8 = f4 + f6;

    let d0 = e0;
    let d1 = e1;
    let d2 = e2 * M1;
    let d3 = e3;
    let d4 = e4 * M2;
    let d5 = e5 * M3;
    let d6 = e6 * M4;
    let d7 = e7;
    let d8 = e8 * M5;

    let c0 = d0 + d1;
    let c1 = d0 - d1;
    let c2 = d2 - d3;
    let c3 = d3;
    let c4 = d4 + d8;
    let c5 = d5 + d7;
    let c6 = d6 - d8;
    let c7 = d7;
    let c8 = c5 - c6;

    let b0 = c0 + c3;
    let b1 = c1 + c2;
    let b2 = c1 - c2;
    let b3 = c0 - c3;
    let b4 = c4 - c8;
    let b5 = c8;
    let b6 = c6 - c7;
    let b7 = c7;

    write(0, b0 + b7 + bias);
    write(1, b1 + b6 + bias);
    write(2, b2 + b5 + bias);
    write(3, b3 + b4 + bias);
    write(4, b3 - b4 + bias);
    write(5, b2 - b5 + bias);
    write(6, b1 - b6 + bias);
    write(7, b0 - b7 + bias);
}

/// Runs the 2-D inverse DCT over one 8x8 block in place (spec §4.6): a
/// column pass with no rounding, then a row pass with `+0.5` before
/// truncating to `i32`. Output values are centered around 0.
pub fn inverse_dct(block: &mut [i32; 64])
{
    // Column pass: for each column i, transform the 8 rows.
    for i in 0..8
    {
        let mut column = [0.0f32; 8];
        butterfly(|row| block[row * 8 + i] as f32, |row, value| column[row] = value, 0.0);
        for row in 0..8
        {
            block[row * 8 + i] = column[row] as i32;
        }
    }

    // Row pass: for each row i, transform the 8 columns, with rounding bias.
    for i in 0..8
    {
        let mut row = [0.0f32; 8];
        butterfly(|col| block[i * 8 + col] as f32, |col, value| row[col] = value, 0.5);
        for col in 0..8
        {
            block[i * 8 + col] = row[col] as i32;
        }
    }
}
