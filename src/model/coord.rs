// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sign-aware Morton encoding of integer cell coordinates.
//!
//! Each axis is split into a sign bit and a magnitude. The two magnitudes are bit-interleaved
//! (Z-order, even bits from `x`, odd bits from `y`) and the two sign bits occupy the lowest bits of
//! the key:
//!
//! ```text
//! key = (interleave(|x|, |y|) << 2) | sign(x) | (sign(y) << 1)
//! ```
//!
//! Every axis gets 16 bits of the 32-bit key budget (15 magnitude bits plus the sign), so the
//! representable range is `-32767..=32767` on both axes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest magnitude representable on either axis.
pub const MAX_MAGNITUDE: u32 = 0x7FFF;

/// A cell position on the unbounded plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns `true` when both axes fit the key budget.
    pub fn is_representable(self) -> bool {
        self.x.unsigned_abs() <= MAX_MAGNITUDE && self.y.unsigned_abs() <= MAX_MAGNITUDE
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for (i32, i32) {
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("coordinate {coord} is outside the encodable range ±{max}", max = MAX_MAGNITUDE)]
    OutOfRange { coord: Coordinate },
    #[error("key {key:#x} does not encode a coordinate")]
    InvalidKey { key: u32 },
}

/// The dense, non-negative key of a [`Coordinate`].
///
/// Keys order cells by their interleaved magnitudes, which keeps nearby coordinates close together
/// and makes iteration order a pure function of the stored set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(u32);

impl CellKey {
    pub fn encode(coord: Coordinate) -> Result<Self, CoordError> {
        if !coord.is_representable() {
            return Err(CoordError::OutOfRange { coord });
        }

        let interleaved =
            spread_bits(coord.x.unsigned_abs()) | (spread_bits(coord.y.unsigned_abs()) << 1);
        let sign_x = u32::from(coord.x < 0);
        let sign_y = u32::from(coord.y < 0);

        Ok(Self((interleaved << 2) | sign_x | (sign_y << 1)))
    }

    pub fn decode(self) -> Result<Coordinate, CoordError> {
        let key = self.0;
        let negative_x = key & 0b01 != 0;
        let negative_y = key & 0b10 != 0;

        let interleaved = key >> 2;
        let mag_x = compact_bits(interleaved);
        let mag_y = compact_bits(interleaved >> 1);

        // Zero is always encoded as non-negative.
        if (negative_x && mag_x == 0) || (negative_y && mag_y == 0) {
            return Err(CoordError::InvalidKey { key });
        }

        let x = apply_sign(mag_x, negative_x);
        let y = apply_sign(mag_y, negative_y);
        Ok(Coordinate { x, y })
    }

    pub const fn from_raw(key: u32) -> Self {
        Self(key)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Encodes `(x, y)` into its cell key.
pub fn encode(x: i32, y: i32) -> Result<u32, CoordError> {
    CellKey::encode(Coordinate::new(x, y)).map(CellKey::get)
}

/// Decodes a cell key back into `(x, y)`.
pub fn decode(key: u32) -> Result<(i32, i32), CoordError> {
    CellKey::from_raw(key).decode().map(Into::into)
}

// Magnitudes are at most 15 bits wide, so the result stays within the low 30 bits.
fn spread_bits(value: u32) -> u32 {
    let mut v = value & 0x0000_ffff;
    v = (v | (v << 8)) & 0x00ff_00ff;
    v = (v | (v << 4)) & 0x0f0f_0f0f;
    v = (v | (v << 2)) & 0x3333_3333;
    (v | (v << 1)) & 0x5555_5555
}

fn compact_bits(value: u32) -> u32 {
    let mut v = value & 0x5555_5555;
    v = (v | (v >> 1)) & 0x3333_3333;
    v = (v | (v >> 2)) & 0x0f0f_0f0f;
    v = (v | (v >> 4)) & 0x00ff_00ff;
    (v | (v >> 8)) & 0x0000_ffff
}

fn apply_sign(magnitude: u32, negative: bool) -> i32 {
    // `magnitude <= MAX_MAGNITUDE` for every 32-bit key.
    let magnitude = magnitude as i32;
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rstest::rstest;

    use super::{decode, encode, CellKey, CoordError, Coordinate, MAX_MAGNITUDE};

    const MAX: i32 = MAX_MAGNITUDE as i32;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(0, 1)]
    #[case(-1, 0)]
    #[case(0, -1)]
    #[case(3, 5)]
    #[case(-3, 5)]
    #[case(3, -5)]
    #[case(-3, -5)]
    #[case(MAX, MAX)]
    #[case(-MAX, -MAX)]
    #[case(MAX, -MAX)]
    #[case(-MAX, 0)]
    fn decode_inverts_encode(#[case] x: i32, #[case] y: i32) {
        let key = encode(x, y).expect("encode");
        assert_eq!(decode(key), Ok((x, y)));
    }

    #[test]
    fn decode_inverts_encode_on_a_dense_window() {
        for x in -40..=40 {
            for y in -40..=40 {
                let key = encode(x, y).expect("encode");
                assert_eq!(decode(key), Ok((x, y)), "round trip of ({x},{y})");
            }
        }
    }

    #[test]
    fn keys_follow_the_documented_bit_layout() {
        assert_eq!(encode(0, 0), Ok(0));
        assert_eq!(encode(1, 0), Ok(0b100));
        assert_eq!(encode(0, 1), Ok(0b1000));
        assert_eq!(encode(-1, 0), Ok(0b101));
        assert_eq!(encode(0, -1), Ok(0b1010));
        assert_eq!(encode(-1, -1), Ok(0b1111));
        assert_eq!(encode(2, 0), Ok(0b1_0000));
    }

    #[test]
    fn zero_encodes_without_a_sign_bit() {
        let key = encode(0, -7).expect("encode");
        assert_eq!(key & 0b01, 0);
        let key = encode(-7, 0).expect("encode");
        assert_eq!(key & 0b10, 0);
    }

    #[test]
    fn random_sample_encodes_injectively() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut pairs = HashSet::new();
        while pairs.len() < 20_000 {
            pairs.insert((rng.gen_range(-MAX..=MAX), rng.gen_range(-MAX..=MAX)));
        }

        let keys = pairs
            .iter()
            .map(|&(x, y)| encode(x, y).expect("encode"))
            .collect::<HashSet<_>>();
        assert_eq!(keys.len(), pairs.len());
    }

    #[test]
    fn out_of_range_magnitudes_are_rejected() {
        for (x, y) in [(MAX + 1, 0), (0, -MAX - 1), (i32::MIN, 0), (0, i32::MAX)] {
            assert_eq!(
                encode(x, y),
                Err(CoordError::OutOfRange { coord: Coordinate::new(x, y) })
            );
        }
    }

    #[test]
    fn negative_zero_keys_are_invalid() {
        assert_eq!(decode(0b01), Err(CoordError::InvalidKey { key: 0b01 }));
        assert_eq!(decode(0b110), Err(CoordError::InvalidKey { key: 0b110 }));
    }

    #[test]
    fn every_raw_key_either_decodes_or_is_negative_zero() {
        for raw in (0..u32::MAX).step_by(7_919) {
            match CellKey::from_raw(raw).decode() {
                Ok(coord) => assert_eq!(CellKey::encode(coord), Ok(CellKey::from_raw(raw))),
                Err(CoordError::InvalidKey { key }) => assert_eq!(key, raw),
                Err(err) => panic!("unexpected error for {raw:#x}: {err}"),
            }
        }
    }

    #[test]
    fn coordinate_serializes_as_a_pair() {
        let json = serde_json::to_string(&Coordinate::new(-2, 3)).expect("serialize");
        assert_eq!(json, "[-2,3]");
        let coord: Coordinate = serde_json::from_str("[4,-1]").expect("deserialize");
        assert_eq!(coord, Coordinate::new(4, -1));
    }
}
