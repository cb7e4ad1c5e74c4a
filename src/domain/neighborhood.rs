//! Neighbor offset sets used when counting live neighbors.

use serde::{Deserialize, Serialize};

/// Which 8 offsets are sampled around a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    /// Canonical Moore neighborhood: every cell of the surrounding 3x3 block
    #[default]
    Moore,
    /// Historical console offset list: (+1, -1) is sampled
    /// twice and (0, -1) is never sampled
    Legacy,
}

const MOORE: [(i8, i8); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

const LEGACY: [(i8, i8); 8] = [
    (0, 1),
    (1, -1),
    (1, 0),
    (-1, 0),
    (1, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
];

impl Neighborhood {
    /// The 8 (dx, dy) offsets, possibly with repeats
    pub const fn offsets(self) -> &'static [(i8, i8); 8] {
        match self {
            Neighborhood::Moore => &MOORE,
            Neighborhood::Legacy => &LEGACY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Neighborhood::Moore => "Moore",
            Neighborhood::Legacy => "Legacy",
        }
    }
}

/// Step `v` by `delta` (-1, 0 or 1) on an axis of length `len`, wrapping at both ends.
#[inline]
pub const fn wrap(v: usize, delta: i8, len: usize) -> usize {
    match delta {
        -1 => if v == 0 { len - 1 } else { v - 1 },
        1 => if v + 1 == len { 0 } else { v + 1 },
        _ => v,
    }
}
