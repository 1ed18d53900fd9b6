//! The recursive base-7 space-filling index over the hex lattice, in two
//! mutually-derivable encodings.
//!
//! ## Spiral honeycomb mosaic (SHM) index
//!
//! Seven hexes (a center plus its 6 neighbors) form a "megahex"; seven
//! megahexes form a larger one, and so on. Every hex gets a non-negative
//! integer whose base-7 digits spell its recursive path: digit 0 means
//! "stay at the center of the current unit" and digits 1-6 pick one of the
//! outward directions, re-oriented at each level by the [twist] transform.
//! The mapping is a bijection between `[0, 7^k)` and a contiguous region of
//! `7^k` hexes for every level `k`, which makes the index a useful
//! locality-preserving key: nearby hexes share high-order digits.
//!
//! ## G7 index
//!
//! The same recursive path re-expressed as distance along the Gosper curve,
//! written as a signed base-7 string over the alphabet `= - 0 1 2 3 4`
//! (digit values -2..=4). Each level of the curve traverses its seven
//! sub-units in a fixed order, rotated and possibly reflected relative to
//! its parent, so converting between the two encodings threads a running
//! rotation-and-sign state ([Orientation]) down the digit string.
//! Conversions between hexes and G7 compose through the SHM index.

use crate::hex::{HexCoord, HexCoordIndexMap};
use anyhow::{anyhow, ensure};
use log::debug;

/// The seven axial offsets within one megahex, indexed by direction digit.
/// Digit 0 is the nil direction: a megahex is its center's closed
/// neighborhood.
const DIGIT_DIRECTIONS: [HexCoord; 7] = [
    HexCoord::new(0, 0),
    HexCoord::new(1, 0),
    HexCoord::new(0, 1),
    HexCoord::new(-1, 1),
    HexCoord::new(-1, 0),
    HexCoord::new(0, -1),
    HexCoord::new(1, -1),
];

/// Recovers the direction digit from the residue of the projection
/// `q - 2r (mod 7)`. Twisted coordinates project to residue 0, so the
/// residue of any point isolates its local offset within the current unit.
const PROJECTION_DIGITS: [usize; 7] = [0, 1, 5, 6, 3, 2, 4];

/// The seven G7 digit symbols, index-aligned with [G7_VALUES]. `-` is -1
/// and `=` is -2 (a double minus).
const G7_ALPHABET: [char; 7] = ['=', '-', '0', '1', '2', '3', '4'];

/// The digit values of the G7 alphabet
const G7_VALUES: [i64; 7] = [-2, -1, 0, 1, 2, 3, 4];

/// The order in which one level of the Gosper curve visits the seven unit
/// positions, as direction digits. This permutation is self-inverse, so it
/// also maps direction digits back to curve positions.
const CURVE_ORDER: [usize; 7] = [2, 3, 0, 1, 6, 5, 4];

/// Counterclockwise sextant rotation each curve position contributes to the
/// level below it
const CURVE_ROTATION: [usize; 7] = [0, 4, 0, 2, 0, 0, 2];

/// Traversal sense each curve position imposes on the level below it: some
/// sub-units are walked in reverse (-1)
const CURVE_SIGN: [i8; 7] = [-1, 1, 1, -1, -1, -1, 1];

/// One level of the recursive subdivision: rotate by the angle of the
/// direction `(1, -2)` and scale by `sqrt(7)`, mapping each hex center to
/// the center of its megahex one level up. The rotation matrix has
/// coefficients over 3, but reduces to integer form on the plane
/// `q + r + s = 0`, so repeated application is exact.
pub fn twist(p: HexCoord) -> HexCoord {
    HexCoord::new(3 * p.q + 2 * p.r, -2 * p.q + p.r)
}

/// The exact inverse of [twist]: rotate back and scale by `1/sqrt(7)`
/// (coefficients over 21, reduced to sevenths). Both components divide
/// evenly exactly when the projection residue `q - 2r (mod 7)` is zero,
/// which the spiral decomposition guarantees by removing the local offset
/// first.
pub fn untwist(p: HexCoord) -> HexCoord {
    HexCoord::new((p.q - 2 * p.r) / 7, (2 * p.q + 3 * p.r) / 7)
}

/// Compute the SHM index of a hex: peel off the direction digit of the
/// innermost level (read from the projection residue), subtract it, and
/// untwist, until the coordinate reaches the origin. Each untwist strictly
/// shrinks the coordinate, so this terminates in `O(log_7)` of its
/// magnitude. Exact inverse of [index_to_hex].
pub fn hex_to_index(hex: HexCoord) -> u64 {
    let mut p = hex;
    let mut index = 0;
    let mut place = 1u64;
    while p != HexCoord::ORIGIN {
        let residue = (p.q - 2 * p.r).rem_euclid(7) as usize;
        let digit = PROJECTION_DIGITS[residue];
        if digit != 0 {
            p -= DIGIT_DIRECTIONS[digit];
        }
        p = untwist(p);
        // Digits come out least significant first (the local offset at the
        // finest scale), so accumulate by place value
        index += digit as u64 * place;
        place *= 7;
    }
    index
}

/// Find the hex with the given SHM index: for each base-7 digit, most
/// significant first, twist the accumulated coordinate up a level and step
/// in the digit's direction
pub fn index_to_hex(index: u64) -> HexCoord {
    base7_digits(index)
        .into_iter()
        .fold(HexCoord::ORIGIN, |p, digit| {
            twist(p) + DIGIT_DIRECTIONS[digit]
        })
}

/// Re-encode an SHM index as its G7 (Gosper curve) digit string
pub fn index_to_g7(index: u64) -> String {
    let digits = base7_digits(index);
    let mut state = Orientation::seed(digits.len());
    let mut out = String::with_capacity(digits.len());
    for &digit in &digits {
        let position = CURVE_ORDER[state.canonicalize(digit)];
        out.push(G7_ALPHABET[state.orient(position)]);
        state.advance(position);
    }
    out
}

/// Decode a G7 digit string back to its SHM index. Fails on an empty
/// string or an unrecognized digit character.
pub fn g7_to_index(g7: &str) -> anyhow::Result<u64> {
    let indexes = parse_g7(g7)?;
    let mut state = Orientation::seed(indexes.len());
    let mut index = 0u64;
    for i in indexes {
        let position = state.orient(i);
        index = index * 7 + state.rotate(CURVE_ORDER[position]) as u64;
        state.advance(position);
    }
    Ok(index)
}

/// Decode a G7 string as a plain integer: standard base conversion in base
/// -7 with the G7 digit value offsets. Fails on an empty string or an
/// unrecognized digit character.
pub fn g7_to_integer(g7: &str) -> anyhow::Result<i64> {
    let mut value = 0i64;
    for i in parse_g7(g7)? {
        value = -7 * value + G7_VALUES[i];
    }
    Ok(-value)
}

/// Encode a plain integer as a G7 digit string. Either sign is valid, as
/// the curve extends both ways from its origin. `"0"` is the canonical
/// zero.
pub fn integer_to_g7(value: i64) -> String {
    let mut v = -value;
    let mut reversed = Vec::new();
    while v != 0 {
        let i = ((v % 7 - G7_VALUES[0] + 7) % 7) as usize;
        reversed.push(G7_ALPHABET[i]);
        v = (v - G7_VALUES[i]) / -7;
    }
    if reversed.is_empty() {
        return "0".to_owned();
    }
    reversed.into_iter().rev().collect()
}

/// Enumerate the level-`k` megahex in curve order: every hex with SHM index
/// below `7^level`, mapped to its index. The insertion order is index
/// order, so iterating the map walks the region along the spiral.
pub fn megahex(level: u32) -> HexCoordIndexMap<u64> {
    // 7^23 overflows u64
    assert!(level <= 22, "megahex level {level} out of range");
    let size = 7u64.pow(level);
    debug!("enumerating megahex level {level} ({size} hexes)");
    (0..size).map(|index| (index_to_hex(index), index)).collect()
}

/// The base-7 digits of `n`, most significant first. Zero encodes as a
/// single 0 digit.
fn base7_digits(mut n: u64) -> Vec<usize> {
    let mut digits = Vec::new();
    loop {
        digits.push((n % 7) as usize);
        n /= 7;
        if n == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

fn parse_g7(g7: &str) -> anyhow::Result<Vec<usize>> {
    ensure!(!g7.is_empty(), "empty G7 string");
    g7.chars()
        .map(|c| {
            G7_ALPHABET
                .iter()
                .position(|&digit| digit == c)
                .ok_or_else(|| anyhow!("invalid G7 digit {c:?} in {g7:?}"))
        })
        .collect()
}

/// The running orientation threaded down a digit string during SHM <-> G7
/// conversion: a counterclockwise rotation offset in sextants and a
/// traversal sense. Every level of the curve is visited by its parent in a
/// rotated and possibly reflected frame, and the offsets compound, so a
/// wrong seed or update order desynchronizes every digit after the first
/// divergence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Orientation {
    rotation: usize,
    sign: i8,
}

impl Orientation {
    /// Initial state for a digit string of the given (nonzero) length: the
    /// compounded rotation of the outermost level works out to `len - 1`
    /// sextants, and the seed sense is that of the curve's central unit
    fn seed(len: usize) -> Self {
        Self {
            rotation: (len - 1) % 6,
            sign: CURVE_SIGN[CURVE_ORDER[0]],
        }
    }

    /// Un-rotate a direction digit into the curve's canonical frame. The
    /// nil digit has no direction and is fixed.
    fn canonicalize(self, digit: usize) -> usize {
        match digit {
            0 => 0,
            d => (d + 5 - self.rotation) % 6 + 1,
        }
    }

    /// Rotate a canonical direction digit into this frame; inverse of
    /// [Self::canonicalize]
    fn rotate(self, digit: usize) -> usize {
        match digit {
            0 => 0,
            d => (d - 1 + self.rotation) % 6 + 1,
        }
    }

    /// Mirror a curve position when traversing in the reverse sense
    fn orient(self, position: usize) -> usize {
        if self.sign < 0 {
            6 - position
        } else {
            position
        }
    }

    /// Fold one level's contribution into the state for the next (less
    /// significant) digit: the level below starts one sextant back, plus
    /// the position's fixed rotation, and its sense flips with the
    /// position's sign
    fn advance(&mut self, position: usize) {
        self.rotation = (self.rotation + 5 + CURVE_ROTATION[position]) % 6;
        self.sign *= CURVE_SIGN[position];
    }
}
