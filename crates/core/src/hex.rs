//! Basic types for the hex coordinate system and its dual topology.
//!
//! ## Coordinate system
//!
//! Coordinates are axial: each hex center is named by two integers `(q, r)`
//! with an implied third component `s = -q - r`, so every lattice point
//! satisfies `q + r + s = 0` exactly. This is the standard [cube coordinate
//! system](https://www.redblobgames.com/grids/hexagons/#coordinates-cube)
//! with the redundant axis dropped from storage. Keeping all three axes
//! available (via [HexCoord::s]) makes distances, rotations and projections
//! simple symmetric expressions.
//!
//! Two point types split the system the same way the lattice does:
//!
//! - [HexCoord] always refers to a hex center and stores integers, so
//!   lattice invariants hold by construction.
//! - [FracCoord] can refer to *any* point of the plane (edge midpoints,
//!   corners, or arbitrary intermediate results) and stores floats.
//!   [FracCoord::round] maps it back to the nearest lattice point with a
//!   deterministic tie-break.
//!
//! ## Directions
//!
//! Six unit vectors step between neighboring hex centers ([Direction]) and
//! six more point from a center to its corners ([VertexDirection]). Both are
//! indexed 0..6 counterclockwise, and the two interleave: the edge in
//! direction `e` is flanked by the corners `v = (e+5) % 6` and `v = e`.
//! Corner offsets are thirds, so their table is kept 3x-scaled and integral;
//! see [VertexDirection::to_scaled_vector].
//!
//! ## Edges and vertices
//!
//! Edges and corners are identified *relative to a hex*: [HexEdge] is a hex
//! plus a [Direction], [HexVertex] a hex plus a [VertexDirection]. Each
//! physical edge therefore has two identities (one per bounding hex, related
//! by [HexEdge::complement]) and each physical corner has three. The
//! topology queries convert between these identities and project arbitrary
//! fractional points onto the nearest feature.

mod data_structure;
mod topo;
mod unit;

pub use self::{data_structure::*, topo::*, unit::*};
