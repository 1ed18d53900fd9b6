//! Exact algebra and indexing over an infinite hexagonal tiling. This crate
//! contains all the core coordinate logic: axial coordinate arithmetic with
//! exact rounding, the dual topology of hexes/edges/vertices, line
//! rasterization onto that topology, and a recursive base-7 space-filling
//! index that gives every hex a locality-preserving integer identity.
//! Presentation layers (rendering, planar projection, labeling) are
//! implemented elsewhere and consume this API.
//!
//! ```
//! use hexgrid::{hex_to_index, index_to_hex, FracCoord, HexCoord};
//!
//! let hex = FracCoord::new(1.2, -0.4).round();
//! assert_eq!(hex, HexCoord::new(1, 0));
//! assert_eq!(index_to_hex(hex_to_index(hex)), hex);
//! ```
//!
//! See the [hex] module docs for a description of the coordinate system.

pub mod hex;
mod line;
pub mod spiral;
mod util;

pub use crate::{
    hex::{
        Direction, FracCoord, HexCoord, HexCoordIndexMap, HexCoordMap,
        HexCoordSet, HexEdge, HexVertex, VertexDirection,
    },
    line::{
        line_edges, line_hexes, line_string_edges, line_string_hexes,
        line_string_vertices, line_vertices, ray_intersects,
    },
    spiral::{
        g7_to_index, g7_to_integer, hex_to_index, index_to_g7, index_to_hex,
        integer_to_g7, megahex,
    },
    util::range_len,
};
