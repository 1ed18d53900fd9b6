//! The dual topology of the hex lattice: face-relative edge and corner
//! identities, the conversions between equivalent identities, and
//! nearest-feature projection from fractional points. See the parent module
//! docs for how identities relate to physical features.

use crate::{
    hex::{Direction, FracCoord, HexCoord, VertexDirection},
    util::cmp_unwrap,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A directed edge of the hex lattice, identified as one side of a
/// particular hex. The same physical edge is also a side of the neighboring
/// hex; [Self::complement] converts between the two identities.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{}/{:?}", "self.hex", "self.dir")]
pub struct HexEdge {
    pub hex: HexCoord,
    pub dir: Direction,
}

impl HexEdge {
    pub const fn new(hex: HexCoord, dir: Direction) -> Self {
        Self { hex, dir }
    }

    /// The other identity of the same physical edge: owned by the neighbor
    /// across this side and directed the opposite way. An involution:
    /// `edge.complement().complement() == edge`.
    pub fn complement(self) -> Self {
        Self::new(self.hex.neighbor(self.dir), self.dir.opposite())
    }

    /// The two corners bounding this edge, both identified relative to the
    /// owning face
    pub fn vertices(self) -> [HexVertex; 2] {
        let (left, right) = self.dir.flanking_vertices();
        [HexVertex::new(self.hex, left), HexVertex::new(self.hex, right)]
    }

    /// The two hexes bounding this edge: the owner and its neighbor across
    /// the edge (always at hex distance 1)
    pub fn hexes(self) -> [HexCoord; 2] {
        [self.hex, self.hex.neighbor(self.dir)]
    }

    /// The fractional coordinates of the edge's two endpoints
    pub fn endpoints(self) -> [FracCoord; 2] {
        self.vertices().map(HexVertex::coord)
    }

    /// The fractional coordinate of the edge's midpoint: halfway from the
    /// owning center to the neighboring center
    pub fn midpoint(self) -> FracCoord {
        FracCoord::from(self.hex) + FracCoord::from(self.dir.to_vector()) / 2.0
    }

    /// Find the edge nearest to an arbitrary fractional point: round to the
    /// nearest hex, then pick the side whose direction has the largest
    /// strictly-positive projection of the residual offset. A point exactly
    /// on a hex center has no meaningful nearest side; the east edge is the
    /// deterministic default.
    pub fn nearest(point: FracCoord) -> Self {
        let hex = point.round();
        let offset = point - FracCoord::from(hex);
        let dir = max_positive_projection(
            offset,
            Direction::iter().map(|dir| (dir, dir.to_vector())),
        )
        .unwrap_or(Direction::E);
        Self::new(hex, dir)
    }
}

/// A corner of the hex lattice, identified relative to one of the three
/// hexes meeting there. The three identities of a physical corner are
/// related by a fixed rotation; [Self::hexes] and [Self::edges] enumerate
/// the incident features.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{}/{:?}", "self.hex", "self.dir")]
pub struct HexVertex {
    pub hex: HexCoord,
    pub dir: VertexDirection,
}

impl HexVertex {
    pub const fn new(hex: HexCoord, dir: VertexDirection) -> Self {
        Self { hex, dir }
    }

    /// The fractional coordinate of this corner
    pub fn coord(self) -> FracCoord {
        FracCoord::from(self.hex) + self.dir.offset()
    }

    /// The 3 hexes sharing this corner: the owner plus its neighbors across
    /// the corner's two flanking sides
    pub fn hexes(self) -> [HexCoord; 3] {
        let v = self.dir.index();
        [
            self.hex,
            self.hex.neighbor(Direction::from_index(v)),
            self.hex.neighbor(Direction::from_index(v + 1)),
        ]
    }

    /// The 3 edges radiating outward from this corner, each identified
    /// relative to the incident hex it leaves. Complement each one for the
    /// inward-facing identities (see [Self::edges_inward]).
    pub fn edges(self) -> [HexEdge; 3] {
        let v = self.dir.index();
        let hexes = self.hexes();
        [
            HexEdge::new(hexes[0], Direction::from_index(v + 1)),
            HexEdge::new(hexes[1], Direction::from_index(v + 3)),
            HexEdge::new(hexes[2], Direction::from_index(v + 5)),
        ]
    }

    /// The 3 edges around this corner converted to their inward-facing
    /// identities on the hex across each edge
    pub fn edges_inward(self) -> [HexEdge; 3] {
        self.edges().map(HexEdge::complement)
    }

    /// Find the corner nearest to an arbitrary fractional point, analogous
    /// to [HexEdge::nearest] but projecting onto the corner offsets. The
    /// east-northeast corner is the deterministic default on exact centers.
    pub fn nearest(point: FracCoord) -> Self {
        let hex = point.round();
        let offset = point - FracCoord::from(hex);
        let dir = max_positive_projection(
            offset,
            VertexDirection::iter()
                .map(|dir| (dir, dir.to_scaled_vector())),
        )
        .unwrap_or(VertexDirection::ENE);
        Self::new(hex, dir)
    }
}

/// Pick the candidate whose vector has the largest strictly-positive
/// projection of `offset`, or `None` when no projection is positive (i.e.
/// the offset is zero)
fn max_positive_projection<D>(
    offset: FracCoord,
    candidates: impl Iterator<Item = (D, HexCoord)>,
) -> Option<D> {
    candidates
        .map(|(dir, vector)| (dir, offset.dot(vector.into())))
        .filter(|(_, proj)| *proj > 0.0)
        .max_by(|(_, a), (_, b)| cmp_unwrap(a, b))
        .map(|(dir, _)| dir)
}

impl HexCoord {
    /// All 6 edges of this hex, in direction index order
    pub fn edges(self) -> [HexEdge; 6] {
        Direction::COUNTERCLOCKWISE.map(|dir| HexEdge::new(self, dir))
    }

    /// All 6 corners of this hex, in index order
    pub fn vertices(self) -> [HexVertex; 6] {
        VertexDirection::COUNTERCLOCKWISE
            .map(|dir| HexVertex::new(self, dir))
    }

    /// The fractional coordinates of this hex's 6 corners, in index order
    pub fn corners(self) -> [FracCoord; 6] {
        self.vertices().map(HexVertex::coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::collections::HashSet;

    #[test]
    fn test_complement_involution() {
        for hex in [HexCoord::ORIGIN, HexCoord::new(3, -7)] {
            for edge in hex.edges() {
                let complement = edge.complement();
                assert_ne!(complement, edge);
                assert_eq!(complement.complement(), edge);
                // Both identities describe the same physical segment
                let [a, b] = edge.endpoints();
                let [c, d] = complement.endpoints();
                assert!(a.approx_eq(d) && b.approx_eq(c));
            }
        }
    }

    #[test]
    fn test_edge_hexes_adjacent() {
        for edge in HexCoord::new(2, 2).edges() {
            let [own, far] = edge.hexes();
            assert_eq!(own.distance_to(far), 1);
        }
    }

    #[test]
    fn test_edge_midpoint() {
        let edge = HexEdge::new(HexCoord::ORIGIN, Direction::E);
        assert_eq!(edge.midpoint(), FracCoord::new(0.5, 0.0));
        let [a, b] = edge.endpoints();
        let average = (a + b) / 2.0;
        assert!(edge.midpoint().approx_eq(average));
    }

    #[test]
    fn test_face_edge_vertex_identities_match() {
        // Both endpoints of every edge of a face are corner identities of
        // that same face, so the 12 endpoint identities collapse to the 6
        // face corners
        let hex = HexCoord::ORIGIN;
        let from_vertices: HashSet<HexVertex> =
            hex.vertices().into_iter().collect();
        let from_edges: HashSet<HexVertex> = hex
            .edges()
            .into_iter()
            .flat_map(HexEdge::vertices)
            .collect();
        assert_eq!(from_edges.len(), 6);
        assert_eq!(from_vertices, from_edges);
    }

    #[test]
    fn test_vertex_hexes_pairwise_adjacent() {
        for vertex in HexCoord::new(-1, 4).vertices() {
            let [a, b, c] = vertex.hexes();
            assert_eq!(a.distance_to(b), 1);
            assert_eq!(b.distance_to(c), 1);
            assert_eq!(a.distance_to(c), 1);
        }
    }

    #[test]
    fn test_vertex_identities_share_coord() {
        // Each physical corner has one identity per incident hex; walking
        // around via the outward edges must land on the same coordinates
        let vertex = HexVertex::new(HexCoord::ORIGIN, VertexDirection::ENE);
        let expected = vertex.coord();
        for edge in vertex.edges() {
            let coords = edge.vertices().map(HexVertex::coord);
            let matched = coords
                .iter()
                .any(|c| {
                    (c.q - expected.q).abs() <= 1e-6
                        && (c.r - expected.r).abs() <= 1e-6
                });
            assert!(matched, "edge {edge} does not touch {expected}");
        }
        // And the coordinate itself is a third of the scaled table entry
        assert_approx_eq!(expected.q, 2.0 / 3.0);
        assert_approx_eq!(expected.r, -1.0 / 3.0);
    }

    #[test]
    fn test_vertex_outward_edges_radiate() {
        let vertex = HexVertex::new(HexCoord::ORIGIN, VertexDirection::N);
        let coord = vertex.coord();
        for (edge, inward) in
            vertex.edges().into_iter().zip(vertex.edges_inward())
        {
            assert_eq!(edge.complement(), inward);
            // The corner is an endpoint of each radiating edge
            assert!(edge
                .endpoints()
                .iter()
                .any(|p| p.approx_eq(coord)));
        }
    }

    #[test]
    fn test_nearest_edge() {
        // Just east of the origin center, nearest side is the east edge
        let edge = HexEdge::nearest(FracCoord::new(0.4, 0.0));
        assert_eq!(edge, HexEdge::new(HexCoord::ORIGIN, Direction::E));
        // On the center exactly: deterministic default
        let on_center = HexEdge::nearest(FracCoord::new(0.0, 0.0));
        assert_eq!(on_center, HexEdge::new(HexCoord::ORIGIN, Direction::E));
        // Near an edge midpoint, the midpoint's own side wins
        let edge = HexEdge::new(HexCoord::new(2, -1), Direction::NW);
        assert_eq!(HexEdge::nearest(edge.midpoint()), edge);
    }

    #[test]
    fn test_nearest_vertex() {
        // A corner coordinate projects back to an identity of the same
        // physical corner
        let vertex = HexVertex::new(HexCoord::ORIGIN, VertexDirection::S);
        let nearest = HexVertex::nearest(vertex.coord());
        assert!(nearest.coord().approx_eq(vertex.coord()));
        // Slightly inside the owning hex, identity and all
        let nudged = vertex.coord() * 0.9;
        assert_eq!(HexVertex::nearest(nudged), vertex);
    }
}
