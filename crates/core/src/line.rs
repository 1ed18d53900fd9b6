//! Rasterization of straight segments onto the hex lattice: the ordered
//! sequence of hexes, edges, or corners a segment traverses. All three
//! variants are Bresenham-style error-minimization walks; the hex walk
//! steps center to center while the edge/corner walks step corner to corner
//! (corners, not edges, are the connected nodes of the edge lattice).

use crate::{
    hex::{
        Direction, FracCoord, HexCoord, HexEdge, HexVertex, VertexDirection,
    },
    unwrap,
    util::cmp_unwrap,
};
use log::trace;
use strum::IntoEnumIterator;

/// Rasterize the segment `a -> b` onto hex centers: a connected,
/// non-redundant sequence from `a.round()` to `b.round()` in which every
/// consecutive pair is adjacent. Candidate steps are restricted to
/// directions making forward progress (`dot(ab, d) > 0`, which rules out
/// backtracking and guarantees termination); among those, each iteration
/// takes the step minimizing `|dot(ap + d, perpendicular(ab))|`, i.e. the
/// one keeping the path closest to the ideal line. A zero-length segment
/// yields the single rounded point.
pub fn line_hexes(a: FracCoord, b: FracCoord) -> Vec<HexCoord> {
    let ab = b - a;
    let perp = ab.perpendicular();
    let end = b.round();
    let dirs: Vec<HexCoord> = Direction::iter()
        .map(Direction::to_vector)
        .filter(|&d| ab.dot(d.into()) > 0.0)
        .collect();
    // Opposite directions project oppositely, so only the zero vector can
    // leave no forward direction
    assert!(
        !dirs.is_empty() || (ab.q == 0.0 && ab.r == 0.0),
        "no forward direction for segment {a} -> {b}",
    );

    let mut p = a.round();
    let mut ap = FracCoord::from(p) - a;
    let mut line = vec![p];
    while p != end {
        let step = unwrap!(
            dirs.iter().copied().min_by(|&x, &y| {
                let err_x = (ap + x.into()).dot(perp).abs();
                let err_y = (ap + y.into()).dot(perp).abs();
                cmp_unwrap(&err_x, &err_y)
            }),
            "no step from {} toward {}",
            p,
            end
        );
        p += step;
        ap += FracCoord::from(step);
        line.push(p);
    }
    line
}

/// Rasterize a multi-point path onto hex centers, dropping the duplicated
/// shared hex between consecutive segments. A single point yields its
/// rounded hex; an empty path yields nothing.
pub fn line_string_hexes(points: &[FracCoord]) -> Vec<HexCoord> {
    let mut hexes = Vec::new();
    for pair in points.windows(2) {
        let segment = line_hexes(pair[0], pair[1]);
        hexes.extend_from_slice(&segment[..segment.len() - 1]);
    }
    if let Some(last) = points.last() {
        hexes.push(last.round());
    }
    hexes
}

/// Rasterize the segment `a -> b` onto the corner lattice: the connected
/// sequence of corner identities from the corner nearest `a` to the corner
/// nearest `b`
pub fn line_vertices(a: FracCoord, b: FracCoord) -> Vec<HexVertex> {
    vertex_walk(a, b).vertices
}

/// Corner-lattice rasterization of a multi-point path, dropping the
/// duplicated shared corner between consecutive segments
pub fn line_string_vertices(points: &[FracCoord]) -> Vec<HexVertex> {
    let mut vertices = Vec::new();
    for pair in points.windows(2) {
        let segment = vertex_walk(pair[0], pair[1]).vertices;
        vertices.extend_from_slice(&segment[..segment.len() - 1]);
    }
    if let Some(last) = points.last() {
        vertices.push(HexVertex::nearest(*last));
    }
    vertices
}

/// Rasterize the segment `a -> b` onto edges: the edge traversed at each
/// step of the corner walk, one element shorter than [line_vertices] over
/// the same segment. The whole sequence is complemented when the first
/// step's natural orientation would put the start corner on the far side of
/// the first edge.
pub fn line_edges(a: FracCoord, b: FracCoord) -> Vec<HexEdge> {
    vertex_walk(a, b).edges
}

/// Edge rasterization of a multi-point path. Unlike hexes and corners,
/// consecutive segments share no edge, so the per-segment outputs
/// concatenate directly (each segment fixes its own orientation).
pub fn line_string_edges(points: &[FracCoord]) -> Vec<HexEdge> {
    points
        .windows(2)
        .flat_map(|pair| vertex_walk(pair[0], pair[1]).edges)
        .collect()
}

/// The product of a single corner-lattice walk: the corner identities
/// visited, plus the edge traversed at each step (one element shorter)
struct VertexWalk {
    vertices: Vec<HexVertex>,
    edges: Vec<HexEdge>,
}

/// Shared walk behind [line_vertices] and [line_edges]. Advances corner to
/// corner via outward edges, filtered to steps making forward progress
/// along `ab`; the error metric is the same as [line_hexes] with corner
/// offsets in place of unit directions. The outward edge in direction `e`
/// steps along corner direction `(e + 1) % 6`.
fn vertex_walk(a: FracCoord, b: FracCoord) -> VertexWalk {
    let ab = b - a;
    let perp = ab.perpendicular();
    let end = HexVertex::nearest(b).coord();
    let forward: Vec<VertexDirection> = VertexDirection::iter()
        .filter(|vd| ab.dot(vd.to_scaled_vector().into()) > 0.0)
        .collect();
    assert!(
        !forward.is_empty() || (ab.q == 0.0 && ab.r == 0.0),
        "no forward corner direction for segment {a} -> {b}",
    );

    let mut vertex = HexVertex::nearest(a);
    let mut p = vertex.coord();
    let mut ap = p - a;
    let mut vertices = Vec::new();
    let mut edges = Vec::new();
    let mut reverse: Option<bool> = None;
    loop {
        vertices.push(vertex);
        if p.approx_eq(end) {
            break;
        }

        let mut best: Option<(HexEdge, FracCoord)> = None;
        let mut err_min = f64::INFINITY;
        for edge in vertex.edges() {
            let vdir = VertexDirection::from_index(edge.dir.index() + 1);
            if !forward.contains(&vdir) {
                continue;
            }
            let step = vdir.offset();
            let err = (ap + step).dot(perp).abs();
            if err < err_min {
                err_min = err;
                best = Some((edge, step));
            }
        }
        let (edge, step) =
            unwrap!(best, "no step from corner {} toward {}", vertex, b);

        // The first step fixes the orientation for the whole walk: use the
        // complementary identities when the first outward edge's own face
        // is the far side from the start point
        let reverse = *reverse.get_or_insert_with(|| {
            let own = a.distance_to(edge.hex.into());
            let far = a.distance_to(edge.complement().hex.into());
            let flipped = far < own;
            trace!("edge walk {a} -> {b}: complemented = {flipped}");
            flipped
        });
        edges.push(if reverse { edge.complement() } else { edge });
        p += step;
        ap += step;
        vertex = HexVertex::nearest(p);
    }
    VertexWalk { vertices, edges }
}

/// Whether the ray from `origin` along `direction` crosses the segment
/// between `edge`'s two endpoints, via a parametric same-side test: both
/// endpoints must project ahead of the origin, with their perpendicular
/// residuals on opposite sides of the ray. With `None` the ray uses a fixed
/// irrational unit direction that cannot graze lattice points, so the
/// parity of crossings over a closed edge set classifies inside vs outside
/// reliably.
pub fn ray_intersects(
    origin: FracCoord,
    edge: HexEdge,
    direction: Option<FracCoord>,
) -> bool {
    let dir = direction.unwrap_or_else(default_ray);
    let [a, b] = edge.endpoints();
    let oa = a - origin;
    let ob = b - origin;
    let aproj = oa.dot(dir);
    let bproj = ob.dot(dir);
    if aproj < 0.0 || bproj < 0.0 {
        return false;
    }
    let aperp = oa - dir * aproj;
    let bperp = ob - dir * bproj;
    !aperp.approx_eq(FracCoord::ORIGIN) && aperp.dot(bperp) <= 0.0
}

/// Unit vector (under the hex inner product) along `(sqrt2, sqrt3)`
fn default_ray() -> FracCoord {
    let u = FracCoord::new(std::f64::consts::SQRT_2, 3.0_f64.sqrt());
    u / u.dot(u).sqrt()
}
