//! Delaunay triangulation of room centres
//!
//! The graph builder only needs "give me the triangles of these points", so
//! triangulation sits behind the `Triangulator` trait. `BowyerWatson` is the
//! bundled implementation; its predicates are exact because centres are
//! integer points.
//!
//! The enclosing super-triangle is finite. Hull edges between nearly
//! collinear hull points can therefore be missing from the result, which is
//! then a connected subgraph of the true Delaunay graph rather than all of
//! it. The margin shrinks for widely spread inputs so the i128 in-circle
//! terms cannot overflow; inputs too wide even for the smallest margin yield
//! no triangles.

use hashbrown::HashMap;

use crate::geometry::Point;

/// Three indices into the triangulated point slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle(pub [usize; 3]);

/// Triangulation service
pub trait Triangulator {
    /// Triangulate `points`; collinear or too-small inputs yield no triangles
    fn triangulate(&self, points: &[Point]) -> Vec<Triangle>;
}

impl<T: Triangulator + ?Sized> Triangulator for &T {
    fn triangulate(&self, points: &[Point]) -> Vec<Triangle> {
        (**self).triangulate(points)
    }
}

/// How far the enclosing triangle reaches beyond the input bounding box, in spans
const SUPER_MARGIN: i64 = 256;

/// Largest super-triangle reach; keeps `in_circle` terms (about 12 * d^4) inside i128
const MAX_REACH: i64 = 1 << 29;

/// Incremental Bowyer-Watson triangulator
#[derive(Debug, Clone, Copy, Default)]
pub struct BowyerWatson;

type Vertex = (i64, i64);

/// Twice the signed area of `abc`; positive when counter-clockwise
fn orient(a: Vertex, b: Vertex, c: Vertex) -> i128 {
    let (abx, aby) = (i128::from(b.0 - a.0), i128::from(b.1 - a.1));
    let (acx, acy) = (i128::from(c.0 - a.0), i128::from(c.1 - a.1));
    abx * acy - aby * acx
}

/// Positive when `d` is strictly inside the circumcircle of CCW triangle `abc`
fn in_circle(a: Vertex, b: Vertex, c: Vertex, d: Vertex) -> i128 {
    let (adx, ady) = (i128::from(a.0 - d.0), i128::from(a.1 - d.1));
    let (bdx, bdy) = (i128::from(b.0 - d.0), i128::from(b.1 - d.1));
    let (cdx, cdy) = (i128::from(c.0 - d.0), i128::from(c.1 - d.1));

    let ad = adx * adx + ady * ady;
    let bd = bdx * bdx + bdy * bdy;
    let cd = cdx * cdx + cdy * cdy;

    ad * (bdx * cdy - cdx * bdy) + bd * (cdx * ady - adx * cdy) + cd * (adx * bdy - bdx * ady)
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

impl Triangulator for BowyerWatson {
    fn triangulate(&self, points: &[Point]) -> Vec<Triangle> {
        let n = points.len();
        if n < 3 {
            return Vec::new();
        }

        let mut vertices: Vec<Vertex> = points
            .iter()
            .map(|p| (i64::from(p.x), i64::from(p.y)))
            .collect();

        let min_x = vertices.iter().map(|v| v.0).min().unwrap_or(0);
        let max_x = vertices.iter().map(|v| v.0).max().unwrap_or(0);
        let min_y = vertices.iter().map(|v| v.1).min().unwrap_or(0);
        let max_y = vertices.iter().map(|v| v.1).max().unwrap_or(0);
        let span = (max_x - min_x).max(max_y - min_y).max(1);
        let margin = (MAX_REACH / (6 * span)).min(SUPER_MARGIN);
        if margin < 1 {
            return Vec::new();
        }
        let (cx, cy) = ((min_x + max_x) / 2, (min_y + max_y) / 2);
        let m = span * margin;

        // Counter-clockwise enclosing triangle.
        vertices.push((cx - 3 * m, cy - m));
        vertices.push((cx + 3 * m, cy - m));
        vertices.push((cx, cy + 3 * m));

        let mut triangles: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];

        for p in 0..n {
            let pv = vertices[p];
            let (bad, kept): (Vec<[usize; 3]>, Vec<[usize; 3]>) = triangles
                .into_iter()
                .partition(|t| in_circle(vertices[t[0]], vertices[t[1]], vertices[t[2]], pv) > 0);
            triangles = kept;

            if bad.is_empty() {
                // Duplicate of an existing vertex
                continue;
            }

            let mut edge_count: HashMap<(usize, usize), u32> = HashMap::new();
            for t in &bad {
                for k in 0..3 {
                    *edge_count.entry(edge_key(t[k], t[(k + 1) % 3])).or_insert(0) += 1;
                }
            }

            for t in &bad {
                for k in 0..3 {
                    let (a, b) = (t[k], t[(k + 1) % 3]);
                    if edge_count[&edge_key(a, b)] == 1 && orient(vertices[a], vertices[b], pv) > 0 {
                        triangles.push([a, b, p]);
                    }
                }
            }
        }

        triangles
            .into_iter()
            .filter(|t| t.iter().all(|&v| v < n))
            .map(Triangle)
            .collect()
    }
}
