/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Per-atom Voronoi cell volumes in a periodic cell.
//!
//! The cell of an atom is computed directly, by clipping a generous bounding
//! box against the perpendicular-bisector half-spaces of every neighbor among
//! the 27 surrounding cell images.  A Voronoi cell is convex, so the clipped
//! polyhedron *is* the cell, and its volume comes straight from the
//! divergence theorem over the faces.
//!
//! Invariant: the per-atom volumes of a valid structure partition the cell,
//! i.e. they sum to `det(lattice)`.

use ordered_float::NotNan;
use phpost_array_types::V3;

use crate::FailResult;
use crate::core::coords::Coords;

/// Relative coordinates: the atom under consideration sits at the origin.
#[derive(Debug, Clone)]
struct Face {
    verts: Vec<V3>,
    from_box: bool,
}

/// Compute the Voronoi cell volume of every atom.
pub fn cell_volumes(coords: &Coords) -> FailResult<Vec<f64>>
{Ok({
    let lattice = coords.lattice();
    let fracs = coords.to_fracs();
    let carts = coords.to_carts();
    let n = fracs.len();

    // every atom in the 27 surrounding images
    let mut cloud = Vec::with_capacity(27 * n);
    for ia in -1..2 {
        for ib in -1..2 {
            for ic in -1..2 {
                let offset = V3([f64::from(ia), f64::from(ib), f64::from(ic)]);
                for frac in &fracs {
                    cloud.push((*frac + offset) * lattice);
                }
            }
        }
    }

    let half_width = lattice.norms().iter().sum::<f64>();
    let eps = 1e-8 * half_width;

    let mut volumes = Vec::with_capacity(n);
    for i in 0..n {
        let center = carts[i];

        let mut planes: Vec<V3> = cloud.iter()
            .map(|p| *p - center)
            .filter(|d| d.norm() > eps)
            .collect();
        // clipping near planes first shrinks the polyhedron fastest
        planes.sort_by_key(|v| NotNan::new(v.sqnorm()).unwrap());

        let mut poly = bounding_box(half_width);
        for normal in &planes {
            // the bisector can only cut if it is closer than the farthest vertex
            let reach = poly.iter()
                .flat_map(|f| &f.verts)
                .map(|v| v.norm())
                .fold(0.0, f64::max);
            if normal.norm() / 2.0 > reach {
                continue;
            }
            poly = clip(poly, normal, eps);
        }

        if poly.iter().any(|f| f.from_box) {
            bail!("Voronoi cell of atom {} is not closed by the neighbor shell \
                   (pathologically thin cell?)", i);
        }

        volumes.push(volume(&poly));
    }
    volumes
})}

/// An axis-aligned cube about the origin, with outward-wound faces.
fn bounding_box(h: f64) -> Vec<Face> {
    let v = |x: f64, y: f64, z: f64| V3([x, y, z]);
    let quads = [
        // +x, -x, +y, -y, +z, -z
        [v(h, -h, -h), v(h, h, -h), v(h, h, h), v(h, -h, h)],
        [v(-h, -h, -h), v(-h, -h, h), v(-h, h, h), v(-h, h, -h)],
        [v(-h, h, -h), v(-h, h, h), v(h, h, h), v(h, h, -h)],
        [v(-h, -h, -h), v(h, -h, -h), v(h, -h, h), v(-h, -h, h)],
        [v(-h, -h, h), v(h, -h, h), v(h, h, h), v(-h, h, h)],
        [v(-h, -h, -h), v(-h, h, -h), v(h, h, -h), v(h, -h, -h)],
    ];
    quads.iter()
        .map(|q| Face { verts: q.to_vec(), from_box: true })
        .collect()
}

/// Clip a convex polyhedron by the bisector half-space of `normal`
/// (keeping `x · n <= n·n/2`), sealing the cut with a new face.
fn clip(faces: Vec<Face>, normal: &V3, eps: f64) -> Vec<Face> {
    let d = normal.sqnorm() / 2.0;
    let signed = |v: &V3| v.dot(normal) - d;

    let mut out = Vec::with_capacity(faces.len() + 1);
    let mut cut_points: Vec<V3> = vec![];

    for face in faces {
        let mut kept: Vec<V3> = vec![];
        let m = face.verts.len();
        for k in 0..m {
            let a = face.verts[k];
            let b = face.verts[(k + 1) % m];
            let da = signed(&a);
            let db = signed(&b);

            if da <= eps {
                kept.push(a);
                if da.abs() <= eps {
                    cut_points.push(a);
                }
            }
            // a true crossing produces an intersection point
            if (da > eps && db < -eps) || (da < -eps && db > eps) {
                let t = da / (da - db);
                let x = a + (b - a) * t;
                kept.push(x);
                cut_points.push(x);
            }
        }
        if kept.len() >= 3 {
            out.push(Face { verts: kept, from_box: face.from_box });
        }
    }

    if let Some(cap) = cap_face(cut_points, normal, eps) {
        out.push(cap);
    }
    out
}

/// Order the cut points into a polygon wound outward along `normal`.
fn cap_face(mut points: Vec<V3>, normal: &V3, eps: f64) -> Option<Face> {
    // dedupe (each cut edge is seen from two faces)
    let mut unique: Vec<V3> = vec![];
    points.drain(..).for_each(|p| {
        if !unique.iter().any(|q| (p - q).norm() <= 2.0 * eps) {
            unique.push(p);
        }
    });
    if unique.len() < 3 {
        return None;
    }

    let centroid = unique.iter().fold(V3::zero(), |acc, p| acc + p) / unique.len() as f64;

    // in-plane basis with u x v = n
    let n = *normal / normal.norm();
    let any = match n[0].abs() < 0.9 {
        true => V3([1.0, 0.0, 0.0]),
        false => V3([0.0, 1.0, 0.0]),
    };
    let u = {
        let u = n.cross(&any);
        u / u.norm()
    };
    let v = n.cross(&u);

    unique.sort_by(|a, b| {
        let pa = (a - &centroid).dot(&v).atan2((a - &centroid).dot(&u));
        let pb = (b - &centroid).dot(&v).atan2((b - &centroid).dot(&u));
        pa.partial_cmp(&pb).unwrap()
    });

    // CCW in the (u, v) plane winds the loop around +n; with u x v = n that
    // puts the face normal along n, which points away from the kept side
    Some(Face { verts: unique, from_box: false })
}

/// Volume of a convex, outward-wound polyhedron containing the origin.
fn volume(faces: &[Face]) -> f64 {
    let mut six_v = 0.0;
    for face in faces {
        let v0 = face.verts[0];
        for k in 1..face.verts.len() - 1 {
            six_v += v0.dot(&face.verts[k].cross(&face.verts[k + 1]));
        }
    }
    debug_assert!(six_v > 0.0, "inside-out polyhedron!?");
    six_v / 6.0
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::core::coords::CoordsKind;
    use crate::core::lattice::Lattice;

    fn volumes(lattice: Lattice, fracs: Vec<V3>) -> Vec<f64> {
        cell_volumes(&Coords::new(lattice, CoordsKind::Fracs(fracs))).unwrap()
    }

    #[test]
    fn single_atom_owns_the_cell() {
        let vols = volumes(Lattice::cubic(3.0), vec![V3([0.1, 0.2, 0.3])]);
        assert_eq!(vols.len(), 1);
        assert!((vols[0] - 27.0).abs() < 1e-6, "{:?}", vols);
    }

    #[test]
    fn cscl_splits_the_cell_evenly() {
        let vols = volumes(Lattice::cubic(4.0), vec![
            V3([0.0, 0.0, 0.0]),
            V3([0.5, 0.5, 0.5]),
        ]);
        assert!((vols[0] - 32.0).abs() < 1e-6, "{:?}", vols);
        assert!((vols[1] - 32.0).abs() < 1e-6, "{:?}", vols);
    }

    #[test]
    fn volumes_partition_the_cell() {
        // fcc conventional cell: four equivalent sites
        let vols = volumes(Lattice::cubic(3.6), vec![
            V3([0.0, 0.0, 0.0]),
            V3([0.0, 0.5, 0.5]),
            V3([0.5, 0.0, 0.5]),
            V3([0.5, 0.5, 0.0]),
        ]);
        let total: f64 = vols.iter().sum();
        assert!((total - 3.6f64.powi(3)).abs() < 1e-5, "{:?}", vols);
        for &v in &vols {
            assert!((v - total / 4.0).abs() < 1e-6);
        }
    }

    #[test]
    fn squeezed_atom_gets_the_smaller_share() {
        // three planes of atoms along x at 0.0, 0.3, 0.6; the middle one is
        // pinched between closer neighbors on both sides.  Slab widths are
        // exactly 1.05, 0.90, 1.05 in units of a = 3.
        let vols = volumes(Lattice::cubic(3.0), vec![
            V3([0.0, 0.0, 0.0]),
            V3([0.3, 0.0, 0.0]),
            V3([0.6, 0.0, 0.0]),
        ]);
        let total: f64 = vols.iter().sum();
        assert!((total - 27.0).abs() < 1e-6, "{:?}", vols);
        assert!((vols[0] - 1.05 * 9.0).abs() < 1e-6, "{:?}", vols);
        assert!((vols[1] - 0.90 * 9.0).abs() < 1e-6, "{:?}", vols);
        assert!((vols[2] - 1.05 * 9.0).abs() < 1e-6, "{:?}", vols);
    }
}
