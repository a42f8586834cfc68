//! Initial 3D embedding.
//!
//! BFS placement from a seed atom: each new atom goes at an ideal bond length
//! from its parent, in a direction consistent with the parent's local
//! geometry (linear, trigonal planar, or tetrahedral) and pushed away from
//! the parent's already-placed neighbours. Ring-closure partners are reached
//! through the other path around the ring and skipped here; the resulting
//! strain is the optimizer's job. Disconnected components are offset along x
//! so they do not overlap.
//!
//! Placement is deterministic: tie-breaking rotations are seeded from atom
//! indices, so the same SMILES always embeds to the same coordinates.

use std::collections::VecDeque;
use std::f64::consts::PI;

use nalgebra::{Point3, Rotation3, Unit, Vector3};

use crate::element::Element;
use crate::molecule::{BondOrder, Molecule};

/// Angle (radians) between bonds for each local geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalGeometry {
    Linear,
    Planar,
    Tetrahedral,
}

impl LocalGeometry {
    pub fn bond_angle(&self) -> f64 {
        match self {
            Self::Linear => PI,
            Self::Planar => 120.0_f64.to_radians(),
            Self::Tetrahedral => 109.47_f64.to_radians(),
        }
    }
}

/// Ideal length (Å) for a bond, from covalent radii scaled by bond order.
pub fn ideal_bond_length(a: Element, b: Element, order: BondOrder) -> f64 {
    let base = a.covalent_radius() + b.covalent_radius();
    match order {
        BondOrder::Single => base,
        BondOrder::Double => base * 0.87,
        BondOrder::Triple => base * 0.78,
        BondOrder::Aromatic => base * 0.91,
    }
}

/// Local geometry at atom `i`, inferred from its bond orders.
pub fn geometry_at(mol: &Molecule, i: usize) -> LocalGeometry {
    let mut has_unsaturated = false;
    for bond in &mol.bonds {
        if bond.a != i && bond.b != i {
            continue;
        }
        match bond.order {
            BondOrder::Triple => return LocalGeometry::Linear,
            BondOrder::Double | BondOrder::Aromatic => has_unsaturated = true,
            BondOrder::Single => {}
        }
    }
    if has_unsaturated {
        LocalGeometry::Planar
    } else {
        LocalGeometry::Tetrahedral
    }
}

/// Assign coordinates to every atom in `mol`.
pub fn assign_coordinates(mol: &mut Molecule) {
    let n = mol.atoms.len();
    if n == 0 {
        return;
    }

    let mut positioned = vec![false; n];
    let mut queue: VecDeque<usize> = VecDeque::new();

    // Lateral offset for each new disconnected component.
    let mut component_x = 0.0;

    mol.atoms[0].position = Point3::origin();
    positioned[0] = true;
    queue.push_back(0);

    loop {
        if queue.is_empty() {
            // Next disconnected component, if any.
            match (0..n).find(|&i| !positioned[i]) {
                None => break,
                Some(start) => {
                    component_x += 5.0;
                    mol.atoms[start].position = Point3::new(component_x, 0.0, 0.0);
                    positioned[start] = true;
                    queue.push_back(start);
                }
            }
        }

        let Some(u) = queue.pop_front() else { continue };
        let geom = geometry_at(mol, u);
        let parent_pos = mol.atoms[u].position;

        let neighbours: Vec<usize> = mol.adjacency[u].clone();
        for v in neighbours {
            if positioned[v] {
                // Ring-closure partner or earlier BFS layer.
                continue;
            }

            let placed_dirs: Vec<Vector3<f64>> = mol.adjacency[u]
                .iter()
                .filter(|&&w| w != v && positioned[w])
                .filter_map(|&w| {
                    let d = mol.atoms[w].position - parent_pos;
                    (d.norm() > 1e-9).then(|| d.normalize())
                })
                .collect();

            let order = mol
                .bond_between(u, v)
                .map(|b| b.order)
                .unwrap_or(BondOrder::Single);
            let length =
                ideal_bond_length(mol.atoms[u].element, mol.atoms[v].element, order);

            let dir = placement_direction(&placed_dirs, geom, v);
            mol.atoms[v].position = parent_pos + dir * length;
            positioned[v] = true;
            queue.push_back(v);
        }
    }
}

/// Direction for a new bond from an atom whose already-placed bond directions
/// are `placed`. `seed` varies the tie-breaking rotation per atom.
fn placement_direction(
    placed: &[Vector3<f64>],
    geom: LocalGeometry,
    seed: usize,
) -> Vector3<f64> {
    match placed.len() {
        0 => seeded_direction(seed),
        1 => {
            // One fixed neighbour: open the ideal bond angle against it,
            // rotating the perpendicular component by a seed-dependent phase
            // so successive substituents spread around the axis.
            let axis = placed[0];
            let theta = geom.bond_angle();
            let perp = rotate_about(any_perpendicular(&axis), &axis, golden_phase(seed));
            axis * theta.cos() + perp * theta.sin()
        }
        _ => {
            // Several fixed neighbours: point away from all of them.
            let mut sum = Vector3::zeros();
            for d in placed {
                sum += d;
            }
            let away = -sum;
            if away.norm() > 1e-6 {
                away.normalize()
            } else {
                // Neighbours cancel out (e.g. two opposite bonds): go
                // perpendicular to the first pair instead.
                let cross = placed[0].cross(&placed[1]);
                if cross.norm() > 1e-6 {
                    cross.normalize()
                } else {
                    any_perpendicular(&placed[0])
                }
            }
        }
    }
}

/// Deterministic unit vector for a seed; golden-angle spacing keeps distinct
/// seeds well separated.
fn seeded_direction(seed: usize) -> Vector3<f64> {
    let phase = golden_phase(seed);
    Vector3::new(phase.cos(), phase.sin(), 0.25 * ((seed % 7) as f64 - 3.0)).normalize()
}

fn golden_phase(seed: usize) -> f64 {
    // 2π / φ² — the golden angle.
    (seed as f64) * 2.399_963_229_728_653
}

fn any_perpendicular(u: &Vector3<f64>) -> Vector3<f64> {
    let trial = if u.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    u.cross(&trial).normalize()
}

fn rotate_about(v: Vector3<f64>, axis: &Vector3<f64>, angle: f64) -> Vector3<f64> {
    let axis = Unit::new_normalize(*axis);
    Rotation3::from_axis_angle(&axis, angle) * v
}
