//! Geometry optimization: steepest descent over a minimal force field.
//!
//! Three terms, each with an analytic gradient:
//!   - harmonic bond stretch toward the covalent-radius ideal length,
//!   - harmonic 1–3 distance toward the length implied by the center atom's
//!     ideal bond angle (the distance-geometry form of an angle-bend term),
//!   - soft quadratic repulsion between non-bonded, non-1–3 pairs closer
//!     than a covalent-radius floor.
//!
//! This is deliberately not a published force field; it only has to relax
//! the rough BFS embedding into a locally sensible geometry.

use std::collections::HashSet;

use nalgebra::Vector3;

use crate::embed::{geometry_at, ideal_bond_length};
use crate::molecule::Molecule;

#[derive(Debug, Clone)]
pub struct OptimizerParams {
    pub max_steps: usize,
    /// Displacement per unit force, Å.
    pub step_size: f64,
    /// Per-atom displacement cap per step, Å.
    pub max_displacement: f64,
    /// Converged when the largest per-atom gradient norm drops below this.
    pub convergence: f64,
    pub k_bond: f64,
    pub k_angle: f64,
    pub k_repulsion: f64,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            max_steps: 800,
            // Small enough to stay stable against the stiffest bond terms.
            step_size: 0.0005,
            max_displacement: 0.1,
            convergence: 0.05,
            k_bond: 300.0,
            k_angle: 60.0,
            k_repulsion: 50.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptimizationSummary {
    pub steps: usize,
    pub initial_energy: f64,
    pub final_energy: f64,
    pub converged: bool,
}

/// Relax `mol` in place. Returns what happened.
pub fn minimize(mol: &mut Molecule, params: &OptimizerParams) -> OptimizationSummary {
    let n = mol.atoms.len();
    let excluded = excluded_pairs(mol);
    let mut gradient = vec![Vector3::zeros(); n];

    let initial_energy = evaluate(mol, params, &excluded, &mut gradient);
    let mut converged = false;
    let mut steps = 0;

    for _ in 0..params.max_steps {
        let max_force = gradient
            .iter()
            .map(|g| g.norm())
            .fold(0.0_f64, f64::max);
        if max_force < params.convergence {
            converged = true;
            break;
        }

        for (atom, g) in mol.atoms.iter_mut().zip(&gradient) {
            let mut displacement = -g * params.step_size;
            let norm = displacement.norm();
            if norm > params.max_displacement {
                displacement *= params.max_displacement / norm;
            }
            atom.position += displacement;
        }
        steps += 1;

        evaluate(mol, params, &excluded, &mut gradient);
    }

    let final_energy = evaluate(mol, params, &excluded, &mut gradient);

    OptimizationSummary {
        steps,
        initial_energy,
        final_energy,
        converged,
    }
}

/// Bonded and 1–3 pairs, stored `(lo, hi)`; these skip the repulsion term.
fn excluded_pairs(mol: &Molecule) -> HashSet<(usize, usize)> {
    let mut set = HashSet::new();
    for bond in &mol.bonds {
        set.insert((bond.a, bond.b));
    }
    for j in 0..mol.atoms.len() {
        let nbrs = &mol.adjacency[j];
        for (x, &i) in nbrs.iter().enumerate() {
            for &k in nbrs.iter().skip(x + 1) {
                set.insert((i.min(k), i.max(k)));
            }
        }
    }
    set
}

/// Total energy; overwrites `gradient` with dE/dposition per atom.
fn evaluate(
    mol: &Molecule,
    params: &OptimizerParams,
    excluded: &HashSet<(usize, usize)>,
    gradient: &mut [Vector3<f64>],
) -> f64 {
    for g in gradient.iter_mut() {
        *g = Vector3::zeros();
    }
    let mut energy = 0.0;

    // Bond stretch.
    for bond in &mol.bonds {
        let r0 = ideal_bond_length(
            mol.atoms[bond.a].element,
            mol.atoms[bond.b].element,
            bond.order,
        );
        energy += harmonic_pair(mol, bond.a, bond.b, r0, params.k_bond, gradient);
    }

    // Angle bend as a 1–3 distance restraint.
    for j in 0..mol.atoms.len() {
        let theta0 = geometry_at(mol, j).bond_angle();
        let nbrs = &mol.adjacency[j];
        for (x, &i) in nbrs.iter().enumerate() {
            for &k in nbrs.iter().skip(x + 1) {
                let order_ij = mol.bond_between(i, j).map(|b| b.order);
                let order_jk = mol.bond_between(j, k).map(|b| b.order);
                let (Some(order_ij), Some(order_jk)) = (order_ij, order_jk) else {
                    continue;
                };
                let r_ij =
                    ideal_bond_length(mol.atoms[i].element, mol.atoms[j].element, order_ij);
                let r_jk =
                    ideal_bond_length(mol.atoms[j].element, mol.atoms[k].element, order_jk);
                // Law of cosines: the 1–3 distance at the ideal angle.
                let d0 = (r_ij * r_ij + r_jk * r_jk
                    - 2.0 * r_ij * r_jk * theta0.cos())
                .sqrt();
                energy += harmonic_pair(mol, i, k, d0, params.k_angle, gradient);
            }
        }
    }

    // Steric repulsion.
    for i in 0..mol.atoms.len() {
        for j in (i + 1)..mol.atoms.len() {
            if excluded.contains(&(i, j)) {
                continue;
            }
            let floor = (1.6
                * (mol.atoms[i].element.covalent_radius()
                    + mol.atoms[j].element.covalent_radius()))
            .min(2.8);
            let delta = mol.atoms[j].position - mol.atoms[i].position;
            let r = delta.norm();
            if r >= floor || r < 1e-9 {
                continue;
            }
            energy += params.k_repulsion * (floor - r).powi(2);
            let dedr = -2.0 * params.k_repulsion * (floor - r);
            let unit = delta / r;
            gradient[j] += unit * dedr;
            gradient[i] -= unit * dedr;
        }
    }

    energy
}

/// Harmonic restraint between atoms `i` and `j` toward distance `r0`.
/// Adds the energy and accumulates gradients; returns the energy term.
fn harmonic_pair(
    mol: &Molecule,
    i: usize,
    j: usize,
    r0: f64,
    k: f64,
    gradient: &mut [Vector3<f64>],
) -> f64 {
    let delta = mol.atoms[j].position - mol.atoms[i].position;
    let r = delta.norm();
    if r < 1e-9 {
        return k * r0 * r0;
    }
    let dedr = 2.0 * k * (r - r0);
    let unit = delta / r;
    gradient[j] += unit * dedr;
    gradient[i] -= unit * dedr;
    k * (r - r0).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::{embed, hydrogens, smiles};
    use nalgebra::Point3;

    fn prepared(s: &str) -> Molecule {
        let mut mol = smiles::parse(s).unwrap();
        hydrogens::saturate(&mut mol);
        embed::assign_coordinates(&mut mol);
        mol
    }

    #[test]
    fn test_energy_never_increases_overall() {
        for s in ["CC", "c1ccccc1", "CC(=O)OC1=CC=CC=C1C(=O)O"] {
            let mut mol = prepared(s);
            let summary = minimize(&mut mol, &OptimizerParams::default());
            assert!(
                summary.final_energy <= summary.initial_energy + 1e-9,
                "energy rose for {s}: {} -> {}",
                summary.initial_energy,
                summary.final_energy
            );
        }
    }

    #[test]
    fn test_bond_lengths_relax_toward_ideal() {
        let mut mol = prepared("CC");
        // Perturb one atom to strain the bond.
        mol.atoms[1].position += nalgebra::Vector3::new(0.4, 0.0, 0.0);
        minimize(&mut mol, &OptimizerParams::default());

        let d = (mol.atoms[0].position - mol.atoms[1].position).norm();
        let ideal = ideal_bond_length(
            Element::C,
            Element::C,
            mol.bond_between(0, 1).unwrap().order,
        );
        assert!((d - ideal).abs() < 0.15, "C-C length {d} vs ideal {ideal}");
    }

    #[test]
    fn test_methane_angles_near_tetrahedral() {
        let mut mol = prepared("C");
        minimize(&mut mol, &OptimizerParams::default());

        let c = mol.atoms[0].position;
        let hs: Vec<Point3<f64>> = mol.atoms[1..].iter().map(|a| a.position).collect();
        assert_eq!(hs.len(), 4);
        for i in 0..4 {
            for j in (i + 1)..4 {
                let u = (hs[i] - c).normalize();
                let v = (hs[j] - c).normalize();
                let angle = u.dot(&v).clamp(-1.0, 1.0).acos().to_degrees();
                assert!(
                    (95.0..=125.0).contains(&angle),
                    "H-C-H angle {angle} out of range"
                );
            }
        }
    }

    #[test]
    fn test_isolated_atom_converges_immediately() {
        let mut mol = smiles::parse("[Fe]").unwrap();
        hydrogens::saturate(&mut mol);
        embed::assign_coordinates(&mut mol);
        let summary = minimize(&mut mol, &OptimizerParams::default());
        assert!(summary.converged);
        assert_eq!(summary.steps, 0);
        assert_eq!(summary.final_energy, 0.0);
    }
}
