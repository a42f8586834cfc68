//! Implicit hydrogen saturation.
//!
//! SMILES leaves hydrogens on organic-subset atoms implicit: an atom gets as
//! many hydrogens as its lowest normal valence leaves unused by written
//! bonds. Bracket atoms opt out of that rule and carry an explicit count
//! (possibly zero). The 3D pipeline needs real H atoms in the graph, so this
//! pass materializes them before embedding.

use crate::element::Element;
use crate::molecule::{Atom, BondOrder, Molecule};

/// Append hydrogen atoms to every under-saturated atom in `mol`.
/// Returns the number of hydrogens added.
pub fn saturate(mol: &mut Molecule) -> usize {
    let mut added = 0;
    // Snapshot: hydrogens appended inside the loop must not be revisited.
    let initial = mol.atoms.len();

    for i in 0..initial {
        let count = implicit_h_count(mol, i);
        for _ in 0..count {
            let h = mol.add_atom(Atom::new(Element::H));
            mol.add_bond(i, h, BondOrder::Single);
            added += 1;
        }
    }

    added
}

/// Hydrogens owed to atom `i` by the SMILES valence model.
fn implicit_h_count(mol: &Molecule, i: usize) -> usize {
    let atom = &mol.atoms[i];

    // Bracket atoms state their hydrogen count; zero means zero.
    if let Some(h) = atom.explicit_h {
        return h as usize;
    }

    let Some(valences) = atom.element.default_valences() else {
        return 0;
    };

    let used = mol.bond_order_sum(i);
    for &v in valences {
        if v as f64 >= used {
            // Aromatic bonds contribute half-orders; round the remainder down
            // (an aromatic carbon with two ring bonds uses 3.0 of 4 -> 1 H).
            return ((v as f64) - used).floor() as usize;
        }
    }

    // Hypervalent beyond the table (e.g. written pentavalent N): no hydrogens.
    0
}
