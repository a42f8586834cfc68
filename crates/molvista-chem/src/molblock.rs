//! V2000 molblock serialization.
//!
//! Layout: three header lines, a counts line ending in "V2000", one line per
//! atom (x, y, z, symbol), one line per bond (1-based indices + type code),
//! `M  CHG` lines for formal charges, and a terminating `M  END`.

use crate::error::{Result, StructureError};
use crate::molecule::Molecule;

/// Program identifier written on the second header line.
const PROGRAM_LINE: &str = "  molvista          3D";

/// Serialize `mol` to molblock text. `name` becomes the first header line.
pub fn write(mol: &Molecule, name: &str) -> Result<String> {
    // V2000 counts fields are three columns wide.
    if mol.atoms.len() > 999 || mol.bonds.len() > 999 {
        return Err(StructureError::Generation(format!(
            "structure too large for a V2000 molblock ({} atoms, {} bonds)",
            mol.atoms.len(),
            mol.bonds.len()
        )));
    }

    let mut out = String::new();
    out.push_str(name.lines().next().unwrap_or(""));
    out.push('\n');
    out.push_str(PROGRAM_LINE);
    out.push('\n');
    out.push('\n');

    out.push_str(&format!(
        "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000\n",
        mol.atoms.len(),
        mol.bonds.len()
    ));

    for atom in &mol.atoms {
        out.push_str(&format!(
            "{:>10.4}{:>10.4}{:>10.4} {:<3} 0  0  0  0  0  0  0  0  0  0  0  0\n",
            atom.position.x,
            atom.position.y,
            atom.position.z,
            atom.element.symbol()
        ));
    }

    for bond in &mol.bonds {
        out.push_str(&format!(
            "{:>3}{:>3}{:>3}  0\n",
            bond.a + 1,
            bond.b + 1,
            bond.order.molblock_code()
        ));
    }

    write_charges(mol, &mut out);
    out.push_str("M  END\n");
    Ok(out)
}

/// `M  CHG` property lines, eight (atom, charge) pairs per line.
fn write_charges(mol: &Molecule, out: &mut String) {
    let charged: Vec<(usize, i8)> = mol
        .atoms
        .iter()
        .enumerate()
        .filter(|(_, a)| a.formal_charge != 0)
        .map(|(i, a)| (i + 1, a.formal_charge))
        .collect();

    for chunk in charged.chunks(8) {
        out.push_str(&format!("M  CHG{:>3}", chunk.len()));
        for (idx, charge) in chunk {
            out.push_str(&format!("{:>4}{:>4}", idx, charge));
        }
        out.push('\n');
    }
}
