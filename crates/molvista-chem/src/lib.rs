//! molvista-chem — Structure generation for the compound lookup service.
//!
//! One entry point, [`generate_model`]: SMILES in, optimized 3D molblock out.
//! The pipeline mirrors the usual cheminformatics call sequence:
//! parse → saturate hydrogens → embed a rough conformer → force-field
//! relaxation → serialize. Callers treat this crate as a black box; nothing
//! in the web layer depends on the internals.

pub mod element;
pub mod embed;
pub mod error;
pub mod hydrogens;
pub mod molblock;
pub mod molecule;
pub mod optimize;
pub mod smiles;

use tracing::debug;

pub use error::StructureError;
use optimize::OptimizerParams;

/// A serialized 3D model plus the bits of metadata the caller may report.
#[derive(Debug, Clone)]
pub struct GeneratedModel {
    /// V2000 molblock text.
    pub molblock: String,
    pub heavy_atoms: usize,
    pub total_atoms: usize,
}

/// Parse `smiles`, generate and relax a 3D conformer, and serialize it.
/// `name` is written into the molblock header.
pub fn generate_model(smiles: &str, name: &str) -> Result<GeneratedModel, StructureError> {
    let mut mol = smiles::parse(smiles)?;
    if mol.atoms.is_empty() {
        return Err(StructureError::Empty);
    }

    let heavy_atoms = mol.heavy_atom_count();
    let added_h = hydrogens::saturate(&mut mol);
    embed::assign_coordinates(&mut mol);
    let summary = optimize::minimize(&mut mol, &OptimizerParams::default());

    debug!(
        heavy_atoms,
        added_h,
        steps = summary.steps,
        initial_energy = summary.initial_energy,
        final_energy = summary.final_energy,
        converged = summary.converged,
        "conformer generated"
    );

    let molblock = molblock::write(&mol, name)?;
    Ok(GeneratedModel {
        molblock,
        heavy_atoms,
        total_atoms: mol.atoms.len(),
    })
}
