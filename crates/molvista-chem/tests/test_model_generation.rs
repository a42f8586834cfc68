//! End-to-end structure generation over the compound table's SMILES.

use molvista_chem::{generate_model, StructureError};

#[test]
fn test_methane_model() {
    let model = generate_model("C", "Methane").unwrap();
    assert_eq!(model.heavy_atoms, 1);
    assert_eq!(model.total_atoms, 5);

    let lines: Vec<&str> = model.molblock.lines().collect();
    assert_eq!(lines[0], "Methane");
    assert!(lines[3].ends_with("V2000"));
    assert_eq!(lines[3][0..3].trim(), "5");
    assert_eq!(*lines.last().unwrap(), "M  END");
}

#[test]
fn test_registry_smiles_all_generate() {
    // Every structure the service can be asked for must make it through the
    // whole pipeline.
    let table = [
        ("paracetamol", "CC(=O)NC1=CC=C(O)C=C1", 11),
        ("methane", "C", 1),
        ("ethane", "CC", 2),
        ("ferrocene", "c1cc[cH-]c1.[Fe]", 6),
        ("grignard reagent", "CC[Mg]Br", 4),
        ("teflon", "FC(F)(F)C(F)(F)C(F)(F)C(F)(F)F", 14),
        ("bakelite", "c1cc(c(c(c1)OC(C)C)OC(C)C)OC(C)C", 18),
        ("haemoglobin", "CCC1=C2C(=CC=C1)C(=C2)C=O", 12),
        ("benzene", "c1ccccc1", 6),
        ("caffeine", "CN1C=NC2=C1C(=O)N(C(=O)N2C)C", 14),
        ("aspirin", "CC(=O)OC1=CC=CC=C1C(=O)O", 13),
    ];

    for (key, smiles, heavy) in table {
        let model = generate_model(smiles, key)
            .unwrap_or_else(|e| panic!("{key} failed: {e}"));
        assert_eq!(model.heavy_atoms, heavy, "heavy atom count for {key}");
        assert!(model.total_atoms >= heavy);
        assert!(model.molblock.ends_with("M  END\n"));
    }
}

#[test]
fn test_chlorophyll_generates() {
    // Deepest ring nesting in the table (six open ring closures).
    let model = generate_model(
        "CC1=CC2=CC=C3C4=C5C6=C(C=C(C5)C4=NC3=NC2=C1)C=CC(C6)=C",
        "chlorophyll",
    )
    .unwrap();
    assert!(model.heavy_atoms > 20);
    assert!(model.molblock.ends_with("M  END\n"));
}

#[test]
fn test_generation_is_deterministic() {
    let a = generate_model("CC(=O)OC1=CC=CC=C1C(=O)O", "Aspirin").unwrap();
    let b = generate_model("CC(=O)OC1=CC=CC=C1C(=O)O", "Aspirin").unwrap();
    assert_eq!(a.molblock, b.molblock);
}

#[test]
fn test_malformed_smiles_is_a_parse_error() {
    for bad in ["C1CC", "CC)C", "[Zz]", "C$"] {
        assert!(
            matches!(generate_model(bad, "bad"), Err(StructureError::Parse(_))),
            "expected parse error for {bad}"
        );
    }
}
