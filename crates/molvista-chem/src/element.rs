//! Element table: symbols, covalent radii, and default valences.
//!
//! Covers the bio-organic core, the halogens, and the metals that show up in
//! the compound registry (Mg, Fe). Anything else fails symbol parsing and is
//! reported to the caller as a SMILES error.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    H,
    B,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    Si,
    P,
    S,
    Cl,
    K,
    Ca,
    Fe,
    Cu,
    Zn,
    Br,
    I,
}

impl Element {
    /// Parse an element symbol as written in SMILES ("C", "Cl", "Fe", ...).
    /// Case must already be normalized (aromatic lowercase handled upstream).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "H" => Self::H,
            "B" => Self::B,
            "C" => Self::C,
            "N" => Self::N,
            "O" => Self::O,
            "F" => Self::F,
            "Na" => Self::Na,
            "Mg" => Self::Mg,
            "Si" => Self::Si,
            "P" => Self::P,
            "S" => Self::S,
            "Cl" => Self::Cl,
            "K" => Self::K,
            "Ca" => Self::Ca,
            "Fe" => Self::Fe,
            "Cu" => Self::Cu,
            "Zn" => Self::Zn,
            "Br" => Self::Br,
            "I" => Self::I,
            _ => return None,
        })
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::H => "H",
            Self::B => "B",
            Self::C => "C",
            Self::N => "N",
            Self::O => "O",
            Self::F => "F",
            Self::Na => "Na",
            Self::Mg => "Mg",
            Self::Si => "Si",
            Self::P => "P",
            Self::S => "S",
            Self::Cl => "Cl",
            Self::K => "K",
            Self::Ca => "Ca",
            Self::Fe => "Fe",
            Self::Cu => "Cu",
            Self::Zn => "Zn",
            Self::Br => "Br",
            Self::I => "I",
        }
    }

    /// Single-bond covalent radius in Ångström (Cordero 2008 values).
    pub fn covalent_radius(&self) -> f64 {
        match self {
            Self::H => 0.31,
            Self::B => 0.84,
            Self::C => 0.76,
            Self::N => 0.71,
            Self::O => 0.66,
            Self::F => 0.57,
            Self::Na => 1.66,
            Self::Mg => 1.41,
            Self::Si => 1.11,
            Self::P => 1.07,
            Self::S => 1.05,
            Self::Cl => 1.02,
            Self::K => 2.03,
            Self::Ca => 1.76,
            Self::Fe => 1.32,
            Self::Cu => 1.32,
            Self::Zn => 1.22,
            Self::Br => 1.20,
            Self::I => 1.39,
        }
    }

    /// Normal valences for SMILES organic-subset atoms, lowest first.
    /// `None` for elements that may only be written in bracket form, which
    /// carry their hydrogen count explicitly and get no implicit saturation.
    pub fn default_valences(&self) -> Option<&'static [u8]> {
        match self {
            Self::B => Some(&[3]),
            Self::C => Some(&[4]),
            Self::N => Some(&[3, 5]),
            Self::O => Some(&[2]),
            Self::P => Some(&[3, 5]),
            Self::S => Some(&[2, 4, 6]),
            Self::F | Self::Cl | Self::Br | Self::I => Some(&[1]),
            _ => None,
        }
    }

    /// Whether the element can be written bare (no brackets) in SMILES.
    pub fn in_organic_subset(&self) -> bool {
        self.default_valences().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip() {
        for el in [
            Element::H,
            Element::C,
            Element::Cl,
            Element::Br,
            Element::Mg,
            Element::Fe,
        ] {
            assert_eq!(Element::from_symbol(el.symbol()), Some(el));
        }
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(Element::from_symbol("Xx"), None);
        assert_eq!(Element::from_symbol(""), None);
    }

    #[test]
    fn test_organic_subset_valences() {
        assert_eq!(Element::C.default_valences(), Some(&[4][..]));
        assert_eq!(Element::N.default_valences(), Some(&[3, 5][..]));
        assert!(Element::Fe.default_valences().is_none());
        assert!(Element::Mg.default_valences().is_none());
    }
}
