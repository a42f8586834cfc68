//! Molecular graph model: atoms, bonds, adjacency.

use nalgebra::Point3;

use crate::element::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Numeric bond order used for valence accounting (aromatic = 1.5).
    pub fn order(&self) -> f64 {
        match self {
            Self::Single => 1.0,
            Self::Double => 2.0,
            Self::Triple => 3.0,
            Self::Aromatic => 1.5,
        }
    }

    /// Bond type code in the V2000 bond block.
    pub fn molblock_code(&self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Aromatic => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Atom {
    pub element: Element,
    pub position: Point3<f64>,
    pub formal_charge: i8,
    /// Written lowercase in the source SMILES.
    pub aromatic: bool,
    /// Hydrogen count stated in a bracket atom. `None` for organic-subset
    /// atoms, whose hydrogens are implied by valence.
    pub explicit_h: Option<u8>,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            position: Point3::origin(),
            formal_charge: 0,
            aromatic: false,
            explicit_h: None,
        }
    }
}

/// Bond between atom indices `a < b`.
#[derive(Debug, Clone)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
}

#[derive(Debug, Clone, Default)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    /// adjacency[i] lists the atom indices bonded to atom i.
    pub adjacency: Vec<Vec<usize>>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_atom(&mut self, atom: Atom) -> usize {
        let idx = self.atoms.len();
        self.atoms.push(atom);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Add a bond between `a` and `b`, stored with the lower index first.
    pub fn add_bond(&mut self, a: usize, b: usize, order: BondOrder) {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        self.bonds.push(Bond { a: lo, b: hi, order });
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
    }

    pub fn bond_between(&self, a: usize, b: usize) -> Option<&Bond> {
        self.bonds
            .iter()
            .find(|bond| (bond.a == a && bond.b == b) || (bond.a == b && bond.b == a))
    }

    pub fn degree(&self, i: usize) -> usize {
        self.adjacency[i].len()
    }

    /// Sum of bond orders at atom `i` (aromatic bonds count 1.5).
    pub fn bond_order_sum(&self, i: usize) -> f64 {
        self.bonds
            .iter()
            .filter(|b| b.a == i || b.b == i)
            .map(|b| b.order.order())
            .sum()
    }

    pub fn heavy_atom_count(&self) -> usize {
        self.atoms
            .iter()
            .filter(|a| a.element != Element::H)
            .count()
    }

    /// Whether atom `i` participates in at least one aromatic bond.
    pub fn atom_in_aromatic_bond(&self, i: usize) -> bool {
        self.bonds
            .iter()
            .any(|b| (b.a == i || b.b == i) && b.order == BondOrder::Aromatic)
    }
}
