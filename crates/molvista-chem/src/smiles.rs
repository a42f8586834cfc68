//! SMILES reader: line notation in, molecular graph out.
//!
//! Supported: the organic subset (bare atoms), aromatic lowercase atoms,
//! branches, explicit single/double/triple/aromatic bonds, ring closures
//! (single digit and `%NN`), dot-separated components, and bracket atoms with
//! isotope, charge, and explicit hydrogen count. Chirality markers and atom
//! maps are consumed and discarded; connectivity is all the 3D pipeline needs.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use crate::element::Element;
use crate::error::{Result, StructureError};
use crate::molecule::{Atom, BondOrder, Molecule};

/// Parse a SMILES string into a molecular graph. Positions are left at the
/// origin; run the embedding pass afterwards.
pub fn parse(data: &str) -> Result<Molecule> {
    let data = data.trim();
    let mut mol = Molecule::new();

    let mut current: Option<usize> = None;
    // Whether the current atom was written lowercase. Two consecutive
    // aromatic atoms share an implicit aromatic bond; any other pair gets an
    // implicit single bond.
    let mut current_aromatic = false;
    let mut pending_bond: Option<BondOrder> = None;
    // Saves (current atom, aromaticity) at each '('.
    let mut branch_stack: Vec<(Option<usize>, bool)> = Vec::new();
    // ring index -> (atom, explicit bond at open, aromatic at open)
    let mut ring_map: HashMap<u32, (usize, Option<BondOrder>, bool)> = HashMap::new();

    let mut chars = data.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            '-' => {
                pending_bond = Some(BondOrder::Single);
                chars.next();
            }
            '=' => {
                pending_bond = Some(BondOrder::Double);
                chars.next();
            }
            '#' => {
                pending_bond = Some(BondOrder::Triple);
                chars.next();
            }
            ':' => {
                pending_bond = Some(BondOrder::Aromatic);
                chars.next();
            }
            // Stereo bonds: single for connectivity purposes.
            '/' | '\\' => {
                pending_bond = Some(BondOrder::Single);
                chars.next();
            }

            '(' => {
                branch_stack.push((current, current_aromatic));
                chars.next();
            }
            ')' => {
                let (prev, prev_aromatic) = branch_stack
                    .pop()
                    .ok_or_else(|| StructureError::Parse("unmatched ')'".into()))?;
                current = prev;
                current_aromatic = prev_aromatic;
                pending_bond = None;
                chars.next();
            }

            '.' => {
                current = None;
                current_aromatic = false;
                pending_bond = None;
                chars.next();
            }

            '%' => {
                chars.next();
                let d1 = consume_digit(&mut chars)?;
                let d2 = consume_digit(&mut chars)?;
                close_or_open_ring(
                    d1 * 10 + d2,
                    current,
                    current_aromatic,
                    pending_bond.take(),
                    &mut ring_map,
                    &mut mol,
                )?;
            }
            '0'..='9' => {
                chars.next();
                close_or_open_ring(
                    ch as u32 - '0' as u32,
                    current,
                    current_aromatic,
                    pending_bond.take(),
                    &mut ring_map,
                    &mut mol,
                )?;
            }

            '[' => {
                let atom = parse_bracket_atom(&mut chars)?;
                let aromatic = atom.aromatic;
                let idx = attach_atom(&mut mol, atom, current, current_aromatic, pending_bond.take());
                current = Some(idx);
                current_aromatic = aromatic;
            }

            _ => match parse_organic_atom(&mut chars) {
                Some((element, aromatic)) => {
                    let mut atom = Atom::new(element);
                    atom.aromatic = aromatic;
                    let idx =
                        attach_atom(&mut mol, atom, current, current_aromatic, pending_bond.take());
                    current = Some(idx);
                    current_aromatic = aromatic;
                }
                None => {
                    return Err(StructureError::Parse(format!(
                        "unrecognized character '{ch}'"
                    )));
                }
            },
        }
    }

    if !branch_stack.is_empty() {
        return Err(StructureError::Parse("unmatched '('".into()));
    }
    if let Some(idx) = ring_map.keys().next() {
        return Err(StructureError::Parse(format!(
            "unclosed ring closure {idx}"
        )));
    }
    if pending_bond.is_some() {
        return Err(StructureError::Parse("dangling bond symbol".into()));
    }

    Ok(mol)
}

/// Add `atom` to the graph and bond it to `prev` if there is one.
fn attach_atom(
    mol: &mut Molecule,
    atom: Atom,
    prev: Option<usize>,
    prev_aromatic: bool,
    explicit_bond: Option<BondOrder>,
) -> usize {
    let aromatic = atom.aromatic;
    let idx = mol.add_atom(atom);
    if let Some(p) = prev {
        let order =
            explicit_bond.unwrap_or_else(|| implicit_order(prev_aromatic, aromatic));
        mol.add_bond(p, idx, order);
    }
    idx
}

/// Implicit bond between two adjacent written atoms: aromatic if both are
/// lowercase, single otherwise.
fn implicit_order(prev_aromatic: bool, new_aromatic: bool) -> BondOrder {
    if prev_aromatic && new_aromatic {
        BondOrder::Aromatic
    } else {
        BondOrder::Single
    }
}

/// Ring closure digit: first sighting opens the ring, second closes it with
/// a bond. An explicit bond symbol at either end wins; otherwise the bond is
/// aromatic when both ends are aromatic and single otherwise.
fn close_or_open_ring(
    ring_idx: u32,
    current: Option<usize>,
    current_aromatic: bool,
    explicit_bond: Option<BondOrder>,
    ring_map: &mut HashMap<u32, (usize, Option<BondOrder>, bool)>,
    mol: &mut Molecule,
) -> Result<()> {
    let cur = current
        .ok_or_else(|| StructureError::Parse("ring closure digit before any atom".into()))?;

    match ring_map.remove(&ring_idx) {
        Some((other, bond_at_open, open_aromatic)) => {
            if other == cur {
                return Err(StructureError::Parse(format!(
                    "ring closure {ring_idx} bonds an atom to itself"
                )));
            }
            let order = explicit_bond.or(bond_at_open).unwrap_or_else(|| {
                implicit_order(open_aromatic, current_aromatic)
            });
            mol.add_bond(cur, other, order);
        }
        None => {
            ring_map.insert(ring_idx, (cur, explicit_bond, current_aromatic));
        }
    }

    Ok(())
}

/// Parse a bracket atom `[isotope? symbol chirality? Hcount? charge? :map?]`.
/// Isotope, chirality, and atom map are discarded; charge and explicit H
/// count are kept (the registry needs them for `[cH-]` and `[Mg]`).
fn parse_bracket_atom(chars: &mut Peekable<Chars<'_>>) -> Result<Atom> {
    chars.next(); // '['

    while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
        chars.next(); // isotope
    }

    let first = chars
        .next()
        .ok_or_else(|| StructureError::Parse("unterminated bracket atom".into()))?;
    if !first.is_ascii_alphabetic() {
        return Err(StructureError::Parse(format!(
            "expected element symbol in bracket atom, found '{first}'"
        )));
    }
    let aromatic = first.is_ascii_lowercase();
    let mut symbol = String::from(first.to_ascii_uppercase());
    // Second letter of two-letter symbols is always lowercase (Cl, Br, Fe, Mg).
    // Lone 'H' here would be the hydrogen-count suffix, not part of the symbol.
    if chars.peek().is_some_and(|c| c.is_ascii_lowercase()) {
        symbol.push(chars.next().unwrap());
    }

    let element = Element::from_symbol(&symbol)
        .ok_or_else(|| StructureError::Parse(format!("unknown element '{symbol}'")))?;

    while chars.peek().copied() == Some('@') {
        chars.next(); // chirality
    }

    let mut explicit_h: u8 = 0;
    if chars.peek().copied() == Some('H') {
        chars.next();
        explicit_h = 1;
        if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
            explicit_h = chars.next().unwrap() as u8 - b'0';
        }
    }

    let mut formal_charge: i8 = 0;
    if let Some(&sign) = chars.peek() {
        if sign == '+' || sign == '-' {
            chars.next();
            let unit: i8 = if sign == '+' { 1 } else { -1 };
            formal_charge = unit;
            if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                formal_charge = unit * (chars.next().unwrap() as u8 - b'0') as i8;
            } else {
                // ++ / -- forms
                while chars.peek().copied() == Some(sign) {
                    chars.next();
                    formal_charge += unit;
                }
            }
        }
    }

    if chars.peek().copied() == Some(':') {
        chars.next();
        while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
            chars.next(); // atom map
        }
    }

    match chars.next() {
        Some(']') => {}
        other => {
            return Err(StructureError::Parse(format!(
                "expected ']' to close bracket atom, found {other:?}"
            )));
        }
    }

    let mut atom = Atom::new(element);
    atom.aromatic = aromatic;
    atom.formal_charge = formal_charge;
    atom.explicit_h = Some(explicit_h);
    Ok(atom)
}

/// Parse a bare organic-subset atom. Returns `None` on an unrecognized
/// character, leaving the iterator untouched.
fn parse_organic_atom(chars: &mut Peekable<Chars<'_>>) -> Option<(Element, bool)> {
    let ch = chars.peek().copied()?;

    let (element, aromatic) = match ch {
        'C' => {
            chars.next();
            if chars.peek().copied() == Some('l') {
                chars.next();
                (Element::Cl, false)
            } else {
                (Element::C, false)
            }
        }
        'B' => {
            chars.next();
            if chars.peek().copied() == Some('r') {
                chars.next();
                (Element::Br, false)
            } else {
                (Element::B, false)
            }
        }
        'N' => {
            chars.next();
            (Element::N, false)
        }
        'O' => {
            chars.next();
            (Element::O, false)
        }
        'P' => {
            chars.next();
            (Element::P, false)
        }
        'S' => {
            chars.next();
            (Element::S, false)
        }
        'F' => {
            chars.next();
            (Element::F, false)
        }
        'I' => {
            chars.next();
            (Element::I, false)
        }
        'H' => {
            chars.next();
            (Element::H, false)
        }
        'c' => {
            chars.next();
            (Element::C, true)
        }
        'n' => {
            chars.next();
            (Element::N, true)
        }
        'o' => {
            chars.next();
            (Element::O, true)
        }
        's' => {
            chars.next();
            (Element::S, true)
        }
        'p' => {
            chars.next();
            (Element::P, true)
        }
        _ => return None,
    };

    Some((element, aromatic))
}

fn consume_digit(chars: &mut Peekable<Chars<'_>>) -> Result<u32> {
    match chars.next() {
        Some(c) if c.is_ascii_digit() => Ok(c as u32 - '0' as u32),
        Some(c) => Err(StructureError::Parse(format!(
            "expected digit after '%', found '{c}'"
        ))),
        None => Err(StructureError::Parse(
            "expected digit after '%', found end of input".into(),
        )),
    }
}
