//! Placement actions.
//!
//! An action places the dealt cards into board slots and, on streets 2-5,
//! discards one card. Slot indices are always the canonical first-empty
//! index of their row, so symmetric slot choices collapse to one action.

use super::board::Row;
use super::card::Card;
use std::fmt;

/// A single card placed into a row slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub card: Card,
    pub row: Row,
    pub slot: usize,
}

/// A placement action: where each dealt card goes, plus the discard on
/// streets 2-5.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    pub placements: Vec<Placement>,
    pub discard: Option<Card>,
}

impl Action {
    /// The escape-hatch action: nothing placed, nothing discarded. Applying
    /// it still rotates the actor and advances the street.
    pub fn null() -> Self {
        Self {
            placements: Vec::new(),
            discard: None,
        }
    }

    /// Whether this is the escape-hatch action.
    pub fn is_null(&self) -> bool {
        self.placements.is_empty() && self.discard.is_none()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "(null)");
        }
        for (i, p) in self.placements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{}{}", p.card, p.row.tag(), p.slot)?;
        }
        if let Some(d) = self.discard {
            write!(f, " x:{}", d)?;
        }
        Ok(())
    }
}

/// Enumerate row-count patterns `[bottom, middle, top]` that distribute `n`
/// cards within the given vacancies. Deterministic order: bottom count
/// descending, then middle count descending.
pub(crate) fn row_count_patterns(n: usize, vacancies: [usize; 3]) -> Vec<[usize; 3]> {
    let [vb, vm, vt] = vacancies;
    let mut patterns = Vec::new();
    for nb in (0..=n.min(vb)).rev() {
        for nm in (0..=(n - nb).min(vm)).rev() {
            let nt = n - nb - nm;
            if nt <= vt {
                patterns.push([nb, nm, nt]);
            }
        }
    }
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_action() {
        let action = Action::null();
        assert!(action.is_null());
        assert_eq!(action.to_string(), "(null)");
    }

    #[test]
    fn test_action_display() {
        let action = Action {
            placements: vec![
                Placement {
                    card: Card::from_str("As").unwrap(),
                    row: Row::Bottom,
                    slot: 0,
                },
                Placement {
                    card: Card::from_str("Kd").unwrap(),
                    row: Row::Middle,
                    slot: 2,
                },
            ],
            discard: Some(Card::from_str("2c").unwrap()),
        };
        assert_eq!(action.to_string(), "As:b0 Kd:m2 x:2c");
    }

    #[test]
    fn test_street_one_pattern_family() {
        // Empty board: compositions of 5 over (5, 5, 3) vacancies.
        let patterns = row_count_patterns(5, [5, 5, 3]);
        assert_eq!(patterns.len(), 18);
        assert_eq!(patterns[0], [5, 0, 0]);
        assert!(patterns.contains(&[2, 2, 1]));
        assert!(patterns.contains(&[0, 2, 3]));
        // Never more than three cards up top.
        assert!(patterns.iter().all(|p| p[2] <= 3));
        assert!(patterns.iter().all(|p| p.iter().sum::<usize>() == 5));
    }

    #[test]
    fn test_patterns_respect_vacancies() {
        let patterns = row_count_patterns(2, [1, 0, 2]);
        assert_eq!(patterns, vec![[1, 0, 1], [0, 0, 2]]);
        assert!(row_count_patterns(2, [0, 0, 1]).is_empty());
    }

    #[test]
    fn test_two_card_patterns() {
        // Streets 2-5 distribute two cards.
        let patterns = row_count_patterns(2, [5, 5, 3]);
        assert_eq!(
            patterns,
            vec![[2, 0, 0], [1, 1, 0], [1, 0, 1], [0, 2, 0], [0, 1, 1], [0, 0, 2]]
        );
    }
}
