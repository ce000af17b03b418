//! A player's OFC board: three rows of 3/5/5 slots.

use super::card::{Card, CardSet, RANK_Q};
use super::hand_eval::{HandClass, HandEvaluator};
use std::fmt;

/// One of the three board rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Row {
    Top,
    Middle,
    Bottom,
}

impl Row {
    /// All rows in placement order, bottom first.
    pub const PLACEMENT_ORDER: [Row; 3] = [Row::Bottom, Row::Middle, Row::Top];

    /// Number of slots in the row.
    #[inline]
    pub fn capacity(&self) -> usize {
        match self {
            Row::Top => 3,
            Row::Middle | Row::Bottom => 5,
        }
    }

    /// Short tag used in action display.
    pub fn tag(&self) -> &'static str {
        match self {
            Row::Top => "t",
            Row::Middle => "m",
            Row::Bottom => "b",
        }
    }
}

/// A 13-slot board. Empty slots hold [`Card::INVALID`].
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    top: [Card; 3],
    middle: [Card; 5],
    bottom: [Card; 5],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            top: [Card::INVALID; 3],
            middle: [Card::INVALID; 5],
            bottom: [Card::INVALID; 5],
        }
    }

    /// Slots of a row, including empties.
    #[inline]
    pub fn row(&self, row: Row) -> &[Card] {
        match row {
            Row::Top => &self.top,
            Row::Middle => &self.middle,
            Row::Bottom => &self.bottom,
        }
    }

    /// The cards placed in a row, in slot order.
    pub fn row_cards(&self, row: Row) -> CardSet {
        self.row(row).iter().copied().filter(Card::is_valid).collect()
    }

    /// All cards on the board, bottom row last.
    pub fn all_cards(&self) -> CardSet {
        let mut all = CardSet::with_capacity(13);
        all.extend(self.top.iter().copied().filter(Card::is_valid));
        all.extend(self.middle.iter().copied().filter(Card::is_valid));
        all.extend(self.bottom.iter().copied().filter(Card::is_valid));
        all
    }

    /// Number of placed cards.
    pub fn card_count(&self) -> usize {
        self.top.iter().filter(|c| c.is_valid()).count()
            + self.middle.iter().filter(|c| c.is_valid()).count()
            + self.bottom.iter().filter(|c| c.is_valid()).count()
    }

    /// Whether all 13 slots are filled.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.card_count() == 13
    }

    /// Canonical index of the first empty slot in a row.
    pub fn first_empty(&self, row: Row) -> Option<usize> {
        self.row(row).iter().position(|c| !c.is_valid())
    }

    /// Number of empty slots in a row.
    pub fn vacancies(&self, row: Row) -> usize {
        self.row(row).iter().filter(|c| !c.is_valid()).count()
    }

    /// Write a card into a slot. Panics on an occupied slot or an invalid
    /// card: both are programmer errors in the action generator.
    pub fn place(&mut self, row: Row, slot: usize, card: Card) {
        assert!(card.is_valid(), "cannot place the invalid card");
        let slots: &mut [Card] = match row {
            Row::Top => &mut self.top,
            Row::Middle => &mut self.middle,
            Row::Bottom => &mut self.bottom,
        };
        assert!(
            !slots[slot].is_valid(),
            "slot {}[{}] already holds {}",
            row.tag(),
            slot,
            slots[slot]
        );
        slots[slot] = card;
    }

    /// Whether a complete board fouls: bottom must not be weaker than
    /// middle, middle not weaker than top. Incomplete boards are not yet
    /// judged and report false.
    pub fn is_foul(&self, evaluator: &HandEvaluator) -> bool {
        if !self.is_complete() {
            return false;
        }
        let top = evaluator.evaluate(&self.row_cards(Row::Top));
        let middle = evaluator.evaluate(&self.row_cards(Row::Middle));
        let bottom = evaluator.evaluate(&self.row_cards(Row::Bottom));
        middle < bottom || top < middle
    }

    /// Sum of row royalties, or 0 on a fouled board.
    pub fn total_royalty(&self, evaluator: &HandEvaluator) -> u32 {
        if self.is_foul(evaluator) {
            return 0;
        }
        evaluator.royalty(&self.row_cards(Row::Top), Row::Top)
            + evaluator.royalty(&self.row_cards(Row::Middle), Row::Middle)
            + evaluator.royalty(&self.row_cards(Row::Bottom), Row::Bottom)
    }

    /// Fantasyland entry: a non-foul complete board whose top row is a pair
    /// of queens or better, or any trips.
    pub fn qualifies_for_fantasyland(&self, evaluator: &HandEvaluator) -> bool {
        if !self.is_complete() || self.is_foul(evaluator) {
            return false;
        }
        let top = self.row_cards(Row::Top);
        if top.len() != 3 {
            return false;
        }
        let rank = evaluator.evaluate(&top);
        match rank.class() {
            HandClass::ThreeOfAKind => true,
            HandClass::Pair => rank.ranks()[0] - 1 >= RANK_Q,
            _ => false,
        }
    }

    /// Cards dealt on a Fantasyland entry: QQ
    /// gets 14, KK 15, AA 16, trips 17. Zero without qualification.
    pub fn fantasyland_card_count(&self, evaluator: &HandEvaluator) -> u32 {
        if !self.qualifies_for_fantasyland(evaluator) {
            return 0;
        }
        let top = evaluator.evaluate(&self.row_cards(Row::Top));
        match top.class() {
            HandClass::ThreeOfAKind => 17,
            HandClass::Pair => 14 + (top.ranks()[0] - 1 - RANK_Q) as u32,
            _ => 0,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_row = |slots: &[Card]| -> String {
            slots.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
        };
        writeln!(f, "T: {}", fmt_row(&self.top))?;
        writeln!(f, "M: {}", fmt_row(&self.middle))?;
        write!(f, "B: {}", fmt_row(&self.bottom))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({} cards)", self.card_count())
    }
}
