//! Poker hand evaluation for OFC rows.
//!
//! Ranks 5-card hands (middle/bottom rows) and 3-card hands (top row), and
//! computes the OFC royalty bonus for a row. The two hand sizes live in
//! different `rank_value` spaces; ordering between them is defined by hand
//! class first, then the group-sorted rank vector, which is a poker-correct
//! total order for the foul check (a 3-card hand never outranks a made
//! 5-card hand of a stronger class, and loses same-class ties to kickers it
//! does not have).

use super::board::Row;
use super::card::{Card, RANK_6};
use std::cmp::Ordering;
use std::fmt;

/// Hand classes, ordered strongest first: a smaller discriminant is a
/// stronger class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandClass {
    StraightFlush = 1,
    FourOfAKind = 2,
    FullHouse = 3,
    Flush = 4,
    Straight = 5,
    ThreeOfAKind = 6,
    TwoPair = 7,
    Pair = 8,
    HighCard = 9,
}

impl HandClass {
    /// Get the class name.
    pub fn name(&self) -> &'static str {
        match self {
            HandClass::StraightFlush => "Straight Flush",
            HandClass::FourOfAKind => "Four of a Kind",
            HandClass::FullHouse => "Full House",
            HandClass::Flush => "Flush",
            HandClass::Straight => "Straight",
            HandClass::ThreeOfAKind => "Three of a Kind",
            HandClass::TwoPair => "Two Pair",
            HandClass::Pair => "Pair",
            HandClass::HighCard => "High Card",
        }
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The rank of an evaluated hand.
///
/// `value` is the per-size rank integer, smaller = stronger. For 5-card
/// hands the class sits in the top nibble (`value >> 20`); for 3-card hands
/// it is the ordinal 1..=455 over rank multisets (AAA = 1). `ranks` holds
/// the group-sorted descending rank digits (1 = deuce .. 13 = ace, 0 =
/// absent) that drive the cross-size ordering.
///
/// `Ord` follows the evaluator convention: `a < b` means `a` is the
/// *stronger* hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandRank {
    value: u32,
    class: HandClass,
    ranks: [u8; 5],
}

impl HandRank {
    /// The distinguished rank returned for hands of unsupported size. It
    /// compares weaker than every real hand.
    pub const fn invalid() -> Self {
        Self {
            value: u32::MAX,
            class: HandClass::HighCard,
            ranks: [0; 5],
        }
    }

    /// Whether this is the invalid-size sentinel.
    #[inline]
    pub fn is_invalid(&self) -> bool {
        self.value == u32::MAX
    }

    /// The raw per-size rank integer (smaller = stronger).
    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The hand class.
    #[inline]
    pub fn class(&self) -> HandClass {
        self.class
    }

    /// Group-sorted descending rank digits (1 = deuce .. 13 = ace).
    #[inline]
    pub fn ranks(&self) -> &[u8; 5] {
        &self.ranks
    }

    /// Whether this is a straight flush topped by an ace.
    #[inline]
    pub fn is_royal_flush(&self) -> bool {
        self.class == HandClass::StraightFlush && self.ranks[0] == 13
    }

    /// Pack a 5-card rank value: class in the top nibble, then one nibble
    /// per rank digit, inverted so that smaller = stronger. Absent digits
    /// invert past the deuce and lose ties to any real kicker.
    fn five_card(class: HandClass, ranks: [u8; 5]) -> Self {
        let mut value = (class as u32) << 20;
        for (i, &d) in ranks.iter().enumerate() {
            value |= (13 - d as u32) << (16 - 4 * i);
        }
        Self { value, class, ranks }
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.class as u8)
            .cmp(&(other.class as u8))
            .then_with(|| other.ranks.cmp(&self.ranks))
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            return write!(f, "Invalid");
        }
        write!(f, "{}", self.class)
    }
}

/// Index into the 3-card lookup for sorted ranks `r1 >= r2 >= r3`.
#[inline]
fn three_card_key(r1: u8, r2: u8, r3: u8) -> usize {
    r1 as usize * 169 + r2 as usize * 13 + r3 as usize
}

/// Evaluator for 3- and 5-card OFC rows.
///
/// The 3-card table is precomputed over all 455 rank multisets at
/// construction; suits are irrelevant on the top row. Shared read-only by
/// the solver.
pub struct HandEvaluator {
    three_card: Vec<HandRank>,
}

impl HandEvaluator {
    /// Build the evaluator, including the 3-card lookup.
    pub fn new() -> Self {
        Self {
            three_card: Self::build_three_card_table(),
        }
    }

    /// Evaluate a 3- or 5-card hand. Any other size yields
    /// [`HandRank::invalid`].
    pub fn evaluate(&self, cards: &[Card]) -> HandRank {
        match cards.len() {
            5 => Self::evaluate_five(cards),
            3 => {
                let mut ranks = [cards[0].rank(), cards[1].rank(), cards[2].rank()];
                ranks.sort_unstable_by(|a, b| b.cmp(a));
                self.three_card[three_card_key(ranks[0], ranks[1], ranks[2])]
            }
            _ => HandRank::invalid(),
        }
    }

    /// Royalty bonus for a row. Empty or wrong-sized rows score 0.
    pub fn royalty(&self, cards: &[Card], row: Row) -> u32 {
        let hr = self.evaluate(cards);
        match row {
            Row::Top => {
                if cards.len() != 3 {
                    return 0;
                }
                match hr.class() {
                    // 222 -> 10 .. AAA -> 22
                    HandClass::ThreeOfAKind => 10 + (hr.ranks[0] as u32 - 1),
                    // 66 -> 1 .. AA -> 9; pairs below 66 score 0
                    HandClass::Pair => {
                        let pair_rank = hr.ranks[0] - 1;
                        if pair_rank >= RANK_6 {
                            (pair_rank - RANK_6) as u32 + 1
                        } else {
                            0
                        }
                    }
                    _ => 0,
                }
            }
            Row::Middle => {
                if cards.len() != 5 {
                    return 0;
                }
                match hr.class() {
                    HandClass::ThreeOfAKind => 2,
                    HandClass::Straight => 4,
                    HandClass::Flush => 8,
                    HandClass::FullHouse => 12,
                    HandClass::FourOfAKind => 20,
                    HandClass::StraightFlush if hr.is_royal_flush() => 50,
                    HandClass::StraightFlush => 30,
                    _ => 0,
                }
            }
            Row::Bottom => {
                if cards.len() != 5 {
                    return 0;
                }
                match hr.class() {
                    HandClass::Straight => 2,
                    HandClass::Flush => 4,
                    HandClass::FullHouse => 6,
                    HandClass::FourOfAKind => 10,
                    HandClass::StraightFlush if hr.is_royal_flush() => 25,
                    HandClass::StraightFlush => 15,
                    _ => 0,
                }
            }
        }
    }

    /// Evaluate a 5-card hand by rank counts and a straight mask.
    fn evaluate_five(cards: &[Card]) -> HandRank {
        let mut rank_counts = [0u8; 13];
        let mut suit_counts = [0u8; 4];
        let mut rank_bits = 0u16;

        for card in cards {
            rank_counts[card.rank() as usize] += 1;
            suit_counts[card.suit() as usize] += 1;
            rank_bits |= 1 << card.rank();
        }

        let is_flush = suit_counts.iter().any(|&c| c == 5);

        // Five distinct consecutive ranks; only the high card matters and
        // the wheel reports the five as its top.
        if let Some(high) = find_straight(rank_bits) {
            let class = if is_flush {
                HandClass::StraightFlush
            } else {
                HandClass::Straight
            };
            return HandRank::five_card(class, [high + 1, 0, 0, 0, 0]);
        }

        let mut quads = None;
        let mut trips = None;
        let mut pairs: Vec<u8> = Vec::new();
        let mut singles: Vec<u8> = Vec::new();
        for rank in (0..13u8).rev() {
            match rank_counts[rank as usize] {
                4 => quads = Some(rank),
                3 => trips = Some(rank),
                2 => pairs.push(rank),
                1 => singles.push(rank),
                _ => {}
            }
        }

        if let Some(q) = quads {
            let k = trips.or(pairs.first().copied()).or(singles.first().copied());
            let kd = k.map_or(0, |r| r + 1);
            return HandRank::five_card(HandClass::FourOfAKind, [q + 1, q + 1, q + 1, q + 1, kd]);
        }
        if let (Some(t), Some(&p)) = (trips, pairs.first()) {
            return HandRank::five_card(HandClass::FullHouse, [t + 1, t + 1, t + 1, p + 1, p + 1]);
        }
        if is_flush {
            let mut ranks = [0u8; 5];
            for (i, &r) in singles.iter().enumerate() {
                ranks[i] = r + 1;
            }
            return HandRank::five_card(HandClass::Flush, ranks);
        }
        if let Some(t) = trips {
            let k1 = singles.first().map_or(0, |&r| r + 1);
            let k2 = singles.get(1).map_or(0, |&r| r + 1);
            return HandRank::five_card(HandClass::ThreeOfAKind, [t + 1, t + 1, t + 1, k1, k2]);
        }
        if pairs.len() >= 2 {
            let (p1, p2) = (pairs[0], pairs[1]);
            let k = singles.first().map_or(0, |&r| r + 1);
            return HandRank::five_card(HandClass::TwoPair, [p1 + 1, p1 + 1, p2 + 1, p2 + 1, k]);
        }
        if let Some(&p) = pairs.first() {
            let mut ranks = [p + 1, p + 1, 0, 0, 0];
            for (i, &r) in singles.iter().take(3).enumerate() {
                ranks[2 + i] = r + 1;
            }
            return HandRank::five_card(HandClass::Pair, ranks);
        }

        let mut ranks = [0u8; 5];
        for (i, &r) in singles.iter().enumerate() {
            ranks[i] = r + 1;
        }
        HandRank::five_card(HandClass::HighCard, ranks)
    }

    /// Precompute ranks for all 455 three-card rank multisets.
    ///
    /// Ordinals, strongest first: trips 1..=13 (AAA best), pairs 14..=169
    /// (pair rank then kicker), high cards 170..=455 (strict-descending
    /// triples).
    fn build_three_card_table() -> Vec<HandRank> {
        let mut table = vec![HandRank::invalid(); 13 * 169];
        let mut ordinal = 1u32;

        for r in (0..13u8).rev() {
            table[three_card_key(r, r, r)] = HandRank {
                value: ordinal,
                class: HandClass::ThreeOfAKind,
                ranks: [r + 1, r + 1, r + 1, 0, 0],
            };
            ordinal += 1;
        }
        for p in (0..13u8).rev() {
            for k in (0..13u8).rev() {
                if p == k {
                    continue;
                }
                let mut sorted = [p, p, k];
                sorted.sort_unstable_by(|a, b| b.cmp(a));
                table[three_card_key(sorted[0], sorted[1], sorted[2])] = HandRank {
                    value: ordinal,
                    class: HandClass::Pair,
                    ranks: [p + 1, p + 1, k + 1, 0, 0],
                };
                ordinal += 1;
            }
        }
        for r1 in (2..13u8).rev() {
            for r2 in (1..r1).rev() {
                for r3 in (0..r2).rev() {
                    table[three_card_key(r1, r2, r3)] = HandRank {
                        value: ordinal,
                        class: HandClass::HighCard,
                        ranks: [r1 + 1, r2 + 1, r3 + 1, 0, 0],
                    };
                    ordinal += 1;
                }
            }
        }
        debug_assert_eq!(ordinal, 456);
        table
    }
}

impl Default for HandEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the highest straight top card in a 5-card rank mask, wheel included.
fn find_straight(rank_bits: u16) -> Option<u8> {
    for high in (4..13u8).rev() {
        let mask = 0b11111 << (high - 4);
        if rank_bits & mask == mask {
            return Some(high);
        }
    }
    // A-2-3-4-5: the five plays high.
    const WHEEL: u16 = (1 << 12) | 0b1111;
    if rank_bits & WHEEL == WHEEL {
        return Some(3);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(spec: &str) -> Vec<Card> {
        spec.split_whitespace()
            .map(|s| Card::from_str(s).unwrap())
            .collect()
    }

    fn eval(spec: &str) -> HandRank {
        HandEvaluator::new().evaluate(&cards(spec))
    }

    #[test]
    fn test_three_card_boundary_ordinals() {
        let ev = HandEvaluator::new();
        // AAA is the strongest three-card hand.
        let aaa = ev.evaluate(&[Card::from_id(48), Card::from_id(49), Card::from_id(50)]);
        assert_eq!(aaa.class(), HandClass::ThreeOfAKind);
        assert_eq!(aaa.value(), 1);

        assert_eq!(eval("2s 2h 2d").value(), 13);
        assert_eq!(eval("As Ah Kd").value(), 14); // best pair
        assert_eq!(eval("2s 2h 3d").value(), 169); // worst pair
        assert_eq!(eval("As Kh Qd").value(), 170); // best high card
        assert_eq!(eval("4s 3h 2d").value(), 455); // worst high card
    }

    #[test]
    fn test_three_card_ignores_suits() {
        // 2s 3s 4s: no 3-card straights or flushes on the top row.
        let hr = HandEvaluator::new().evaluate(&[
            Card::from_id(0),
            Card::from_id(4),
            Card::from_id(8),
        ]);
        assert_eq!(hr.class(), HandClass::HighCard);
        assert_eq!(hr, eval("2s 3h 4d"));
    }

    #[test]
    fn test_three_card_pair_ordering() {
        assert!(eval("Ks Kh Qd") < eval("Ks Kh Jd"));
        assert!(eval("As Ah 2d") < eval("Ks Kh Ad"));
        assert!(eval("2s 2h 2d") < eval("As Ah Kd")); // any trips beat any pair
    }

    #[test]
    fn test_five_card_classes() {
        assert_eq!(eval("As Ks Qs Js Ts").class(), HandClass::StraightFlush);
        assert!(eval("As Ks Qs Js Ts").is_royal_flush());
        assert_eq!(eval("9s 8s 7s 6s 5s").class(), HandClass::StraightFlush);
        assert!(!eval("9s 8s 7s 6s 5s").is_royal_flush());
        assert_eq!(eval("Ah Kd Qs Jc Th").class(), HandClass::Straight);
        assert_eq!(eval("As Ks 9s 5s 2s").class(), HandClass::Flush);
        assert_eq!(eval("7s 7h 7d 2s 2h").class(), HandClass::FullHouse);
        assert_eq!(eval("7s 7h 7d Ks 2h").class(), HandClass::ThreeOfAKind);
        assert_eq!(eval("7s 7h 2d Ks 2h").class(), HandClass::TwoPair);
        assert_eq!(eval("7s 7h 3d Ks 2h").class(), HandClass::Pair);
        assert_eq!(eval("9s 7h 5d 3s 2h").class(), HandClass::HighCard);
    }

    #[test]
    fn test_four_deuces_with_an_ace() {
        // Card ids 0..4 are the deuces, 48 is the ace of spades.
        let hr = HandEvaluator::new().evaluate(&[
            Card::from_id(0),
            Card::from_id(1),
            Card::from_id(2),
            Card::from_id(3),
            Card::from_id(48),
        ]);
        assert_eq!(hr.class(), HandClass::FourOfAKind);
    }

    #[test]
    fn test_wheel_is_the_weakest_straight() {
        let wheel = eval("As 2h 3d 4c 5s");
        assert_eq!(wheel.class(), HandClass::Straight);
        assert!(eval("6s 5h 4d 3c 2s") < wheel);
    }

    #[test]
    fn test_five_card_value_contract() {
        // Smaller value = stronger, class in the top nibble.
        let royal = eval("As Ks Qs Js Ts");
        let quads = eval("7s 7h 7d 7c 2h");
        let high = eval("9s 7h 5d 3s 2h");
        assert!(royal.value() < quads.value());
        assert!(quads.value() < high.value());
        assert_eq!(royal.value() >> 20, HandClass::StraightFlush as u32);
        assert_eq!(high.value() >> 20, HandClass::HighCard as u32);
    }

    #[test]
    fn test_cross_size_ordering() {
        let ev = HandEvaluator::new();
        // Any made 5-card straight beats 3-card trips.
        assert!(eval("Ah Kd Qs Jc Th") < eval("As Ah Ad"));
        // Same pair rank: the 5-card hand's kickers win the tie.
        let top = ev.evaluate(&cards("8s 8h Ad"));
        let middle = ev.evaluate(&cards("8d 8c As Kh Qd"));
        assert!(middle < top);
        // A higher 3-card pair still beats a lower 5-card pair.
        assert!(ev.evaluate(&cards("Ks Kh 2d")) < ev.evaluate(&cards("Qs Qh Ad Kc Jh")));
    }

    #[test]
    fn test_invalid_sizes() {
        let ev = HandEvaluator::new();
        assert!(ev.evaluate(&cards("As Kh")).is_invalid());
        assert!(ev.evaluate(&cards("As Kh Qd Jc")).is_invalid());
        // The sentinel loses to the weakest real hands of both sizes.
        assert!(eval("4s 3h 2d") < HandRank::invalid());
        assert!(eval("7s 5h 4d 3s 2h") < HandRank::invalid());
    }

    #[test]
    fn test_royalty_bottom() {
        let ev = HandEvaluator::new();
        assert_eq!(ev.royalty(&cards("Ts 9s 8s 7s 6s"), Row::Bottom), 15);
        assert_eq!(ev.royalty(&cards("As Ks Qs Js Ts"), Row::Bottom), 25);
        assert_eq!(ev.royalty(&cards("Ah Kd Qs Jc Th"), Row::Bottom), 2);
        assert_eq!(ev.royalty(&cards("As Ks 9s 5s 2s"), Row::Bottom), 4);
        assert_eq!(ev.royalty(&cards("7s 7h 7d 2s 2h"), Row::Bottom), 6);
        assert_eq!(ev.royalty(&cards("7s 7h 7d 7c 2h"), Row::Bottom), 10);
        assert_eq!(ev.royalty(&cards("7s 7h 7d Ks 2h"), Row::Bottom), 0);
    }

    #[test]
    fn test_royalty_middle() {
        let ev = HandEvaluator::new();
        assert_eq!(ev.royalty(&cards("7s 7h 7d Ks 2h"), Row::Middle), 2);
        assert_eq!(ev.royalty(&cards("Ah Kd Qs Jc Th"), Row::Middle), 4);
        assert_eq!(ev.royalty(&cards("As Ks 9s 5s 2s"), Row::Middle), 8);
        assert_eq!(ev.royalty(&cards("7s 7h 7d 2s 2h"), Row::Middle), 12);
        assert_eq!(ev.royalty(&cards("7s 7h 7d 7c 2h"), Row::Middle), 20);
        assert_eq!(ev.royalty(&cards("Ts 9s 8s 7s 6s"), Row::Middle), 30);
        assert_eq!(ev.royalty(&cards("As Ks Qs Js Ts"), Row::Middle), 50);
        assert_eq!(ev.royalty(&cards("7s 7h 2d Ks 2h"), Row::Middle), 0);
    }

    #[test]
    fn test_royalty_top() {
        let ev = HandEvaluator::new();
        assert_eq!(ev.royalty(&cards("Qs Qh Jd"), Row::Top), 7);
        assert_eq!(ev.royalty(&cards("7s 7h 7d"), Row::Top), 15);
        assert_eq!(ev.royalty(&cards("6s 6h 2d"), Row::Top), 1);
        assert_eq!(ev.royalty(&cards("As Ah Kd"), Row::Top), 9);
        assert_eq!(ev.royalty(&cards("2s 2h 2d"), Row::Top), 10);
        assert_eq!(ev.royalty(&cards("As Ah Ad"), Row::Top), 22);
        // Pairs below 66 and plain high cards score nothing.
        assert_eq!(ev.royalty(&cards("5s 5h Ad"), Row::Top), 0);
        assert_eq!(ev.royalty(&cards("As Kh Qd"), Row::Top), 0);
    }

    #[test]
    fn test_royalty_wrong_size_is_zero() {
        let ev = HandEvaluator::new();
        assert_eq!(ev.royalty(&[], Row::Bottom), 0);
        assert_eq!(ev.royalty(&cards("As Kh Qd"), Row::Middle), 0);
        assert_eq!(ev.royalty(&cards("As Ah Kd Qc Jh"), Row::Top), 0);
    }
}
