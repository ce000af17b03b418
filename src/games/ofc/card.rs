//! Card and deck primitives for OFC Pineapple.
//!
//! A card is a small integer in `0..52` with `rank = id / 4` (0 = deuce,
//! 12 = ace) and `suit = id % 4`. Empty board slots hold [`Card::INVALID`].

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
pub const RANK_3: u8 = 1;
pub const RANK_4: u8 = 2;
pub const RANK_5: u8 = 3;
pub const RANK_6: u8 = 4;
pub const RANK_7: u8 = 5;
pub const RANK_8: u8 = 6;
pub const RANK_9: u8 = 7;
pub const RANK_T: u8 = 8;
pub const RANK_J: u8 = 9;
pub const RANK_Q: u8 = 10;
pub const RANK_K: u8 = 11;
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_SPADES: u8 = 0;
pub const SUIT_HEARTS: u8 = 1;
pub const SUIT_DIAMONDS: u8 = 2;
pub const SUIT_CLUBS: u8 = 3;

/// Rank characters for display.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for display.
const SUIT_CHARS: [char; 4] = ['s', 'h', 'd', 'c'];

/// A single playing card.
///
/// Ordering follows the id, so sorting a hand sorts primarily by rank.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u8);

/// An ordered sequence of cards. Order is significant only where callers
/// sort it (a dealt hand, a row read off a board).
pub type CardSet = Vec<Card>;

impl Card {
    /// Sentinel marking an empty board slot.
    pub const INVALID: Card = Card(255);

    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self(rank * 4 + suit)
    }

    /// Create a card from its id (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self(id)
    }

    /// Parse a card from a string like "As", "Kh", "2c".
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let (r, u) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        let rank = RANK_CHARS.iter().position(|&c| c == r.to_ascii_uppercase())?;
        let suit = SUIT_CHARS.iter().position(|&c| c == u.to_ascii_lowercase())?;
        Some(Self::new(rank as u8, suit as u8))
    }

    /// Get the card's id (0-51, or 255 for the invalid sentinel).
    #[inline]
    pub fn id(&self) -> u8 {
        self.0
    }

    /// Get the card's rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.0 / 4
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.0 % 4
    }

    /// Whether this is a real card rather than the empty-slot sentinel.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 < 52
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "??");
        }
        write!(
            f,
            "{}{}",
            RANK_CHARS[self.rank() as usize],
            SUIT_CHARS[self.suit() as usize]
        )
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A shuffled deck. Cards are dealt from the top (the back of the vec).
#[derive(Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a full 52-card deck in a random order.
    pub fn shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut cards: Vec<Card> = (0..52).map(Card::from_id).collect();
        cards.shuffle(rng);
        Self { cards }
    }

    /// Deal `n` cards off the top, or `None` if fewer than `n` remain.
    pub fn deal(&mut self, n: usize) -> Option<CardSet> {
        if self.cards.len() < n {
            return None;
        }
        Some(self.cards.split_off(self.cards.len() - n))
    }

    /// Number of undealt cards.
    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck has been fully dealt.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The undealt cards, in deal order from the back.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.len())
    }
}
