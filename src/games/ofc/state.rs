//! Two-player OFC Pineapple game state.
//!
//! States are value types: `apply_action` returns a fresh copy and never
//! mutates its receiver. One shuffled deck per state is the only chance in
//! the game, so a state plus the action sequence is fully deterministic.

use super::action::{row_count_patterns, Action, Placement};
use super::board::{Board, Row};
use super::card::{Card, CardSet, Deck};
use super::hand_eval::HandEvaluator;
use rand::Rng;
use std::fmt;

/// Heads-up only.
pub const NUM_PLAYERS: usize = 2;

/// Flat bonus for winning all three rows, and the penalty paid by a fouling
/// player.
pub const SCOOP_BONUS: i32 = 3;

/// Points awarded for a Fantasyland entry, keyed by the entry's card count.
fn fantasyland_bonus(card_count: u32) -> i32 {
    match card_count {
        14 => 15, // QQ
        15 => 20, // KK
        16 => 25, // AA
        17 => 30, // trips
        _ => 0,
    }
}

/// A complete game state, including both players' private boards and the
/// undealt deck.
#[derive(Clone)]
pub struct GameState {
    street: u8,
    dealer_pos: usize,
    current_player: usize,
    boards: [Board; 2],
    discards: [CardSet; 2],
    deck: Deck,
    dealt: CardSet,
}

impl GameState {
    /// Start a hand with a random dealer seat and a fresh shuffle.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let dealer_pos = rng.gen_range(0..NUM_PLAYERS);
        Self::with_dealer(rng, dealer_pos)
    }

    /// Start a hand with a fixed dealer seat. The non-dealer acts first and
    /// receives the street-1 deal immediately.
    pub fn with_dealer<R: Rng>(rng: &mut R, dealer_pos: usize) -> Self {
        assert!(dealer_pos < NUM_PLAYERS, "dealer seat out of range");
        let mut state = Self {
            street: 1,
            dealer_pos,
            current_player: (dealer_pos + 1) % NUM_PLAYERS,
            boards: [Board::new(), Board::new()],
            discards: [CardSet::new(), CardSet::new()],
            deck: Deck::shuffled(rng),
            dealt: CardSet::new(),
        };
        state.deal_street();
        state
    }

    /// Current street, 1-5 (6 once the hand is over).
    #[inline]
    pub fn street(&self) -> u8 {
        self.street
    }

    /// Seat of the player to act.
    #[inline]
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// Seat of the dealer.
    #[inline]
    pub fn dealer_pos(&self) -> usize {
        self.dealer_pos
    }

    /// Cards dealt to the current actor this street.
    pub fn dealt_cards(&self) -> &[Card] {
        &self.dealt
    }

    /// A player's board.
    pub fn board(&self, seat: usize) -> &Board {
        &self.boards[seat]
    }

    /// The board of a player's opponent.
    pub fn opponent_board(&self, seat: usize) -> &Board {
        &self.boards[(seat + 1) % NUM_PLAYERS]
    }

    /// A player's discard pile.
    pub fn discards(&self, seat: usize) -> &[Card] {
        &self.discards[seat]
    }

    /// Undealt cards remaining.
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Whether the hand is over. Street 6 is the terminal sentinel; the
    /// board check is a backstop, since both boards reach 13 cards exactly
    /// when the dealer's street-5 action rolls the street over.
    pub fn is_terminal(&self) -> bool {
        self.street > 5 || self.boards.iter().all(Board::is_complete)
    }

    /// Enumerate the abstracted action set: every row-count pattern over the
    /// current vacancies (and, on streets 2-5, every discard choice), with
    /// the dealt cards sorted descending and assigned bottom-first into
    /// first-empty slots. Deterministic given the dealt cards and board;
    /// never empty for a non-terminal state thanks to the fallback.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }
        let mut sorted = self.dealt.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let mut actions = Vec::new();
        if self.street == 1 {
            self.placement_actions(&sorted, None, &mut actions);
        } else {
            for i in 0..sorted.len() {
                let keep: CardSet = sorted
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, &c)| c)
                    .collect();
                self.placement_actions(&keep, Some(sorted[i]), &mut actions);
            }
        }
        if actions.is_empty() {
            actions.push(self.fallback_action(&sorted));
        }
        actions
    }

    /// Apply an action, returning the successor state. Placements into
    /// occupied slots panic; that can only come from a buggy generator.
    pub fn apply_action(&self, action: &Action) -> GameState {
        let mut next = self.clone();
        for p in &action.placements {
            debug_assert!(
                self.dealt.contains(&p.card),
                "placed card {} was not dealt",
                p.card
            );
            next.boards[next.current_player].place(p.row, p.slot, p.card);
        }
        if let Some(discard) = action.discard {
            debug_assert!(
                self.dealt.contains(&discard),
                "discarded card {} was not dealt",
                discard
            );
            next.discards[next.current_player].push(discard);
        }
        next.dealt.clear();

        if next.current_player == next.dealer_pos {
            next.street += 1;
        }
        next.current_player = (next.current_player + 1) % NUM_PLAYERS;
        if !next.is_terminal() {
            next.deal_street();
        }
        next
    }

    /// Terminal payoffs for both seats; always zero-sum.
    pub fn payoffs(&self, evaluator: &HandEvaluator) -> [f64; 2] {
        let p1_foul = self.boards[0].is_foul(evaluator);
        let p2_foul = self.boards[1].is_foul(evaluator);
        let p1_royalty = self.boards[0].total_royalty(evaluator) as i32;
        let p2_royalty = self.boards[1].total_royalty(evaluator) as i32;

        if p1_foul && p2_foul {
            return [0.0, 0.0];
        }
        if p1_foul {
            let loss = (SCOOP_BONUS + p2_royalty) as f64;
            return [-loss, loss];
        }
        if p2_foul {
            let win = (SCOOP_BONUS + p1_royalty) as f64;
            return [win, -win];
        }

        let mut line_score: i32 = 0;
        for row in [Row::Top, Row::Middle, Row::Bottom] {
            let mine = evaluator.evaluate(&self.boards[0].row_cards(row));
            let theirs = evaluator.evaluate(&self.boards[1].row_cards(row));
            if mine < theirs {
                line_score += 1;
            } else {
                line_score -= 1;
            }
        }
        if line_score.abs() == 3 {
            line_score = if line_score > 0 { SCOOP_BONUS } else { -SCOOP_BONUS };
        }

        let mut p1_total = (line_score + p1_royalty - p2_royalty) as f64;
        p1_total += fantasyland_bonus(self.boards[0].fantasyland_card_count(evaluator)) as f64;
        p1_total -= fantasyland_bonus(self.boards[1].fantasyland_card_count(evaluator)) as f64;
        [p1_total, -p1_total]
    }

    /// Deal the next street to the player to act. A short deck ends the
    /// hand instead of dealing a partial street.
    fn deal_street(&mut self) {
        let n = if self.street == 1 { 5 } else { 3 };
        match self.deck.deal(n) {
            Some(cards) => self.dealt = cards,
            None => {
                self.street = 6;
                self.dealt.clear();
            }
        }
    }

    /// Build one action per row-count pattern, assigning `to_place` (already
    /// sorted descending) bottom-first into canonical first-empty slots.
    fn placement_actions(&self, to_place: &[Card], discard: Option<Card>, out: &mut Vec<Action>) {
        let board = &self.boards[self.current_player];
        let vacancies = [
            board.vacancies(Row::Bottom),
            board.vacancies(Row::Middle),
            board.vacancies(Row::Top),
        ];
        for pattern in row_count_patterns(to_place.len(), vacancies) {
            let mut placements = Vec::with_capacity(to_place.len());
            let mut next_card = to_place.iter();
            for (row, &count) in Row::PLACEMENT_ORDER.iter().zip(pattern.iter()) {
                let mut empties = board
                    .row(*row)
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| !c.is_valid())
                    .map(|(slot, _)| slot);
                for _ in 0..count {
                    placements.push(Placement {
                        card: *next_card.next().expect("pattern exceeds card count"),
                        row: *row,
                        slot: empties.next().expect("pattern exceeds vacancies"),
                    });
                }
            }
            out.push(Action { placements, discard });
        }
    }

    /// The mandated safety net: fill first-empty slots bottom, then middle,
    /// then top, discarding the last dealt card on streets 2-5.
    fn fallback_action(&self, sorted: &[Card]) -> Action {
        let (place_n, discard) = if self.street == 1 || sorted.len() < 3 {
            (sorted.len(), None)
        } else {
            (2, Some(sorted[2]))
        };
        let board = &self.boards[self.current_player];
        let mut placements = Vec::with_capacity(place_n);
        let mut cards = sorted[..place_n].iter();
        'rows: for row in Row::PLACEMENT_ORDER {
            for (slot, c) in board.row(row).iter().enumerate() {
                if c.is_valid() {
                    continue;
                }
                match cards.next() {
                    Some(&card) => placements.push(Placement { card, row, slot }),
                    None => break 'rows,
                }
            }
        }
        Action {
            placements,
            discard,
        }
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameState(street {}, to act {}, boards {}/{})",
            self.street,
            self.current_player,
            self.boards[0].card_count(),
            self.boards[1].card_count()
        )
    }
}
