//! Lossy infoset keys.
//!
//! The learning key abstracts away exact ranks and kickers but keeps the
//! structural features that drive placement decisions: per-row card counts,
//! made pairs/trips, single-suit rows, and the actor's exact dealt hand.
//! Strategically similar situations thereby share one regret-table entry.

use super::board::{Board, Row};
use super::card::Card;
use super::state::GameState;
use std::fmt::Write;

/// Structural summary of one row: `"E"` when empty, otherwise `"C<n>"`
/// plus `"T<k>"`/`"P<k>"` for trips/pair groups in the sorted rank sequence
/// and `"F<suit>"` when every card shares one suit.
pub fn row_summary(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "E".to_string();
    }

    let mut flush_suit = None;
    if cards.len() > 1 && cards.iter().all(|c| c.suit() == cards[0].suit()) {
        flush_suit = Some(cards[0].suit());
    }

    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank()).collect();
    ranks.sort_unstable();

    let mut pairs = 0;
    let mut trips = 0;
    let mut i = 0;
    while i < ranks.len() {
        let mut j = i;
        while j < ranks.len() && ranks[j] == ranks[i] {
            j += 1;
        }
        match j - i {
            2 => pairs += 1,
            3 => trips += 1,
            _ => {}
        }
        i = j;
    }

    let mut summary = format!("C{}", cards.len());
    if trips > 0 {
        write!(summary, "T{}", trips).unwrap();
    }
    if pairs > 0 {
        write!(summary, "P{}", pairs).unwrap();
    }
    if let Some(suit) = flush_suit {
        write!(summary, "F{}", suit).unwrap();
    }
    summary
}

/// The infoset key for the player to act:
/// `S<street>|B:..;M:..;T:..|OB:..;OM:..;OT:..|H:<sorted dealt cards>`.
pub fn infoset_key(state: &GameState) -> String {
    let seat = state.current_player();
    let mine = state.board(seat);
    let theirs = state.opponent_board(seat);

    let rows = |board: &Board| {
        (
            row_summary(&board.row_cards(Row::Bottom)),
            row_summary(&board.row_cards(Row::Middle)),
            row_summary(&board.row_cards(Row::Top)),
        )
    };
    let (b, m, t) = rows(mine);
    let (ob, om, ot) = rows(theirs);

    let mut hand = state.dealt_cards().to_vec();
    hand.sort_unstable();

    let mut key = format!("S{}|B:{};M:{};T:{}|OB:{};OM:{};OT:{}|H:", state.street(), b, m, t, ob, om, ot);
    for card in hand {
        write!(key, "{}", card).unwrap();
    }
    key
}
