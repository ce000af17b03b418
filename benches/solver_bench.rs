//! Microbenchmarks for the hot paths of training: hand evaluation,
//! terminal scoring and action generation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ofc_solver::games::ofc::{Card, GameState, HandEvaluator};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_evaluate_five(c: &mut Criterion) {
    let evaluator = HandEvaluator::new();
    let hands: Vec<Vec<Card>> = (0u8..48)
        .map(|base| (base..base + 5).map(Card::from_id).collect())
        .collect();

    c.bench_function("evaluate_5card", |b| {
        b.iter(|| {
            for hand in &hands {
                black_box(evaluator.evaluate(black_box(hand)));
            }
        })
    });
}

fn bench_evaluate_three(c: &mut Criterion) {
    let evaluator = HandEvaluator::new();
    let hands: Vec<Vec<Card>> = (0u8..49)
        .map(|base| (base..base + 3).map(Card::from_id).collect())
        .collect();

    c.bench_function("evaluate_3card", |b| {
        b.iter(|| {
            for hand in &hands {
                black_box(evaluator.evaluate(black_box(hand)));
            }
        })
    });
}

fn bench_terminal_payoffs(c: &mut Criterion) {
    let evaluator = HandEvaluator::new();
    // Deterministic first-action playouts to a spread of terminal states.
    let terminals: Vec<GameState> = (0..32)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = GameState::new(&mut rng);
            while !state.is_terminal() {
                let actions = state.legal_actions();
                state = state.apply_action(&actions[0]);
            }
            state
        })
        .collect();

    c.bench_function("terminal_payoffs", |b| {
        b.iter(|| {
            for state in &terminals {
                black_box(state.payoffs(black_box(&evaluator)));
            }
        })
    });
}

fn bench_street_one_actions(c: &mut Criterion) {
    let states: Vec<GameState> = (0..32)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            GameState::new(&mut rng)
        })
        .collect();

    c.bench_function("street1_legal_actions", |b| {
        b.iter(|| {
            for state in &states {
                black_box(state.legal_actions());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_evaluate_five,
    bench_evaluate_three,
    bench_terminal_payoffs,
    bench_street_one_actions
);
criterion_main!(benches);
