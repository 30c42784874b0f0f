//! Property-based tests for the engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated input sequences.

use brewfsm::core::EntryKind;
use brewfsm::device::{self, symbols::*};
use brewfsm::{Auxiliary, Engine, MemoryStorage, Params, Statistics, Symbol};
use proptest::prelude::*;

const SYMBOLS: [&str; 8] = [
    START,
    INSERT_COIN,
    SELECT,
    BREW,
    COLLECT,
    REFUND,
    MAINTENANCE,
    "KICK",
];

const ITEMS: [&str; 5] = ["espresso", "latte", "cappuccino", "mocha", "chai"];

prop_compose! {
    fn arbitrary_params()(variant in 0..3u8, item in 0..ITEMS.len(), amount in 0..40u64) -> Params {
        match variant {
            0 => Params::none(),
            1 => Params::item(ITEMS[item]),
            _ => Params::coin(amount),
        }
    }
}

prop_compose! {
    fn arbitrary_step()(symbol in 0..SYMBOLS.len(), params in arbitrary_params()) -> (&'static str, Params) {
        (SYMBOLS[symbol], params)
    }
}

fn vendor() -> Engine<MemoryStorage> {
    Engine::open(device::vendor().unwrap(), MemoryStorage::new()).unwrap()
}

fn brewer() -> Engine<MemoryStorage> {
    Engine::open(device::brewer().unwrap(), MemoryStorage::new()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn engine_is_deterministic(steps in prop::collection::vec(arbitrary_step(), 0..60)) {
        let mut first = vendor();
        let mut second = vendor();

        for (symbol, params) in &steps {
            let a = first.apply(*symbol, params).map(|c| c.entry.to_state);
            let b = second.apply(*symbol, params).map(|c| c.entry.to_state);
            prop_assert_eq!(a.is_ok(), b.is_ok());
            prop_assert_eq!(a.ok(), b.ok());
            prop_assert_eq!(first.state(), second.state());
        }
        prop_assert_eq!(first.statistics(), second.statistics());
    }

    #[test]
    fn failed_transitions_change_nothing(steps in prop::collection::vec(arbitrary_step(), 0..60)) {
        let mut engine = vendor();

        for (symbol, params) in &steps {
            let before = engine.state().clone();
            let logged = engine.log().len();
            let stats = engine.statistics();

            if engine.apply(*symbol, params).is_err() {
                prop_assert_eq!(engine.state(), &before);
                prop_assert_eq!(engine.log().len(), logged);
                prop_assert_eq!(engine.statistics(), stats);
            }
        }
    }

    #[test]
    fn committed_transitions_follow_the_table(steps in prop::collection::vec(arbitrary_step(), 0..60)) {
        let mut engine = brewer();

        for (symbol, params) in &steps {
            let from = engine.current_state().clone();
            let expected = engine.automaton().lookup(&from, &Symbol::new(*symbol)).cloned();

            match engine.apply(*symbol, params) {
                Ok(committed) => {
                    prop_assert_eq!(Some(committed.to_state().clone()), expected);
                    prop_assert_eq!(&committed.entry.from_state, &from);
                    prop_assert_eq!(engine.log().last(), Some(&committed.entry));
                }
                Err(_) => prop_assert_eq!(engine.current_state(), &from),
            }
        }
    }

    #[test]
    fn statistics_agree_with_log(steps in prop::collection::vec(arbitrary_step(), 0..80), resets in 0..3usize) {
        let mut engine = vendor();

        for (index, (symbol, params)) in steps.iter().enumerate() {
            if resets > 0 && index % (steps.len() / resets + 1) == 0 {
                engine.reset();
            }
            let _ = engine.apply(*symbol, params);
            prop_assert_eq!(engine.statistics(), Statistics::compute(engine.log().entries()));
        }
    }

    #[test]
    fn log_is_bounded_and_keeps_latest(rounds in 0..130usize) {
        let mut engine = vendor();
        let mut last = None;

        for _ in 0..rounds {
            engine.apply(INSERT_COIN, &Params::coin(1)).unwrap();
            last = Some(engine.apply(REFUND, &Params::none()).unwrap().entry);
        }

        let committed = rounds * 2;
        prop_assert_eq!(engine.log().len(), committed.min(100));
        prop_assert_eq!(engine.log().last(), last.as_ref());
        if let Some(oldest) = engine.log().entries().front() {
            prop_assert_eq!(oldest.sequence as usize, committed.saturating_sub(100) + 1);
        }
        prop_assert!(engine.recent(50).len() <= 20);
    }

    #[test]
    fn reset_always_returns_to_start(steps in prop::collection::vec(arbitrary_step(), 0..40)) {
        let mut engine = vendor();
        for (symbol, params) in &steps {
            let _ = engine.apply(*symbol, params);
        }
        let before = engine.current_state().clone();
        let stats = engine.statistics();

        let reset = engine.reset();
        prop_assert_eq!(engine.current_state(), engine.automaton().start());
        prop_assert_eq!(engine.auxiliary(), &Auxiliary::default());
        prop_assert_eq!(reset.entry.kind, EntryKind::System);
        prop_assert_eq!(&reset.entry.from_state, &before);
        prop_assert_eq!(engine.statistics(), stats);
    }

    #[test]
    fn guard_decisions_are_idempotent(
        symbol in 0..SYMBOLS.len(),
        params in arbitrary_params(),
        balance in 0..60u64,
        selected in prop::option::of(0..ITEMS.len()),
    ) {
        let profile = device::vendor().unwrap();
        let auxiliary = Auxiliary {
            selected_item: selected.map(|i| ITEMS[i].to_string()),
            balance,
        };
        let symbol = Symbol::new(SYMBOLS[symbol]);

        let first = profile.guard().evaluate(&symbol, &params, &auxiliary);
        let second = profile.guard().evaluate(&symbol, &params, &auxiliary);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn persisted_log_survives_restart(steps in prop::collection::vec(arbitrary_step(), 0..40)) {
        let mut engine = vendor();
        for (symbol, params) in &steps {
            let _ = engine.apply(*symbol, params);
        }
        let entries = engine.log().entries().clone();
        let stats = engine.statistics();

        let restarted = Engine::open(device::vendor().unwrap(), engine.into_storage()).unwrap();
        prop_assert!(restarted.load_warning().is_none());
        prop_assert_eq!(restarted.log().entries(), &entries);
        prop_assert_eq!(restarted.statistics(), stats);
    }
}
