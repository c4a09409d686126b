//! Property-based tests: terminal callback exclusivity.

use proptest::prelude::*;
use tripmate_types::*;

fn arb_outcome() -> impl Strategy<Value = StreamOutcome> {
    prop_oneof![
        Just(StreamOutcome::Done),
        any::<String>().prop_map(StreamOutcome::Failed),
    ]
}

proptest! {
    #[test]
    fn exactly_one_terminal_callback(outcome in arb_outcome(), deltas in proptest::collection::vec(".{0,8}", 0..6)) {
        let mut seen = Vec::new();
        let mut done = 0u32;
        let mut errors = 0u32;
        {
            let mut sink = Callbacks::new(
                |t: &str| seen.push(t.to_string()),
                || done += 1,
                |_| errors += 1,
            );
            for d in &deltas {
                sink.on_delta(d);
            }
            outcome.clone().deliver(sink);
        }
        prop_assert_eq!(done + errors, 1);
        prop_assert_eq!(done == 1, outcome.is_done());
        prop_assert_eq!(seen, deltas);
    }

    #[test]
    fn session_never_stays_loading(outcome in arb_outcome(), input in "[a-z]{1,12}") {
        let mut session = ChatSession::default();
        prop_assert!(session.submit(&input).is_some());
        outcome.clone().deliver(&mut session);
        prop_assert!(!session.is_loading());
        prop_assert_eq!(session.last_error().is_some(), !outcome.is_done());
    }
}
