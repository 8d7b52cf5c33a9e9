//! Property tests for draw sequences.

use diffcase_strategy::{ParamSpec, Strategy, Synthesizer};
use diffcase_value::Value;
use proptest::prelude::*;

proptest! {
    #[test]
    fn int_draws_stay_in_range(lo in -1000i64..1000, span in 0i64..50, seed in any::<u64>()) {
        let synth = Synthesizer::new(vec![ParamSpec::new("n", Strategy::int(lo, lo + span))])
            .with_budget(20)
            .with_seed(seed);
        for tuple in synth.draws() {
            let n = tuple["n"].as_i64().unwrap();
            prop_assert!(n >= lo && n <= lo + span);
        }
    }

    #[test]
    fn list_lengths_stay_in_range(min in 0usize..4, extra in 0usize..4, seed in any::<u64>()) {
        let synth = Synthesizer::new(vec![
            ParamSpec::new("xs", Strategy::list(Strategy::Bool, min, min + extra)),
        ])
        .with_budget(10)
        .with_seed(seed);
        for tuple in synth.draws() {
            let len = tuple["xs"].as_array().unwrap().len();
            prop_assert!(len >= min && len <= min + extra);
        }
    }

    #[test]
    fn every_draw_is_representable(seed in any::<u64>()) {
        let synth = Synthesizer::new(vec![
            ParamSpec::new("f", Strategy::float(f64::MIN, f64::MAX)),
            ParamSpec::new("o", Strategy::optional(Strategy::float(-1.0, 1.0))),
        ])
        .with_budget(10)
        .with_seed(seed);
        for tuple in synth.draws() {
            prop_assert!(Value::Object(tuple).is_representable());
        }
    }

    #[test]
    fn seed_count_never_depends_on_budget(seeds in prop::collection::vec(any::<i64>(), 0..5), budget in 0usize..10) {
        let synth = Synthesizer::new(vec![
            ParamSpec::new("x", Strategy::int(0, 1)).with_seeds(seeds.iter().copied().map(Value::Int)),
        ])
        .with_budget(budget);
        let tuples: Vec<_> = synth.draws().collect();
        prop_assert_eq!(tuples.len(), seeds.len() + budget);
        for (tuple, seed) in tuples.iter().zip(&seeds) {
            prop_assert_eq!(&tuple["x"], &Value::Int(*seed));
        }
    }
}
