use proptest::prelude::*;
use verse_lexer::{analyse_text, tokenize, Lexer};

const FRAGMENTS: &[&str] = &[
    "<#", "#>", "\"", "{", "}", "using {", ":=", "<public>", "class Foo", "F(", "0x1F", "3.5e2",
    "'s'", "\n",
];

/// Strings biased towards the fragments that open and close states.
fn verse_like() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => prop::sample::select(FRAGMENTS).prop_map(str::to_string),
            1 => "[ -~]{0,6}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]
    #[test]
    fn spans_partition_the_input(s in ".*") {
        let tokens = tokenize(&s);

        let mut expected_start = 0usize;
        for token in &tokens {
            let start = token.span.start.0 as usize;
            let end = token.span.end.0 as usize;

            prop_assert_eq!(start, expected_start, "gap or overlap at {} input={:?}", start, s);
            prop_assert!(end > start, "empty token {:?} input={:?}", token, s);
            prop_assert_eq!(&s[start..end], token.value.as_str());
            expected_start = end;
        }
        prop_assert_eq!(expected_start, s.len());
    }

    #[test]
    fn verse_like_input_round_trips(s in verse_like()) {
        let lexed = Lexer::new(&s).run();
        let rebuilt: String = lexed.tokens.iter().map(|token| token.value.as_str()).collect();

        prop_assert_eq!(&rebuilt, &s);

        // Open states are reported innermost last, in source order.
        let offsets: Vec<u32> = lexed.unterminated.iter().map(|open| open.opened_at.0).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        prop_assert_eq!(offsets, sorted);
    }

    #[test]
    fn relexing_is_idempotent(s in verse_like()) {
        let first = tokenize(&s);
        let rebuilt: String = first.iter().map(|token| token.value.as_str()).collect();

        prop_assert_eq!(tokenize(&rebuilt), first);
    }

    #[test]
    fn score_is_bounded_and_deterministic(s in verse_like()) {
        let score = analyse_text(&s);

        prop_assert!((0.0..=1.0).contains(&score), "score {} out of range input={:?}", score, s);
        prop_assert_eq!(score, analyse_text(&s));
    }

    #[test]
    fn more_signatures_never_lower_the_score(s in "[ -~]{0,40}") {
        let with_definition = format!("{}\nx := 1", s);
        let with_both = format!("{}\nusing {{ /Verse.org }}", with_definition);

        prop_assert!(analyse_text(&with_definition) >= analyse_text(&s));
        prop_assert!(analyse_text(&with_both) >= analyse_text(&with_definition));
    }
}
