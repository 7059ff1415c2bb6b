use striena_core::{classify, Ending, EndingInputs};

macro_rules! ending_case {
    ($name:ident, $alive:expr, $turn:expr, $dangerous:expr, $rate:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let inputs = EndingInputs {
                is_alive: $alive,
                turn: $turn,
                max_turns: 20,
                dangerous_card_uses: $dangerous,
                survival_rate: $rate,
            };
            assert_eq!(classify(inputs), $expected);
        }
    };
}

ending_case!(dead_is_game_over, false, 4, 0, 1.0, Ending::GameOver);
ending_case!(dead_beats_corruption, false, 4, 3, 0.2, Ending::GameOver);
ending_case!(turn_limit_is_game_over, true, 20, 0, 1.0, Ending::GameOver);
ending_case!(past_turn_limit_is_game_over, true, 25, 0, 0.9, Ending::GameOver);
ending_case!(two_dangerous_is_corruption, true, 19, 2, 1.0, Ending::Corruption);
ending_case!(one_dangerous_is_allowed, true, 19, 1, 1.0, Ending::AllEvacuated);
ending_case!(full_survival, true, 8, 0, 1.0, Ending::AllEvacuated);
ending_case!(reinforced_survival, true, 8, 0, 1.3, Ending::AllEvacuated);
ending_case!(half_survival, true, 8, 0, 0.5, Ending::HighSurvival);
ending_case!(mostly_survived, true, 12, 1, 0.99, Ending::HighSurvival);
ending_case!(below_half, true, 12, 0, 0.49, Ending::LowSurvival);
ending_case!(nobody_left, true, 12, 0, 0.0, Ending::LowSurvival);

macro_rules! number_case {
    ($name:ident, $ending:expr, $number:expr) => {
        #[test]
        fn $name() {
            assert_eq!($ending.number(), $number);
            assert_eq!(Ending::from_number($number), Some($ending));
        }
    };
}

number_case!(number_game_over, Ending::GameOver, 1);
number_case!(number_all_evacuated, Ending::AllEvacuated, 2);
number_case!(number_high_survival, Ending::HighSurvival, 3);
number_case!(number_low_survival, Ending::LowSurvival, 4);
number_case!(number_corruption, Ending::Corruption, 5);
