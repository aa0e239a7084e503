//! Level round trip through the global logger state.
//!
//! Kept in its own test binary so no other test changes the level concurrently.

use installment_calc::logger::{current_level, set_level, set_level_from_str, Level};

#[test]
fn current_level_reflects_last_set() {
    set_level(Level::Info);
    assert_eq!(current_level(), Level::Info);

    assert!(set_level_from_str("error"));
    assert_eq!(current_level(), Level::Error);

    assert!(!set_level_from_str("nonsense"));
    assert_eq!(current_level(), Level::Error);
}
