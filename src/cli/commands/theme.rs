//! Theme command handler

use super::open_store;
use crate::args::ThemeArg;
use installment_calc::config::Config;

/// Print the stored theme, or store a new one
pub fn run(choice: Option<ThemeArg>, config: &Config) {
    let mut store = open_store(config);
    let current = store.load_theme();
    match choice {
        None => println!("{current}"),
        Some(choice) => {
            let theme = choice.resolve(current);
            if store.save_theme(theme) {
                println!("✓ Theme set to {theme}");
            } else {
                println!("✗ Storage unavailable, theme not saved");
            }
        }
    }
}
