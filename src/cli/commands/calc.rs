//! Calc command handler

use super::open_store;
use installment_calc::config::Config;
use installment_calc::core::calculator::compute;
use installment_calc::core::input::RawInput;
use installment_calc::core::models::FeeConfiguration;
use installment_calc::core::view::{ResultView, StaticHints};
use installment_calc::{debug, info, verbose};

/// Validate the inputs, compute the breakdown and print it.
///
/// Invalid input prints every field error followed by the placeholder view
/// and exits with status 1. Persisted settings are only read.
pub fn run(raw: &RawInput, config: &Config) {
    let settings = open_store(config).load_settings();
    print_hints(&settings);

    match raw.read_and_validate() {
        Ok(input) => {
            info!("Computing breakdown for {input:?}");
            let result = compute(&input, &settings);
            verbose!("Result: {result:?}");
            print!("{}", ResultView::render(&result, &settings));
        }
        Err(errors) => {
            for (field, error) in errors.iter() {
                debug!("Rejected field {}: {error:?}", field.id());
            }
            eprint!("{errors}");
            print!("{}", ResultView::placeholder(&settings));
            std::process::exit(1);
        }
    }
}

fn print_hints(settings: &FeeConfiguration) {
    let hints = StaticHints::from_configuration(settings);
    println!("{}", hints.per_credit_rate);
    println!("Retake (first time) {}", hints.retake_first.to_lowercase());
    println!("Retake (not first time) {}", hints.retake_non_first.to_lowercase());
    println!();
}
