//! Check command implementation.

use super::print_assignment;
use santa_client::{CheckOutcome, DrawClient, Source};

/// Runs the check command.
pub fn run(client: &DrawClient, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    match client.check(text)? {
        CheckOutcome::Reset(report) => {
            println!("{}", report.message);
            if report.source == Source::Local {
                println!("(server unavailable, drawn locally)");
            }
            print_assignment(&report.assignment);
        }
        CheckOutcome::Assigned(pairing) => println!("{pairing}"),
        CheckOutcome::Accepted(text) => println!("Input accepted: {text}"),
    }
    Ok(())
}
