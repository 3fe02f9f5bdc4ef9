//! CLI command implementations.

pub mod check;
pub mod import;
pub mod show;

use santa_core::Assignment;

/// Prints every pairing, one per line.
pub fn print_assignment(assignment: &Assignment) {
    for (giver, receiver) in assignment {
        println!("  {} → {}", giver.display_name(), receiver.display_name());
    }
}
