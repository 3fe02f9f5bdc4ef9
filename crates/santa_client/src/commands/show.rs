//! Show command implementation.

use super::print_assignment;
use santa_client::{DrawClient, Startup, SyncMode};

/// Runs the show command.
pub fn run(client: &DrawClient) -> Result<(), Box<dyn std::error::Error>> {
    match client.startup()? {
        Startup::Server(assignment) => {
            println!("Assignment loaded from server:");
            print_assignment(&assignment);
        }
        Startup::Local {
            assignment,
            can_import,
        } => {
            match client.mode() {
                SyncMode::LocalOnly => println!("Local assignment:"),
                SyncMode::ServerSync => {
                    println!("Server unavailable or empty, using local assignment:")
                }
            }
            print_assignment(&assignment);
            if can_import {
                println!();
                println!("Run `santa import` to upload this assignment to the server.");
            }
        }
        Startup::Empty => {
            println!(
                "No assignment yet. Run `santa check {}` to draw one.",
                client.config().reset_keyword
            );
        }
    }
    Ok(())
}
