//! Import command implementation.

use super::print_assignment;
use santa_client::{ClientError, DrawClient};

/// Runs the import command.
pub fn run(client: &DrawClient) -> Result<(), Box<dyn std::error::Error>> {
    match client.import_local() {
        Ok(assignment) => {
            println!("Local assignment uploaded to the server:");
            print_assignment(&assignment);
            Ok(())
        }
        Err(ClientError::ImportConflict { existing }) => {
            println!("The server already holds an assignment:");
            print_assignment(&existing);
            Err(ClientError::ImportConflict { existing }.into())
        }
        Err(e) => Err(e.into()),
    }
}
