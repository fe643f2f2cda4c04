use std::sync::Arc;

use caretaker_core::config::ClientConfig;
use caretaker_core::sync::{AckOutcome, AcknowledgeCoordinator};

use crate::commands::common::build_client;
use crate::error::CliError;
use crate::notifier::TerminalNotifier;

pub async fn run_ack(config: &ClientConfig, id: &str) -> Result<(), CliError> {
    let client = build_client(config)?;
    // A one-off command has no raised surfaces; retraction is a no-op here.
    let coordinator =
        AcknowledgeCoordinator::new(Arc::new(TerminalNotifier::stdout(false)), client);

    match coordinator.acknowledge_and_wait(id).await {
        AckOutcome::Written => {
            println!("Acknowledged {id}");
            Ok(())
        }
        AckOutcome::WriteFailed(message) => Err(CliError::AcknowledgeFailed(message)),
        AckOutcome::Ignored => Err(CliError::EmptyAlertId),
    }
}
