//! # Mock Ledger & Testing Helpers
//!
//! Test doubles for client wrappers. Two styles are available:
//!
//! * [`MockLedger`] - a scripted mock: queue expectations with
//!   `expect_apply()` / `expect_snapshot()`, hand `client()` to the code
//!   under test, and `verify()` that everything queued was consumed.
//!   Error injection is one call (`return_err`), which makes failure
//!   paths that are hard to reach through a real actor trivially
//!   testable.
//! * [`create_mock_client`] plus the `expect_*` helpers - a raw channel
//!   you drive by hand when a test needs to inspect the command payload
//!   before answering.
//!
//! Neither spawns a real [`crate::LedgerActor`], so these tests are fast
//! and fully deterministic. Use a real actor when the logic under test is
//! the ledger itself.

use crate::client::LedgerClient;
use crate::error::ActorError;
use crate::message::LedgerRequest;
use crate::state::LedgerState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<S: LedgerState> {
    Apply {
        response: Result<S::Outcome, ActorError>,
    },
    Snapshot {
        response: Result<S, ActorError>,
    },
}

/// A mock ledger with scripted responses.
///
/// # Example
/// ```ignore
/// let mut mock = MockLedger::<AppointmentBook>::new();
/// mock.expect_apply().return_ok(outcome);
/// let client = mock.client();
/// // exercise the wrapper under test ...
/// mock.verify();
/// ```
pub struct MockLedger<S: LedgerState> {
    client: LedgerClient<S>,
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: LedgerState> Default for MockLedger<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LedgerState> MockLedger<S> {
    /// Creates a mock with no expectations. Must be called from within a
    /// Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<LedgerRequest<S>>(100);
        let expectations: Arc<Mutex<VecDeque<Expectation<S>>>> =
            Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();
                match (request, expectation) {
                    (
                        LedgerRequest::Apply { respond_to, .. },
                        Some(Expectation::Apply { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        LedgerRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: LedgerClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> LedgerClient<S> {
        self.client.clone()
    }

    /// Expects one `apply`.
    pub fn expect_apply(&mut self) -> ApplyExpectationBuilder<S> {
        ApplyExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects one `snapshot`.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<S> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every queued expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for `apply` expectations.
pub struct ApplyExpectationBuilder<S: LedgerState> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: LedgerState> ApplyExpectationBuilder<S> {
    pub fn return_ok(self, outcome: S::Outcome) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Apply {
                response: Ok(outcome),
            });
    }

    pub fn return_err(self, error: ActorError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Apply {
                response: Err(error),
            });
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<S: LedgerState> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: LedgerState> SnapshotExpectationBuilder<S> {
    pub fn return_ok(self, state: S) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot {
                response: Ok(state),
            });
    }

    pub fn return_err(self, error: ActorError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot {
                response: Err(error),
            });
    }
}

/// Creates a bare mock client and the receiver its requests arrive on.
///
/// Use this when a test wants to assert on the command payload itself
/// before choosing a reply; otherwise prefer [`MockLedger`].
pub fn create_mock_client<S: LedgerState>(
    buffer_size: usize,
) -> (LedgerClient<S>, mpsc::Receiver<LedgerRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (LedgerClient::new(sender), receiver)
}

/// Awaits the next request and returns it if it is an `Apply`.
pub async fn expect_apply<S: LedgerState>(
    receiver: &mut mpsc::Receiver<LedgerRequest<S>>,
) -> Option<(
    S::Command,
    tokio::sync::oneshot::Sender<Result<S::Outcome, ActorError>>,
)> {
    match receiver.recv().await {
        Some(LedgerRequest::Apply {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Awaits the next request and returns it if it is a `Snapshot`.
pub async fn expect_snapshot<S: LedgerState>(
    receiver: &mut mpsc::Receiver<LedgerRequest<S>>,
) -> Option<tokio::sync::oneshot::Sender<Result<S, ActorError>>> {
    match receiver.recv().await {
        Some(LedgerRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Applied, LedgerState};
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Notes(Vec<String>);

    #[derive(Debug)]
    enum NoteCommand {
        Add(String),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("note error")]
    struct NoteError;

    #[async_trait]
    impl LedgerState for Notes {
        type Command = NoteCommand;
        type Outcome = usize;
        type Context = ();
        type Error = NoteError;

        const COLLECTION: &'static str = "notes";

        async fn apply(
            &mut self,
            command: NoteCommand,
            _ctx: &(),
        ) -> Result<Applied<usize>, NoteError> {
            match command {
                NoteCommand::Add(note) => {
                    self.0.push(note);
                    Ok(Applied::mutated(self.0.len()))
                }
            }
        }
    }

    #[tokio::test]
    async fn raw_mock_client_exposes_the_command() {
        let (client, mut receiver) = create_mock_client::<Notes>(10);

        let apply_task =
            tokio::spawn(async move { client.apply(NoteCommand::Add("hi".into())).await });

        let (command, responder) = expect_apply(&mut receiver)
            .await
            .expect("Expected Apply request");
        assert!(matches!(command, NoteCommand::Add(ref note) if note == "hi"));
        responder.send(Ok(1)).unwrap();

        assert_eq!(apply_task.await.unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn scripted_mock_answers_in_order_and_verifies() {
        let mut mock = MockLedger::<Notes>::new();
        mock.expect_apply().return_ok(1);
        mock.expect_snapshot()
            .return_ok(Notes(vec!["hi".to_string()]));

        let client = mock.client();
        assert_eq!(client.apply(NoteCommand::Add("hi".into())).await.unwrap(), 1);
        assert_eq!(client.snapshot().await.unwrap(), Notes(vec!["hi".into()]));

        mock.verify();
    }

    #[tokio::test]
    async fn scripted_mock_injects_errors() {
        let mut mock = MockLedger::<Notes>::new();
        mock.expect_apply().return_err(ActorError::ActorClosed);

        let client = mock.client();
        let result = client.apply(NoteCommand::Add("hi".into())).await;
        assert!(matches!(result, Err(ActorError::ActorClosed)));
    }
}
