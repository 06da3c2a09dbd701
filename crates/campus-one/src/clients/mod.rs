//! Typed client wrappers, one per actor. Each wrapper hides the command
//! plumbing behind named methods and returns its ledger's own error type,
//! with plumbing failures folded into the `ActorCommunication` variant.

pub mod activity_client;
pub mod appointment_client;
pub mod catalog_client;
pub mod registry_client;
pub mod relay_client;

pub use activity_client::ActivityClient;
pub use appointment_client::AppointmentClient;
pub use catalog_client::CatalogClient;
pub use registry_client::RegistryClient;
pub use relay_client::RelayClient;
