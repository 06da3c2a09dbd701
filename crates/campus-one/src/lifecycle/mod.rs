//! # System Lifecycle & Orchestration
//!
//! Individual actors are simple; wiring them together is where the
//! complexity lives. [`CampusSystem`] is the conductor: it opens the blob
//! store, loads every persisted collection (seeding the shop catalog on
//! first run), spawns the five actors with their dependencies injected,
//! starts the background sweep, and coordinates a clean shutdown.
//!
//! The dependency graph is acyclic: the appointment book holds a relay
//! client in its context, the session manager holds registry, activity,
//! and relay clients, and nothing points back. Shutdown therefore works
//! by stopping the sweep, dropping every client, and waiting for the
//! actors to drain their channels.

pub mod session;
pub mod sweep;

pub use session::SessionManager;
pub use sweep::{SweepDriver, SweepHandle};

use crate::appointment_book::{self, AppointmentContext, ReminderPolicy};
use crate::activity_trail;
use crate::catalog;
use crate::clients::{
    ActivityClient, AppointmentClient, CatalogClient, RegistryClient, RelayClient,
};
use crate::config::Config;
use crate::registry;
use crate::relay::{self, ConsoleTransport, Transport};
use ledger_actor::store::{BlobStore, FileStore, StoreError};
use std::sync::Arc;
use tracing::{error, info};

/// The running marketplace: every actor spawned, every client wired.
pub struct CampusSystem {
    pub appointments: AppointmentClient,
    pub registry: RegistryClient,
    pub catalog: CatalogClient,
    pub activity: ActivityClient,
    pub relay: RelayClient,
    pub session: SessionManager,
    sweep: SweepHandle,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CampusSystem {
    /// Starts the system against a file-backed store under
    /// `config.data_dir`, with the default console transport.
    pub fn start(config: Config) -> Result<Self, StoreError> {
        let store: Arc<dyn BlobStore> = Arc::new(FileStore::new(&config.data_dir)?);
        Ok(Self::with_store(config, store, Arc::new(ConsoleTransport)))
    }

    /// Starts the system against any store and transport. Tests inject an
    /// in-memory store and a scripted transport here.
    pub fn with_store(
        config: Config,
        store: Arc<dyn BlobStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        // 1. Create actors (no dependencies yet).
        let (relay_actor, relay) =
            relay::new(config.relay_log_cap, transport, config.relay_flip_delay);
        let (registry_actor, registry) = registry::new(store.clone());
        let (catalog_actor, catalog) = catalog::new(store.clone());
        let (activity_actor, activity) = activity_trail::new(store.clone());
        let (appointment_actor, appointments) = appointment_book::new(store.clone());

        // 2. Start actors with their contexts injected. Only the
        // appointment book has dependencies: the relay for notifications
        // and the reminder policy.
        let relay_handle = tokio::spawn(relay_actor.run(()));
        let registry_handle = tokio::spawn(registry_actor.run(()));
        let catalog_handle = tokio::spawn(catalog_actor.run(()));
        let activity_handle = tokio::spawn(activity_actor.run(()));
        let appointment_handle = tokio::spawn(appointment_actor.run(AppointmentContext {
            relay: relay.clone(),
            reminders: ReminderPolicy {
                window: config.reminder_window,
                catch_up: config.reminder_catch_up,
            },
        }));

        // 3. Background sweep and the session layer.
        let sweep = SweepDriver::start(appointments.clone(), config.sweep_interval);
        let session = SessionManager::new(
            store,
            registry.clone(),
            activity.clone(),
            relay.clone(),
        );

        info!("Campus system online");
        Self {
            appointments,
            registry,
            catalog,
            activity,
            relay,
            session,
            sweep,
            handles: vec![
                relay_handle,
                registry_handle,
                catalog_handle,
                activity_handle,
                appointment_handle,
            ],
        }
    }

    /// Gracefully shuts the whole system down: stop the sweep, drop every
    /// client so the actors see their channels close, then wait for each
    /// actor task. In-flight relay flips are drained, so this can take up
    /// to one flip delay.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down campus system");
        self.sweep.stop();

        drop(self.session);
        drop(self.appointments);
        drop(self.registry);
        drop(self.catalog);
        drop(self.activity);
        drop(self.relay);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {e:?}");
                return Err(format!("Actor task failed: {e:?}"));
            }
        }

        info!("Campus system shutdown complete");
        Ok(())
    }

    /// Exports the user directory and activity trail as a replication
    /// token, recording the export when a session is active.
    pub async fn export_replica(&self) -> Result<String, crate::registry::RegistryError> {
        let activity = self.activity.recent().await.ok();
        let token = self.registry.export(activity).await?;
        if let Some(user) = self.session.current() {
            let _ = self.session.record(&user, "replica_export", "").await;
        }
        Ok(token)
    }

    /// Imports a replication token, recording the import when a session
    /// is active. A malformed token changes nothing.
    pub async fn import_replica(
        &self,
        token: &str,
    ) -> Result<crate::registry::MergeReport, crate::registry::RegistryError> {
        let report = self.registry.import(token).await?;
        if let Some(user) = self.session.current() {
            let _ = self
                .session
                .record(
                    &user,
                    "replica_import",
                    format!("added={} replaced={}", report.added, report.replaced),
                )
                .await;
        }
        Ok(report)
    }
}
