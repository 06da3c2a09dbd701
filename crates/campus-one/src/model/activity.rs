use serde::{Deserialize, Serialize};

/// One row of the append-only activity trail. Recorded for significant
/// workflow actions (login success, logout, replication, service-initiated
/// bookings); the trail keeps the most recent entries only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    /// ISO-8601 with offset.
    pub timestamp: String,
    pub user_id: String,
    pub user_email: String,
    pub action: String,
    pub metadata: String,
}
