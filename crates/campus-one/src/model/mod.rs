//! Pure data structures for the campus marketplace: users, shops and
//! their offerings, appointments, and the activity trail. Everything here
//! serializes with the camelCase field names used by the persisted blobs
//! and the replication token.

pub mod activity;
pub mod appointment;
pub mod shop;
pub mod user;

pub use activity::ActivityEntry;
pub use appointment::{Appointment, AppointmentStatus};
pub use shop::{InventoryItem, Offering, ServiceItem, Shop, ShopCategory};
pub use user::{Credential, User, UserRole};
