//! User profiles and admin-only role management.

pub mod model;
pub mod mysql_store;
pub mod service;
pub mod store;

pub use model::{Profile, Role};
pub use mysql_store::MySqlProfileStore;
pub use service::AdminService;
pub use store::{InMemoryProfileStore, ProfileStore};
