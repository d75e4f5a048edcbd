pub mod identity;
pub mod jwt;
pub mod principal;

pub use identity::{UserId, require_user};
pub use principal::CurrentUser;
