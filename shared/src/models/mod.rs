//! Data models
//!
//! Wire types for the reservation service plus the pure rules attached to
//! them (opening hours, status transitions, review constraints).
//! All IDs are `i64`; JSON is camelCase.

pub mod admin;
pub mod dining_table;
pub mod opening_hours;
pub mod reservation;
pub mod restaurant;
pub mod review;
pub mod user;

// Re-exports
pub use admin::*;
pub use dining_table::*;
pub use opening_hours::*;
pub use reservation::*;
pub use restaurant::*;
pub use review::*;
pub use user::*;
