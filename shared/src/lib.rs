//! Shared types for the table-reservation client
//!
//! Wire models exchanged with the reservation service, and the pure domain
//! rules that need no network: opening hours and slot generation, the
//! reservation status machine, review constraints.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use error::{ModelError, ModelResult};
pub use response::Page;
pub use serde::{Deserialize, Serialize};
