//! Reserve Client - client library for the table-reservation service
//!
//! Covers the guest booking flow (draft, advisory availability, submission,
//! own reservations), the owner console and the admin endpoints. The
//! service owns every record; views here hold short-lived snapshots and
//! refetch after each change.

pub mod api;
pub mod availability;
pub mod config;
pub mod console;
pub mod draft;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod scope;
pub mod session;
pub mod submission;

pub use api::ReserveClient;
pub use availability::{Availability, AvailabilityQuery, summarize};
pub use config::ClientConfig;
pub use console::OwnerConsole;
pub use draft::{DraftForm, ReservationDraft, ValidationError, ValidationResult, validate};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use http::HttpClient;
pub use lifecycle::{Partition, ReservationViewer, can_review, can_self_cancel, partition};
pub use scope::{RequestScope, Ticket};
pub use session::{SessionContext, SessionState};
pub use submission::{SubmitError, submit};

// Re-export shared types for convenience
pub use shared::models;
