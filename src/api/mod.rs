//! HTTP API for the Momota client.
//!
//! Photo analyses, the symptom checker and the health log are exposed as
//! JSON endpoints under `/api/`. Analysis responses share one envelope
//! (`success`, `data`, `source`, `fallbackUsed`, `utterance`).

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{serve, start_server_on, ApiServer, ServerError};
pub use types::ApiContext;
