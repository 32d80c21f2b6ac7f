//! Client library for the remote study backend
//!
//! The backend independently records study sessions. The local tracker treats
//! it as a best-effort mirror: it submits each new session through
//! [`StudyBackend`] and resolves the acting user through [`ActorResolver`].
//!
//! # Example
//!
//! ```no_run
//! use study_client::{HttpBackend, StudyBackend, StudySubmission};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpBackend::new("https://api.example.com", Duration::from_secs(10))?;
//!     let actor = backend.login("ana@example.com", "secret").await?;
//!     backend
//!         .submit_study(&StudySubmission::new(actor, "History", "Cold War", 75, "medium"))
//!         .await?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod session;
mod traits;

pub use client::HttpBackend;
pub use error::{ClientError, ClientResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockBackend, MockCall};
pub use session::{SessionFile, StaticActor, StoredSession};
pub use traits::{ActorId, ActorResolver, StudyBackend, StudySubmission};
