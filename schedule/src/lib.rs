//! Study scheduling core
//!
//! [`EntityStore`] owns the user's subjects, study sessions and reviews.
//! Registering a session schedules reviews at fixed offsets; completing a
//! review logs a session that schedules nothing. Collections are persisted
//! through a [`KeyValueStore`] and new sessions can be mirrored to a remote
//! backend.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use schedule::{EntityStore, JsonFileStore, SeedData};
//! use study::{Clock, StudyPayload, SystemClock};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let kv = Arc::new(JsonFileStore::new("./data".into()));
//!     let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//!     let mut store = EntityStore::load(kv, SeedData::demo(clock.now()), clock).await;
//!
//!     store.register_study(StudyPayload::new("History", "Cold War", 75))?;
//!     println!("{} reviews due", store.today_count());
//!
//!     store.close().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
mod lifecycle;
pub mod mirror;
pub mod persistence;
pub mod srs;
mod store;

pub use config::ScheduleConfig;
pub use error::StoreError;
pub use lifecycle::REVIEW_SESSION_DIFFICULTY;
pub use mirror::{MirrorEvent, MirrorHandle, MirrorJob};
pub use persistence::{
    CollectionKey, JsonFileStore, KeyValueStore, MemoryStore, PersistenceError, PersistenceWriter,
    SeedData,
};
pub use store::EntityStore;
