//! Key-value contract for the persistence collaborator.
//!
//! Each collection is stored whole under one key as a JSON value. Methods
//! return `impl Future + Send` rather than using `async fn` so the futures can
//! be driven from `tokio::spawn`ed writer tasks.

use super::PersistenceError;
use serde_json::Value;
use std::future::Future;

pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str)
        -> impl Future<Output = Result<Option<Value>, PersistenceError>> + Send;

    /// Replace the value stored under `key`.
    fn set(
        &self,
        key: &str,
        value: &Value,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}
