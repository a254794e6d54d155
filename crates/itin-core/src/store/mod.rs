//! Record store for trips and their bookings.

mod json;

pub use json::{JsonStore, StoreData, SCHEMA_VERSION};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A record kept in one named collection of the store.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// Collection name, also the key in the store file.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Owning trip, for trip-scoped entities.
    fn trip_id(&self) -> Option<&str> {
        None
    }
}

/// Trait for record store implementations.
pub trait RecordStore {
    /// Insert a record, assigning it a fresh id, and return it.
    fn create<E: Entity>(&mut self, record: E) -> Result<E>;

    /// Fetch one record by id.
    fn get<E: Entity>(&self, id: &str) -> Result<E>;

    /// All records of a collection, optionally only those of one trip.
    fn list<E: Entity>(&self, trip_id: Option<&str>) -> Result<Vec<E>>;

    /// Apply a JSON merge patch of top-level fields and return the result.
    ///
    /// `null` removes a field; the `id` field cannot be patched.
    fn update<E: Entity>(&mut self, id: &str, patch: &Value) -> Result<E>;

    /// Remove a record.
    fn delete<E: Entity>(&mut self, id: &str) -> Result<()>;
}
