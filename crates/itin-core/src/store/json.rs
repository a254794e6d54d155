//! JSON-file record store.
//!
//! All collections live in one document, versioned by [`SCHEMA_VERSION`].
//! A store opened on a path rewrites the file after every mutation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use super::{Entity, RecordStore, Result};
use crate::error::StoreError;
use crate::models::entities::{
    CarRental, Excursion, Expense, Flight, GroundTransport, Lodging, Preferences, Trip,
};

/// Current layout of the store file.
pub const SCHEMA_VERSION: u32 = 1;

/// Every collection a store holds, in file order.
const COLLECTIONS: [&str; 8] = [
    Trip::COLLECTION,
    Flight::COLLECTION,
    Lodging::COLLECTION,
    CarRental::COLLECTION,
    GroundTransport::COLLECTION,
    Excursion::COLLECTION,
    Expense::COLLECTION,
    Preferences::COLLECTION,
];

/// Serialized contents of a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    pub schema_version: u32,
    #[serde(default)]
    pub collections: BTreeMap<String, Vec<Value>>,
}

impl Default for StoreData {
    /// Empty collections plus the default preferences record.
    fn default() -> Self {
        let mut data = Self {
            schema_version: SCHEMA_VERSION,
            collections: BTreeMap::new(),
        };
        data.fill_missing();
        data
    }
}

impl StoreData {
    /// Add collections missing from an older file and seed preferences.
    fn fill_missing(&mut self) {
        for name in COLLECTIONS {
            self.collections.entry(name.to_string()).or_default();
        }

        let preferences = self
            .collections
            .entry(Preferences::COLLECTION.to_string())
            .or_default();
        if preferences.is_empty() {
            if let Ok(value) = serde_json::to_value(Preferences::default()) {
                preferences.push(value);
            }
        }
    }

    fn records(&self, collection: &str) -> &[Value] {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn records_mut(&mut self, collection: &str) -> &mut Vec<Value> {
        self.collections.entry(collection.to_string()).or_default()
    }
}

fn has_id(value: &Value, id: &str) -> bool {
    value.get("id").and_then(Value::as_str) == Some(id)
}

fn decode<E: Entity>(value: &Value) -> Result<E> {
    serde_json::from_value(value.clone()).map_err(|e| StoreError::Serialization {
        collection: E::COLLECTION,
        reason: e.to_string(),
    })
}

fn encode<E: Entity>(record: &E) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| StoreError::Serialization {
        collection: E::COLLECTION,
        reason: e.to_string(),
    })
}

fn not_found<E: Entity>(id: &str) -> StoreError {
    StoreError::NotFound {
        collection: E::COLLECTION,
        id: id.to_string(),
    }
}

/// Record store backed by a single JSON document.
#[derive(Debug, Default)]
pub struct JsonStore {
    data: StoreData,
    path: Option<PathBuf>,
}

impl JsonStore {
    /// Create a store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store file at `path`, creating it with defaults if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!("Initializing new store at {:?}", path);
            let store = Self {
                data: StoreData::default(),
                path: Some(path),
            };
            store.persist(&store.data)?;
            return Ok(store);
        }

        let content = fs::read_to_string(&path)?;
        let mut data: StoreData =
            serde_json::from_str(&content).map_err(|e| StoreError::Serialization {
                collection: "store",
                reason: e.to_string(),
            })?;

        if data.schema_version > SCHEMA_VERSION {
            return Err(StoreError::SchemaVersion {
                found: data.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        data.fill_missing();

        debug!("Opened store {:?} (schema {})", path, data.schema_version);
        Ok(Self {
            data,
            path: Some(path),
        })
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn data(&self) -> &StoreData {
        &self.data
    }

    /// Write `data` through a temporary file, then make it the current state.
    fn commit(&mut self, data: StoreData) -> Result<()> {
        self.persist(&data)?;
        self.data = data;
        Ok(())
    }

    /// Write the whole document through a temporary file.
    fn persist(&self, data: &StoreData) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(data).map_err(|e| {
            StoreError::Serialization {
                collection: "store",
                reason: e.to_string(),
            }
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl RecordStore for JsonStore {
    fn create<E: Entity>(&mut self, mut record: E) -> Result<E> {
        let records = self.data.records(E::COLLECTION);
        if record.id().is_empty() || records.iter().any(|v| has_id(v, record.id())) {
            record.set_id(Uuid::new_v4().to_string());
        }

        let mut data = self.data.clone();
        data.records_mut(E::COLLECTION).push(encode(&record)?);
        self.commit(data)?;

        debug!("Created {} record {}", E::COLLECTION, record.id());
        Ok(record)
    }

    fn get<E: Entity>(&self, id: &str) -> Result<E> {
        let value = self
            .data
            .records(E::COLLECTION)
            .iter()
            .find(|v| has_id(v, id))
            .ok_or_else(|| not_found::<E>(id))?;
        decode(value)
    }

    fn list<E: Entity>(&self, trip_id: Option<&str>) -> Result<Vec<E>> {
        let mut records = Vec::new();
        for value in self.data.records(E::COLLECTION) {
            let record: E = decode(value)?;
            if trip_id.is_none() || record.trip_id() == trip_id {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn update<E: Entity>(&mut self, id: &str, patch: &Value) -> Result<E> {
        let Some(fields) = patch.as_object() else {
            return Err(StoreError::Serialization {
                collection: E::COLLECTION,
                reason: "patch must be a JSON object".to_string(),
            });
        };

        let mut data = self.data.clone();
        let records = data.records_mut(E::COLLECTION);
        let index = records
            .iter()
            .position(|v| has_id(v, id))
            .ok_or_else(|| not_found::<E>(id))?;

        let mut merged = records[index].clone();
        if let Some(object) = merged.as_object_mut() {
            for (key, value) in fields {
                if key == "id" {
                    continue;
                }
                if value.is_null() {
                    object.remove(key);
                } else {
                    object.insert(key.clone(), value.clone());
                }
            }
        }

        let record: E = decode(&merged)?;
        records[index] = encode(&record)?;
        self.commit(data)?;

        debug!("Updated {} record {}", E::COLLECTION, id);
        Ok(record)
    }

    fn delete<E: Entity>(&mut self, id: &str) -> Result<()> {
        let mut data = self.data.clone();
        let records = data.records_mut(E::COLLECTION);
        let index = records
            .iter()
            .position(|v| has_id(v, id))
            .ok_or_else(|| not_found::<E>(id))?;
        records.remove(index);
        self.commit(data)?;

        debug!("Deleted {} record {}", E::COLLECTION, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use serde_json::json;
    use tempfile::TempDir;

    fn trip(name: &str) -> Trip {
        Trip {
            id: String::new(),
            name: name.to_string(),
            destination: "Switzerland".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 6, 25).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 7, 5).unwrap(),
            notes: String::new(),
        }
    }

    fn expense(trip_id: &str, description: &str) -> Expense {
        Expense {
            id: String::new(),
            trip_id: trip_id.to_string(),
            description: description.to_string(),
            category: "food".to_string(),
            amount: Decimal::new(4250, 2),
            currency: "CHF".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 6, 26).unwrap(),
        }
    }

    #[test]
    fn test_default_data() {
        let store = JsonStore::in_memory();
        let data = store.data();

        assert_eq!(data.schema_version, SCHEMA_VERSION);
        assert_eq!(data.collections.len(), COLLECTIONS.len());
        assert!(data.collections["trips"].is_empty());

        let preferences: Vec<Preferences> = store.list(None).unwrap();
        assert_eq!(preferences, vec![Preferences::default()]);
    }

    #[test]
    fn test_create_assigns_id_and_lists_by_trip() {
        let mut store = JsonStore::in_memory();
        let first = store.create(trip("Alps")).unwrap();
        let second = store.create(trip("Coast")).unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(store.get::<Trip>(&first.id).unwrap().name, "Alps");

        store.create(expense(&first.id, "Fondue")).unwrap();
        store.create(expense(&first.id, "Train snacks")).unwrap();
        store.create(expense(&second.id, "Ice cream")).unwrap();

        let alps: Vec<Expense> = store.list(Some(&first.id)).unwrap();
        assert_eq!(alps.len(), 2);
        assert_eq!(alps[0].description, "Fondue");
        assert_eq!(store.list::<Expense>(None).unwrap().len(), 3);
        assert_eq!(store.list::<Trip>(Some(&first.id)).unwrap().len(), 0);
    }

    #[test]
    fn test_update_merge_patch() {
        let mut store = JsonStore::in_memory();
        let created = store.create(trip("Alps")).unwrap();

        let updated: Trip = store
            .update(
                &created.id,
                &json!({"name": "Alps 2026", "notes": null, "id": "hijack"}),
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Alps 2026");
        assert_eq!(updated.notes, "");
        assert_eq!(updated.destination, "Switzerland");
        assert_eq!(store.get::<Trip>(&created.id).unwrap(), updated);
    }

    #[test]
    fn test_update_rejects_bad_values() {
        let mut store = JsonStore::in_memory();
        let created = store.create(trip("Alps")).unwrap();

        let err = store
            .update::<Trip>(&created.id, &json!({"start_date": "not a date"}))
            .unwrap_err();
        assert!(matches!(err, StoreError::Serialization { collection: "trips", .. }));

        let err = store.update::<Trip>(&created.id, &json!(["name"])).unwrap_err();
        assert!(matches!(err, StoreError::Serialization { .. }));

        // The failed patch left the record untouched.
        assert_eq!(store.get::<Trip>(&created.id).unwrap().name, "Alps");
    }

    #[test]
    fn test_delete_and_not_found() {
        let mut store = JsonStore::in_memory();
        let created = store.create(trip("Alps")).unwrap();

        store.delete::<Trip>(&created.id).unwrap();
        let err = store.get::<Trip>(&created.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { collection: "trips", .. }));
        assert!(store.delete::<Trip>(&created.id).is_err());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("store.json");

        let id = {
            let mut store = JsonStore::open(&path).unwrap();
            store.create(trip("Alps")).unwrap().id
        };
        assert!(path.exists());

        let store = JsonStore::open(&path).unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
        assert_eq!(store.get::<Trip>(&id).unwrap().name, "Alps");
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let mut store = JsonStore::open(&path).unwrap();
        let alps = store.create(trip("Alps")).unwrap();

        // A directory where the temporary file goes makes every write fail.
        fs::create_dir(dir.path().join("store.json.tmp")).unwrap();

        assert!(store.create(trip("Coast")).is_err());
        assert_eq!(store.list::<Trip>(None).unwrap().len(), 1);

        assert!(store.update::<Trip>(&alps.id, &json!({"name": "Lakes"})).is_err());
        assert_eq!(store.get::<Trip>(&alps.id).unwrap().name, "Alps");

        assert!(store.delete::<Trip>(&alps.id).is_err());
        assert!(store.get::<Trip>(&alps.id).is_ok());
    }

    #[test]
    fn test_rejects_newer_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"schema_version": 2, "collections": {}}"#).unwrap();

        let err = JsonStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::SchemaVersion { found: 2, supported: 1 }));
    }

    #[test]
    fn test_older_file_gets_missing_collections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"schema_version": 1, "collections": {"trips": []}}"#).unwrap();

        let store = JsonStore::open(&path).unwrap();
        assert_eq!(store.data().collections.len(), COLLECTIONS.len());
        assert_eq!(store.list::<Preferences>(None).unwrap().len(), 1);
    }
}
