use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use omni_configuration::Persistence;
use omni_service_environment::schedule::ScheduleItem;
use omni_service_environment::service_order::ServiceOrder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Level;
use tracing::event;

/// A string-keyed text store. A missing key reads as `None`.
pub trait KeyValueStorage {
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per key. The directory is created on first write.
#[derive(Clone, Debug)]
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_of(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_of(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => {
                Err(error).with_context(|| format!("could not read {}", path.display()))
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!("could not create storage directory {}", self.directory.display())
        })?;
        let path = self.path_of(key);
        fs::write(&path, value).with_context(|| format!("could not write {}", path.display()))
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Whole-collection JSON persistence of both repositories. Reads never fail:
/// absent or unreadable entries yield `None` and the caller falls back to the
/// seed. Failed writes are logged and dropped, the in-memory state stays
/// authoritative.
pub struct PersistentStore<S> {
    storage: S,
    orders_key: String,
    schedule_key: String,
}

impl<S: KeyValueStorage> PersistentStore<S> {
    pub fn new(storage: S, persistence: &Persistence) -> Self {
        Self {
            storage,
            orders_key: persistence.orders_key.clone(),
            schedule_key: persistence.schedule_key.clone(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn load_service_orders(&self) -> Option<Vec<ServiceOrder>> {
        self.load(&self.orders_key)
    }

    pub fn load_schedule_items(&self) -> Option<Vec<ScheduleItem>> {
        self.load(&self.schedule_key)
    }

    pub fn save_service_orders(&mut self, service_orders: &[ServiceOrder]) {
        let key = self.orders_key.clone();
        self.save(&key, service_orders);
    }

    pub fn save_schedule_items(&mut self, schedule_items: &[ScheduleItem]) {
        let key = self.schedule_key.clone();
        self.save(&key, schedule_items);
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let contents = match self.storage.read(key) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                event!(Level::DEBUG, key, "nothing persisted yet");
                return None;
            }
            Err(error) => {
                event!(Level::WARN, key, error = ?error, "could not read persisted collection");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(collection) => Some(collection),
            Err(error) => {
                event!(Level::WARN, key, error = %error, "persisted collection does not parse");
                None
            }
        }
    }

    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, collection: &T) {
        let result = serde_json::to_string(collection)
            .context("could not serialize collection")
            .and_then(|contents| self.storage.write(key, &contents));

        if let Err(error) = result {
            event!(Level::WARN, key, error = ?error, "could not persist collection");
        }
    }
}

#[cfg(test)]
mod tests {
    use omni_service_environment::seed;

    use super::*;

    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            anyhow::bail!("storage is unavailable")
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("storage is full")
        }
    }

    fn memory_store() -> PersistentStore<MemoryStorage> {
        PersistentStore::new(MemoryStorage::default(), &Persistence::default())
    }

    #[test]
    fn test_empty_store_loads_nothing() {
        let persistent_store = memory_store();

        assert_eq!(persistent_store.load_service_orders(), None);
        assert_eq!(persistent_store.load_schedule_items(), None);
    }

    #[test]
    fn test_save_then_load() {
        let mut persistent_store = memory_store();
        let service_orders = seed::service_orders();

        persistent_store.save_service_orders(&service_orders[1..]);

        assert_eq!(
            persistent_store.load_service_orders(),
            Some(service_orders[1..].to_vec())
        );
        assert!(
            persistent_store
                .storage()
                .read("omni_orders")
                .unwrap()
                .unwrap()
                .starts_with("[{\"id\":\"OS-1002\"")
        );
    }

    #[test]
    fn test_corrupted_entry_loads_nothing() {
        let mut persistent_store = memory_store();
        persistent_store
            .storage_mut()
            .write("omni_schedule", "{not json")
            .unwrap();

        assert_eq!(persistent_store.load_schedule_items(), None);
    }

    #[test]
    fn test_failing_storage_is_not_fatal() {
        let mut persistent_store = PersistentStore::new(FailingStorage, &Persistence::default());

        persistent_store.save_schedule_items(&seed::schedule_items());

        assert_eq!(persistent_store.load_schedule_items(), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let directory = tempfile::tempdir().unwrap();
        let mut file_storage = FileStorage::new(directory.path().join("nested"));

        assert_eq!(file_storage.read("omni_orders").unwrap(), None);
        file_storage.write("omni_orders", "[]").unwrap();

        assert_eq!(file_storage.read("omni_orders").unwrap(), Some("[]".to_string()));
        assert!(directory.path().join("nested/omni_orders.json").is_file());
    }
}
