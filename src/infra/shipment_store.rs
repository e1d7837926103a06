//! Shipment persistence.
//!
//! The admin surface talks to a [`ShipmentStore`]; the desktop build keeps shipments in a
//! JSON file in the local data directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use thiserror::Error;
use uuid::Uuid;

use crate::domain::shipment::sort_newest_first;
use crate::domain::{Shipment, ShipmentFields};

const STORE_FILENAME: &str = "shipments.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("shipment {0} not found")]
    NotFound(Uuid),
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("corrupt shipment file: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait ShipmentStore {
    /// All shipments, newest first.
    fn list(&self) -> Result<Vec<Shipment>, StoreError>;
    fn get(&self, id: Uuid) -> Result<Shipment, StoreError>;
    /// Case-insensitive match on the trimmed tracking number.
    fn find_by_tracking_number(&self, tracking_number: &str)
        -> Result<Option<Shipment>, StoreError>;
    fn create(&self, fields: ShipmentFields) -> Result<Shipment, StoreError>;
    fn update(&self, id: Uuid, fields: ShipmentFields) -> Result<Shipment, StoreError>;
    fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[derive(Clone, Debug)]
pub struct JsonShipmentStore {
    path: PathBuf,
}

impl JsonShipmentStore {
    /// Store under the platform data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = crate::util::persistence::data_dir().ok_or(StoreError::StorageUnavailable)?;
        Ok(Self::at(dir.join(STORE_FILENAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Shipment>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, shipments: &[Shipment]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(shipments)?;
        fs::write(&self.path, content)?;
        tracing::debug!(
            count = shipments.len(),
            path = %self.path.display(),
            "saved shipments"
        );
        Ok(())
    }
}

impl ShipmentStore for JsonShipmentStore {
    fn list(&self) -> Result<Vec<Shipment>, StoreError> {
        let mut shipments = self.load()?;
        sort_newest_first(&mut shipments);
        Ok(shipments)
    }

    fn get(&self, id: Uuid) -> Result<Shipment, StoreError> {
        self.load()?
            .into_iter()
            .find(|shipment| shipment.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn find_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> Result<Option<Shipment>, StoreError> {
        let needle = tracking_number.trim();
        if needle.is_empty() {
            return Ok(None);
        }
        Ok(self
            .load()?
            .into_iter()
            .find(|shipment| shipment.tracking_number.eq_ignore_ascii_case(needle)))
    }

    fn create(&self, fields: ShipmentFields) -> Result<Shipment, StoreError> {
        let mut shipments = self.load()?;
        let shipment = Shipment::new(fields, SystemTime::now(), &shipments);
        shipments.push(shipment.clone());
        self.save(&shipments)?;
        tracing::info!(tracking_number = %shipment.tracking_number, "created shipment");
        Ok(shipment)
    }

    fn update(&self, id: Uuid, fields: ShipmentFields) -> Result<Shipment, StoreError> {
        let mut shipments = self.load()?;
        let shipment = shipments
            .iter_mut()
            .find(|shipment| shipment.id == id)
            .ok_or(StoreError::NotFound(id))?;
        shipment.fields = fields;
        let updated = shipment.clone();
        self.save(&shipments)?;
        tracing::info!(tracking_number = %updated.tracking_number, "updated shipment");
        Ok(updated)
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut shipments = self.load()?;
        let before = shipments.len();
        shipments.retain(|shipment| shipment.id != id);
        if shipments.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.save(&shipments)?;
        tracing::info!(%id, "deleted shipment");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShipmentStatus;
    use pretty_assertions::assert_eq;

    struct TempStore {
        store: JsonShipmentStore,
    }

    impl TempStore {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("logistics-desk-{}", Uuid::new_v4()));
            Self {
                store: JsonShipmentStore::at(dir.join(STORE_FILENAME)),
            }
        }
    }

    impl Drop for TempStore {
        fn drop(&mut self) {
            if let Some(dir) = self.store.path().parent() {
                let _ = fs::remove_dir_all(dir);
            }
        }
    }

    fn fields(name: &str) -> ShipmentFields {
        ShipmentFields {
            customer_name: name.into(),
            customer_email: "ops@example.com".into(),
            customer_phone: Some("+977 1 0000000".into()),
            origin: "Shanghai, China".into(),
            destination: "Kathmandu, Nepal".into(),
            status: ShipmentStatus::Pending,
            weight_kg: 120.0,
            estimated_delivery: "2024-03-15".into(),
        }
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let temp = TempStore::new();
        assert!(temp.store.list().unwrap().is_empty());
    }

    #[test]
    fn create_then_find_by_tracking_number() {
        let temp = TempStore::new();
        let created = temp.store.create(fields("Sita")).unwrap();
        assert!(created.tracking_number.starts_with("TRK"));

        let query = format!("  {}  ", created.tracking_number.to_lowercase());
        let found = temp.store.find_by_tracking_number(&query).unwrap();
        assert_eq!(found, Some(created.clone()));
        assert_eq!(temp.store.get(created.id).unwrap(), created);
        assert_eq!(temp.store.find_by_tracking_number("   ").unwrap(), None);
        assert_eq!(temp.store.find_by_tracking_number("TRK0").unwrap(), None);
    }

    #[test]
    fn update_keeps_identity() {
        let temp = TempStore::new();
        let created = temp.store.create(fields("Sita")).unwrap();

        let mut changed = fields("Sita");
        changed.status = ShipmentStatus::Customs;
        let updated = temp.store.update(created.id, changed.clone()).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.tracking_number, created.tracking_number);
        assert_eq!(updated.fields, changed);
        assert_eq!(temp.store.list().unwrap(), vec![updated]);
    }

    #[test]
    fn delete_removes_only_the_target() {
        let temp = TempStore::new();
        let first = temp.store.create(fields("Sita")).unwrap();
        let second = temp.store.create(fields("Ram")).unwrap();

        temp.store.delete(first.id).unwrap();
        let remaining: Vec<_> = temp.store.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(remaining, vec![second.id]);

        assert!(matches!(
            temp.store.delete(first.id),
            Err(StoreError::NotFound(id)) if id == first.id
        ));
        assert!(matches!(
            temp.store.update(first.id, fields("Sita")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn rapid_creates_get_distinct_tracking_numbers() {
        let temp = TempStore::new();
        let created: Vec<_> = (0..20)
            .map(|idx| temp.store.create(fields(&format!("Customer {idx}"))).unwrap())
            .collect();

        let mut numbers: Vec<_> = created.iter().map(|s| s.tracking_number.clone()).collect();
        numbers.sort();
        numbers.dedup();
        assert_eq!(numbers.len(), created.len());

        for shipment in &created {
            let found = temp
                .store
                .find_by_tracking_number(&shipment.tracking_number)
                .unwrap()
                .unwrap();
            assert_eq!(found.id, shipment.id);
        }
    }

    #[test]
    fn corrupt_file_is_reported() {
        let temp = TempStore::new();
        if let Some(dir) = temp.store.path().parent() {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(temp.store.path(), "not json").unwrap();
        assert!(matches!(temp.store.list(), Err(StoreError::Serde(_))));
    }
}
