//! Property persistence on top of the document store

use std::sync::Arc;

use chrono::Utc;

use super::model::Property;
use crate::store::{self, DocumentPath, DocumentStore};
use crate::{Error, Result};

const PROPERTIES: &str = "dormitories";

/// Document path of a property: `dormitories/{id}`
pub fn property_path(property_id: &str) -> DocumentPath {
    DocumentPath::new(PROPERTIES).child(property_id)
}

/// Reads and writes property documents
#[derive(Clone)]
pub struct PropertyRepository {
    store: Arc<dyn DocumentStore>,
}

impl PropertyRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Property>> {
        store::get_typed(self.store.as_ref(), &property_path(id)).await
    }

    /// Get a property or fail with `NotFound`
    pub async fn require(&self, id: &str) -> Result<Property> {
        self.get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Property {} not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<Property>> {
        store::query_typed(self.store.as_ref(), &DocumentPath::new(PROPERTIES)).await
    }

    /// Validate and write a property, refreshing `updated_at`
    pub async fn save(&self, mut property: Property) -> Result<Property> {
        property.validate()?;
        property.updated_at = Utc::now();
        store::set_typed(self.store.as_ref(), &property_path(&property.id), &property).await?;
        tracing::info!(property_id = %property.id, "Property saved");
        Ok(property)
    }

    /// Meter value new rooms start from, 0 when the property is unknown
    pub async fn initial_meter_reading(&self, id: &str) -> Result<f64> {
        Ok(self
            .get(id)
            .await?
            .map(|p| p.config.initial_meter_reading)
            .unwrap_or(0.0))
    }
}
