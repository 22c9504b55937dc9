//! Room type persistence: `dormitories/{id}/roomTypes/{typeId}`

use std::sync::Arc;

use super::model::RoomType;
use crate::property::property_path;
use crate::store::{self, DocumentPath, DocumentStore};
use crate::{Error, Result};

fn room_types_path(property_id: &str) -> DocumentPath {
    property_path(property_id).child("roomTypes")
}

#[derive(Clone)]
pub struct RoomTypeRepository {
    store: Arc<dyn DocumentStore>,
}

impl RoomTypeRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, property_id: &str) -> Result<Vec<RoomType>> {
        store::query_typed(self.store.as_ref(), &room_types_path(property_id)).await
    }

    pub async fn get(&self, property_id: &str, type_id: &str) -> Result<Option<RoomType>> {
        let path = room_types_path(property_id).child(type_id);
        store::get_typed(self.store.as_ref(), &path).await
    }

    /// Store a new room type. An empty id is replaced by a store-assigned one.
    pub async fn create(&self, property_id: &str, mut room_type: RoomType) -> Result<RoomType> {
        room_type.validate()?;
        let collection = room_types_path(property_id);
        if room_type.id.trim().is_empty() {
            room_type.id = self.store.new_document_id(&collection);
        } else if self.get(property_id, &room_type.id).await?.is_some() {
            return Err(Error::Validation(format!(
                "Room type {} already exists",
                room_type.id
            )));
        }
        store::set_typed(self.store.as_ref(), &collection.child(&room_type.id), &room_type)
            .await?;
        tracing::info!(property_id, room_type_id = %room_type.id, "Room type created");
        Ok(room_type)
    }

    pub async fn update(&self, property_id: &str, room_type: RoomType) -> Result<RoomType> {
        room_type.validate()?;
        if self.get(property_id, &room_type.id).await?.is_none() {
            return Err(Error::NotFound(format!("Room type {} not found", room_type.id)));
        }
        let path = room_types_path(property_id).child(&room_type.id);
        store::set_typed(self.store.as_ref(), &path, &room_type).await?;
        Ok(room_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;

    fn repo() -> RoomTypeRepository {
        RoomTypeRepository::new(Arc::new(MemoryDocumentStore::new()))
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = repo();
        let created = repo
            .create("d1", RoomType::new("", "Fan", 3000.0))
            .await
            .unwrap();
        assert!(!created.id.is_empty());

        let listed = repo.list("d1").await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_create_duplicate_id_rejected() {
        let repo = repo();
        repo.create("d1", RoomType::new("fan", "Fan", 3000.0)).await.unwrap();
        let err = repo
            .create("d1", RoomType::new("fan", "Fan 2", 3100.0))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = repo();
        let result = repo.update("d1", RoomType::new("x", "X", 1.0)).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_scoped_by_property() {
        let repo = repo();
        repo.create("d1", RoomType::new("fan", "Fan", 3000.0)).await.unwrap();
        assert!(repo.list("d2").await.unwrap().is_empty());
    }
}
