//! Room persistence: `dormitories/{id}/rooms/{roomId}`

use std::sync::Arc;

use super::guard::DuplicateError;
use super::model::{Room, RoomDraft, RoomUpdate};
use crate::property::{property_path, Property};
use crate::room_type::RoomTypeRepository;
use crate::store::{self, DocumentPath, DocumentStore};
use crate::{Error, Result};

fn rooms_path(property_id: &str) -> DocumentPath {
    property_path(property_id).child("rooms")
}

#[derive(Clone)]
pub struct RoomRepository {
    store: Arc<dyn DocumentStore>,
}

impl RoomRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All rooms of a property, ordered by floor then number
    pub async fn list(&self, property_id: &str) -> Result<Vec<Room>> {
        let mut rooms: Vec<Room> =
            store::query_typed(self.store.as_ref(), &rooms_path(property_id)).await?;
        rooms.sort_by(|a, b| a.floor.cmp(&b.floor).then_with(|| a.number.cmp(&b.number)));
        Ok(rooms)
    }

    pub async fn get(&self, property_id: &str, room_id: &str) -> Result<Option<Room>> {
        let path = rooms_path(property_id).child(room_id);
        store::get_typed(self.store.as_ref(), &path).await
    }

    /// Write one new room with a store-assigned id
    pub async fn create(&self, property_id: &str, number: &str, draft: &RoomDraft) -> Result<Room> {
        let collection = rooms_path(property_id);
        let id = self.store.new_document_id(&collection);
        let room = Room::from_draft(id, property_id, number, draft);
        store::set_typed(self.store.as_ref(), &collection.child(&room.id), &room).await?;
        Ok(room)
    }

    /// Apply an edit-form update and write the result.
    ///
    /// A new room type must exist for the property. A new number, or a move
    /// to occupied, must not clash with another occupied room. Both checks
    /// read a snapshot, so a concurrent edit can still slip past them.
    pub async fn update(
        &self,
        property: &Property,
        room_id: &str,
        update: &RoomUpdate,
    ) -> Result<Room> {
        let room = self
            .get(&property.id, room_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Room {} not found", room_id)))?;

        let updated = update.apply(&room, property)?;

        if updated.room_type_id != room.room_type_id {
            let room_types = RoomTypeRepository::new(Arc::clone(&self.store));
            if room_types.get(&property.id, &updated.room_type_id).await?.is_none() {
                return Err(Error::Validation(format!(
                    "Unknown room type '{}'",
                    updated.room_type_id
                )));
            }
        }

        let number_changed = updated.number != room.number;
        let becomes_occupied = updated.is_occupied() && !room.is_occupied();
        if number_changed || becomes_occupied {
            let clash = self.list(&property.id).await?.into_iter().any(|other| {
                other.id != room.id && other.is_occupied() && other.number == updated.number
            });
            if clash {
                return Err(DuplicateError::Occupied(updated.number).into());
            }
        }

        let path = rooms_path(&property.id).child(room_id);
        store::set_typed(self.store.as_ref(), &path, &updated).await?;
        tracing::info!(property_id = %property.id, room_id, number = %updated.number, "Room updated");
        Ok(updated)
    }
}
