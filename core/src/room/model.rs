//! Room model definitions

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::property::Property;
use crate::{Error, Result};

/// Occupancy state of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
}

/// Fields shared by every room created from one provisioning request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDraft {
    pub floor: u32,
    pub room_type_id: String,
    pub status: RoomStatus,
    pub initial_meter_reading: f64,
    pub additional_service_ids: BTreeSet<String>,
}

/// A rentable room inside a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub property_id: String,
    /// Zero-padded label such as `"101"` or `"005"`
    pub number: String,
    pub floor: u32,
    pub room_type_id: String,
    pub status: RoomStatus,
    pub initial_meter_reading: f64,
    #[serde(default)]
    pub additional_service_ids: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn from_draft(
        id: impl Into<String>,
        property_id: impl Into<String>,
        number: impl Into<String>,
        draft: &RoomDraft,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            property_id: property_id.into(),
            number: number.into(),
            floor: draft.floor,
            room_type_id: draft.room_type_id.clone(),
            status: draft.status,
            initial_meter_reading: draft.initial_meter_reading,
            additional_service_ids: draft.additional_service_ids.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.status == RoomStatus::Occupied
    }
}

/// Edit-form changes for one room; `None` leaves a field untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub floor: Option<u32>,
    #[serde(default)]
    pub room_type_id: Option<String>,
    #[serde(default)]
    pub status: Option<RoomStatus>,
    #[serde(default)]
    pub additional_service_ids: Option<BTreeSet<String>>,
}

impl RoomUpdate {
    /// Produce the edited room, leaving `room` untouched on error
    pub fn apply(&self, room: &Room, property: &Property) -> Result<Room> {
        let mut next = room.clone();

        if let Some(number) = &self.number {
            let number = number.trim();
            if number.is_empty() {
                return Err(Error::Validation("Room number cannot be empty".to_string()));
            }
            next.number = number.to_string();
        }

        if let Some(room_type_id) = &self.room_type_id {
            if room_type_id.trim().is_empty() {
                return Err(Error::Validation("Room type is required".to_string()));
            }
            next.room_type_id = room_type_id.clone();
        }

        if let Some(floor) = self.floor {
            if !property.has_floor(floor) {
                return Err(Error::Validation(format!(
                    "Floor {} is outside 1..={}",
                    floor, property.total_floors
                )));
            }
            next.floor = floor;
        }

        if let Some(status) = self.status {
            next.status = status;
        }

        if let Some(services) = &self.additional_service_ids {
            if let Some(unknown) = services.iter().find(|id| !property.config.has_fee(id)) {
                return Err(Error::Validation(format!("Unknown additional service '{}'", unknown)));
            }
            next.additional_service_ids = services.clone();
        }

        next.updated_at = Utc::now();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RoomDraft {
        RoomDraft {
            floor: 1,
            room_type_id: "fan".to_string(),
            status: RoomStatus::Available,
            initial_meter_reading: 0.0,
            additional_service_ids: BTreeSet::new(),
        }
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&RoomStatus::Maintenance).unwrap();
        assert_eq!(json, "\"maintenance\"");
    }

    #[test]
    fn test_room_serializes_camel_case() {
        let room = Room::from_draft("r1", "d1", "101", &draft());
        let value = serde_json::to_value(&room).unwrap();
        assert_eq!(value["propertyId"], "d1");
        assert_eq!(value["roomTypeId"], "fan");
        assert_eq!(value["status"], "available");
    }

    #[test]
    fn test_update_trims_number() {
        let property = Property::new("d1", "Sunrise", 3);
        let room = Room::from_draft("r1", "d1", "101", &draft());
        let update = RoomUpdate {
            number: Some(" 102 ".to_string()),
            status: Some(RoomStatus::Occupied),
            ..Default::default()
        };

        let edited = update.apply(&room, &property).unwrap();
        assert_eq!(edited.number, "102");
        assert!(edited.is_occupied());
        assert_eq!(room.number, "101");
    }

    #[test]
    fn test_update_rejects_blank_fields() {
        let property = Property::new("d1", "Sunrise", 3);
        let room = Room::from_draft("r1", "d1", "101", &draft());

        let blank_number = RoomUpdate {
            number: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank_number.apply(&room, &property).is_err());

        let blank_type = RoomUpdate {
            room_type_id: Some(String::new()),
            ..Default::default()
        };
        assert!(blank_type.apply(&room, &property).is_err());
    }

    #[test]
    fn test_update_rejects_missing_floor() {
        let property = Property::new("d1", "Sunrise", 3);
        let room = Room::from_draft("r1", "d1", "101", &draft());
        let update = RoomUpdate {
            floor: Some(4),
            ..Default::default()
        };
        assert!(update.apply(&room, &property).unwrap_err().is_validation());
    }
}
