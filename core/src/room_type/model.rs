//! Room type model definitions

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A rentable layout with its monthly base price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub id: String,
    pub name: String,
    pub base_price: f64,
    #[serde(default)]
    pub is_default: bool,
}

impl RoomType {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_price,
            is_default: false,
        }
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Room type name cannot be empty".to_string()));
        }
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(Error::Validation(
                "Base price must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Type pre-selected in the add-room form.
///
/// The first type flagged default wins; with none flagged, the first type.
/// More than one default flag is tolerated.
pub fn default_room_type(types: &[RoomType]) -> Option<&RoomType> {
    types.iter().find(|t| t.is_default).or_else(|| types.first())
}
