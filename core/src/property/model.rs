//! Property model definitions

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Optional add-on fee offered when provisioning a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
}

/// Per-property configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyConfig {
    #[serde(default)]
    pub additional_fees: Vec<FeeItem>,
    /// Meter value pre-filled into new rooms
    #[serde(default)]
    pub initial_meter_reading: f64,
}

impl PropertyConfig {
    pub fn has_fee(&self, fee_id: &str) -> bool {
        self.additional_fees.iter().any(|fee| fee.id == fee_id)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for fee in &self.additional_fees {
            if fee.id.trim().is_empty() || fee.name.trim().is_empty() {
                return Err(Error::Validation("Fee items need an id and a name".to_string()));
            }
            if !fee.amount.is_finite() || fee.amount < 0.0 {
                return Err(Error::Validation(format!(
                    "Fee '{}' must have a non-negative amount",
                    fee.name
                )));
            }
            if !seen.insert(fee.id.as_str()) {
                return Err(Error::Validation(format!("Duplicate fee id '{}'", fee.id)));
            }
        }
        if !self.initial_meter_reading.is_finite() || self.initial_meter_reading < 0.0 {
            return Err(Error::Validation(
                "Initial meter reading must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

/// A managed dormitory building
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    pub total_floors: u32,
    #[serde(default)]
    pub config: PropertyConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn new(id: impl Into<String>, name: impl Into<String>, total_floors: u32) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            total_floors,
            config: PropertyConfig::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_config(mut self, config: PropertyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Property name cannot be empty".to_string()));
        }
        if self.total_floors == 0 {
            return Err(Error::Validation(
                "A property needs at least one floor".to_string(),
            ));
        }
        self.config.validate()
    }

    /// Whether `floor` exists in this building
    pub fn has_floor(&self, floor: u32) -> bool {
        (1..=self.total_floors).contains(&floor)
    }
}
