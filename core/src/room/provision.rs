//! Batch room provisioning
//!
//! One request expands into many rooms. Rooms are written one at a time,
//! each as an independent store call; there is no rollback, so a partial
//! failure leaves the rooms that did succeed in place and the report lists
//! which ones failed and why.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::guard::check_duplicates;
use super::model::{Room, RoomDraft, RoomStatus};
use super::range::parse_room_numbers;
use super::repository::RoomRepository;
use crate::property::{Property, PropertyRepository};
use crate::room_type::{RoomType, RoomTypeRepository};
use crate::store::DocumentStore;
use crate::{Error, Result};

/// Default bound on a single create call
pub const DEFAULT_CREATE_TIMEOUT: Duration = Duration::from_secs(30);

/// The add-room form as submitted
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequest {
    /// Range expression, e.g. `101-105, 201`
    pub numbers: String,
    pub floor: u32,
    pub room_type_id: String,
    #[serde(default)]
    pub status: RoomStatus,
    /// Falls back to the property's configured reading when absent
    #[serde(default)]
    pub initial_meter_reading: Option<f64>,
    #[serde(default)]
    pub additional_service_ids: BTreeSet<String>,
}

/// A validated batch, ready to write
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionPlan {
    pub property_id: String,
    pub labels: Vec<String>,
    pub draft: RoomDraft,
}

impl ProvisionRequest {
    /// Validate the form against a property and a snapshot of its rooms.
    ///
    /// Nothing is written; every error here is a validation error.
    pub fn plan(
        &self,
        property: &Property,
        room_types: &[RoomType],
        snapshot: &[Room],
    ) -> Result<ProvisionPlan> {
        if self.numbers.trim().is_empty() || self.room_type_id.trim().is_empty() {
            return Err(Error::Validation(
                "Room numbers and room type are required".to_string(),
            ));
        }
        if room_types.is_empty() {
            return Err(Error::Validation(
                "Add a room type before creating rooms".to_string(),
            ));
        }
        if !room_types.iter().any(|t| t.id == self.room_type_id) {
            return Err(Error::Validation(format!(
                "Unknown room type '{}'",
                self.room_type_id
            )));
        }
        if !property.has_floor(self.floor) {
            return Err(Error::Validation(format!(
                "Floor {} is outside 1..={}",
                self.floor, property.total_floors
            )));
        }
        let initial_meter_reading = self
            .initial_meter_reading
            .unwrap_or(property.config.initial_meter_reading);
        if !initial_meter_reading.is_finite() || initial_meter_reading < 0.0 {
            return Err(Error::Validation(
                "Initial meter reading must be a non-negative number".to_string(),
            ));
        }
        if let Some(unknown) = self
            .additional_service_ids
            .iter()
            .find(|id| !property.config.has_fee(id))
        {
            return Err(Error::Validation(format!(
                "Unknown additional service '{}'",
                unknown
            )));
        }

        let labels = parse_room_numbers(&self.numbers);
        if labels.is_empty() {
            return Err(Error::Validation(format!(
                "No valid room numbers in '{}'",
                self.numbers.trim()
            )));
        }
        check_duplicates(&labels, snapshot)?;

        Ok(ProvisionPlan {
            property_id: property.id.clone(),
            labels,
            draft: RoomDraft {
                floor: self.floor,
                room_type_id: self.room_type_id.clone(),
                status: self.status,
                initial_meter_reading,
                additional_service_ids: self.additional_service_ids.clone(),
            },
        })
    }
}

/// Completed creates out of the batch size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionFailure {
    pub number: String,
    pub reason: String,
}

/// Outcome of a batch
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionReport {
    pub total: usize,
    pub created: Vec<Room>,
    pub failures: Vec<ProvisionFailure>,
    /// Labels never attempted because the batch was cancelled
    pub skipped: Vec<String>,
    pub cancelled: bool,
}

impl ProvisionReport {
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }

    /// The record handed back to the caller; only set when every room was created
    pub fn first_created(&self) -> Option<&Room> {
        if self.is_success() {
            self.created.first()
        } else {
            None
        }
    }
}

/// Runs provisioning requests against the document store
#[derive(Clone)]
pub struct Provisioner {
    properties: PropertyRepository,
    room_types: RoomTypeRepository,
    rooms: RoomRepository,
    create_timeout: Duration,
}

impl Provisioner {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            properties: PropertyRepository::new(Arc::clone(&store)),
            room_types: RoomTypeRepository::new(Arc::clone(&store)),
            rooms: RoomRepository::new(store),
            create_timeout: DEFAULT_CREATE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, create_timeout: Duration) -> Self {
        self.create_timeout = create_timeout;
        self
    }

    /// Load the property, its room types and a room snapshot, then plan
    pub async fn prepare(&self, property_id: &str, request: &ProvisionRequest) -> Result<ProvisionPlan> {
        let property = self.properties.require(property_id).await?;
        let room_types = self.room_types.list(property_id).await?;
        let snapshot = self.rooms.list(property_id).await?;
        request.plan(&property, &room_types, &snapshot)
    }

    /// Write every room of `plan` in order.
    ///
    /// `progress` is updated after each create, successful or not. `cancel`
    /// is checked before each create; a create already in flight runs to
    /// completion.
    pub async fn run(
        &self,
        plan: &ProvisionPlan,
        progress: &watch::Sender<Progress>,
        cancel: &CancellationToken,
    ) -> ProvisionReport {
        let total = plan.labels.len();
        let mut report = ProvisionReport {
            total,
            ..Default::default()
        };
        progress.send_replace(Progress { current: 0, total });
        tracing::info!(property_id = %plan.property_id, total, "Provisioning rooms");

        for (index, number) in plan.labels.iter().enumerate() {
            if cancel.is_cancelled() {
                report.cancelled = true;
                report.skipped = plan.labels[index..].to_vec();
                tracing::warn!(
                    property_id = %plan.property_id,
                    skipped = report.skipped.len(),
                    "Provisioning cancelled"
                );
                break;
            }

            let create = self.rooms.create(&plan.property_id, number, &plan.draft);
            match tokio::time::timeout(self.create_timeout, create).await {
                Ok(Ok(room)) => {
                    tracing::debug!(property_id = %plan.property_id, number = %room.number, room_id = %room.id, "Room created");
                    report.created.push(room);
                }
                Ok(Err(e)) => {
                    tracing::warn!(property_id = %plan.property_id, number = %number, error = %e, "Room create failed");
                    report.failures.push(ProvisionFailure {
                        number: number.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(_) => {
                    let e = Error::Timeout(self.create_timeout);
                    tracing::error!(property_id = %plan.property_id, number = %number, error = %e, "Room create timed out");
                    report.failures.push(ProvisionFailure {
                        number: number.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            progress.send_replace(Progress {
                current: index + 1,
                total,
            });
        }

        if report.failures.is_empty() && !report.cancelled {
            tracing::info!(property_id = %plan.property_id, created = report.created.len(), "Provisioning finished");
        } else {
            tracing::warn!(
                property_id = %plan.property_id,
                created = report.created.len(),
                failed = report.failed_count(),
                "Provisioning finished with failures"
            );
        }
        report
    }
}
