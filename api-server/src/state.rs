//! Application state

use std::sync::Arc;
use std::time::Duration;

use dorm_core::payment::PaymentRepository;
use dorm_core::property::PropertyRepository;
use dorm_core::room::{Provisioner, RoomRepository};
use dorm_core::room_type::RoomTypeRepository;
use dorm_core::store::{DocumentStore, FileDocumentStore};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    properties: PropertyRepository,
    room_types: RoomTypeRepository,
    rooms: RoomRepository,
    payments: PaymentRepository,
    provisioner: Provisioner,
}

impl AppState {
    /// Open the file-backed store under the configured data directory
    pub async fn new(config: &Config) -> dorm_core::Result<Self> {
        let store = FileDocumentStore::new(config.documents_path()).await?;
        Ok(Self::with_store(Arc::new(store), config.store_timeout))
    }

    /// Build state over any document store
    pub fn with_store(store: Arc<dyn DocumentStore>, store_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                properties: PropertyRepository::new(Arc::clone(&store)),
                room_types: RoomTypeRepository::new(Arc::clone(&store)),
                rooms: RoomRepository::new(Arc::clone(&store)),
                payments: PaymentRepository::new(Arc::clone(&store)),
                provisioner: Provisioner::new(store).with_timeout(store_timeout),
            }),
        }
    }

    pub fn properties(&self) -> &PropertyRepository {
        &self.inner.properties
    }

    pub fn room_types(&self) -> &RoomTypeRepository {
        &self.inner.room_types
    }

    pub fn rooms(&self) -> &RoomRepository {
        &self.inner.rooms
    }

    pub fn payments(&self) -> &PaymentRepository {
        &self.inner.payments
    }

    pub fn provisioner(&self) -> &Provisioner {
        &self.inner.provisioner
    }
}
