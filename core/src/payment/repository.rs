//! Payment profile persistence: `dormitories/{id}/settings/promptpay`

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::PaymentProfile;
use super::promptpay::PromptPayPayload;
use crate::property::property_path;
use crate::store::{self, DocumentPath, DocumentStore};
use crate::{Error, Result};

fn promptpay_path(property_id: &str) -> DocumentPath {
    property_path(property_id).child("settings").child("promptpay")
}

/// Stored form of a profile, stamped on every save
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProfile {
    #[serde(flatten)]
    profile: PaymentProfile,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct PaymentRepository {
    store: Arc<dyn DocumentStore>,
}

impl PaymentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The property's profile, `None` if it was never configured
    pub async fn load(&self, property_id: &str) -> Result<Option<PaymentProfile>> {
        let stored: Option<StoredProfile> =
            store::get_typed(self.store.as_ref(), &promptpay_path(property_id)).await?;
        Ok(stored.map(|s| s.profile))
    }

    /// Validate and write a profile, overwriting any previous one
    pub async fn save(&self, profile: PaymentProfile) -> Result<PaymentProfile> {
        profile.validate()?;
        let path = promptpay_path(&profile.property_id);
        let stored = StoredProfile {
            profile,
            updated_at: Some(Utc::now()),
        };
        store::set_typed(self.store.as_ref(), &path, &stored).await?;
        tracing::info!(
            property_id = %stored.profile.property_id,
            active = stored.profile.is_active,
            "PromptPay settings saved"
        );
        Ok(stored.profile)
    }

    /// Checksummed QR payload for the property's account
    pub async fn qr_payload(&self, property_id: &str, amount: Option<f64>) -> Result<String> {
        let profile = self.load(property_id).await?.ok_or_else(|| {
            Error::NotFound(format!("No PromptPay settings for property {}", property_id))
        })?;

        let mut payload = PromptPayPayload::new(profile.account_number);
        if let Some(amount) = amount {
            payload = payload.with_amount(amount);
        }
        payload.encode()
    }
}
