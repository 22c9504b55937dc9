//! Payment profile model definitions

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// PromptPay receiving account for one property.
///
/// Field edits go through the `with_*` methods, each of which returns a
/// new profile, so a form holds one value and swaps it on every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProfile {
    pub account_name: String,
    /// Phone number (10 digits) or tax id (13 digits)
    pub account_number: String,
    #[serde(default)]
    pub is_active: bool,
    pub property_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code_url: Option<String>,
}

impl PaymentProfile {
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            ..Default::default()
        }
    }

    pub fn with_account_name(self, account_name: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            ..self
        }
    }

    pub fn with_account_number(self, account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            ..self
        }
    }

    pub fn with_active(self, is_active: bool) -> Self {
        Self { is_active, ..self }
    }

    pub fn with_property_id(self, property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.property_id.trim().is_empty() {
            return Err(Error::Validation("Select a property first".to_string()));
        }
        if self.account_name.trim().is_empty() {
            return Err(Error::Validation("Account name is required".to_string()));
        }
        if !is_valid_account_number(&self.account_number) {
            return Err(Error::Validation(
                "Account number must be a 10-digit phone number or a 13-digit tax id".to_string(),
            ));
        }
        Ok(())
    }
}

/// 10 digits (phone) or 13 digits (tax id), nothing else
pub fn is_valid_account_number(raw: &str) -> bool {
    matches!(raw.len(), 10 | 13) && raw.bytes().all(|b| b.is_ascii_digit())
}
