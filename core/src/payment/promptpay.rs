//! PromptPay merchant QR payload
//!
//! Tag-length-value string, each field as two-digit tag, two-digit decimal
//! length, then the value:
//!
//! | tag | value                                   |
//! |-----|-----------------------------------------|
//! | 00  | `01` payload format                     |
//! | 01  | `11` static, reusable QR                |
//! | 29  | account length (2 digits) + account     |
//! | 58  | `TH`                                    |
//! | 53  | `764` (THB)                             |
//! | 54  | amount, only when one is given          |
//! | 63  | CRC-16/CCITT-FALSE, 4 upper-case hex    |

use crate::{Error, Result};

const PAYLOAD_FORMAT: &str = "000201";
const STATIC_INITIATION: &str = "010211";
/// The merchant field header keeps the literal length `37` whatever the
/// account length; existing printed codes depend on it.
const MERCHANT_HEADER: &str = "2937";
const COUNTRY: &str = "5802TH";
const CURRENCY: &str = "5303764";
const CRC_HEADER: &str = "6304";

/// Builder for a PromptPay payload string
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPayPayload {
    account_number: String,
    amount: Option<f64>,
}

impl PromptPayPayload {
    pub fn new(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            amount: None,
        }
    }

    /// Request a fixed amount. Zero means "no amount", as for a static QR.
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Full payload with the computed checksum
    pub fn encode(&self) -> Result<String> {
        let mut payload = self.encode_unchecked()?;
        let crc = crc16_ccitt_false(payload.as_bytes());
        payload.push_str(&format!("{:04X}", crc));
        Ok(payload)
    }

    /// Payload ending in a bare `6304` with no checksum digits.
    ///
    /// Scanners reject this form; it exists to compare against codes that
    /// were generated before the checksum was filled in.
    pub fn encode_unchecked(&self) -> Result<String> {
        let account = &self.account_number;
        if account.is_empty() || !account.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Validation(
                "PromptPay account number must contain digits only".to_string(),
            ));
        }
        if account.len() > 99 {
            return Err(Error::Validation(
                "PromptPay account number is too long".to_string(),
            ));
        }

        let mut payload = String::with_capacity(64);
        payload.push_str(PAYLOAD_FORMAT);
        payload.push_str(STATIC_INITIATION);
        payload.push_str(MERCHANT_HEADER);
        push_length_prefixed(&mut payload, account);
        payload.push_str(COUNTRY);
        payload.push_str(CURRENCY);

        if let Some(amount) = self.amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(Error::Validation(format!("Invalid amount {}", amount)));
            }
            if amount > 0.0 {
                let rendered = amount.to_string();
                if rendered.len() > 99 {
                    return Err(Error::Validation(format!("Amount {} is too long", rendered)));
                }
                payload.push_str("54");
                push_length_prefixed(&mut payload, &rendered);
            }
        }

        payload.push_str(CRC_HEADER);
        Ok(payload)
    }
}

fn push_length_prefixed(out: &mut String, value: &str) {
    out.push_str(&format!("{:02}", value.len()));
    out.push_str(value);
}

/// CRC-16/CCITT-FALSE: poly 0x1021, init 0xFFFF, no reflection, no xor-out
pub fn crc16_ccitt_false(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc_check_value() {
        assert_eq!(crc16_ccitt_false(b"123456789"), 0x29B1);
        assert_eq!(crc16_ccitt_false(b""), 0xFFFF);
    }

    #[test]
    fn test_merchant_field_carries_account_length() {
        let payload = PromptPayPayload::new("0812345678").encode_unchecked().unwrap();
        assert!(payload.contains("2937100812345678"));
    }

    #[test]
    fn test_unchecked_layout() {
        let payload = PromptPayPayload::new("0812345678").encode_unchecked().unwrap();
        assert_eq!(payload, "00020101021129371008123456785802TH53037646304");
    }

    #[test]
    fn test_encode_appends_crc() {
        let payload = PromptPayPayload::new("0812345678").encode().unwrap();
        assert_eq!(payload, "00020101021129371008123456785802TH53037646304B5DB");
    }

    #[test]
    fn test_amount_field() {
        let payload = PromptPayPayload::new("0812345678")
            .with_amount(100.0)
            .encode()
            .unwrap();
        assert_eq!(
            payload,
            "00020101021129371008123456785802TH5303764540310063046994"
        );

        let fractional = PromptPayPayload::new("0812345678")
            .with_amount(250.5)
            .encode_unchecked()
            .unwrap();
        assert!(fractional.ends_with("5405250.56304"));
    }

    #[test]
    fn test_zero_amount_is_omitted() {
        let with_zero = PromptPayPayload::new("0812345678").with_amount(0.0);
        let without = PromptPayPayload::new("0812345678");
        assert_eq!(with_zero.encode().unwrap(), without.encode().unwrap());
    }

    #[test]
    fn test_tax_id_length() {
        let payload = PromptPayPayload::new("1234567890123").encode_unchecked().unwrap();
        assert!(payload.contains("2937131234567890123"));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(PromptPayPayload::new("").encode().is_err());
        assert!(PromptPayPayload::new("08-1234").encode().is_err());
        assert!(PromptPayPayload::new("0812345678")
            .with_amount(-1.0)
            .encode()
            .is_err());
        assert!(PromptPayPayload::new("0812345678")
            .with_amount(f64::NAN)
            .encode()
            .is_err());
    }

    #[test]
    fn test_checksum_verifies() {
        let payload = PromptPayPayload::new("1234567890123")
            .with_amount(42.0)
            .encode()
            .unwrap();
        let (body, crc) = payload.split_at(payload.len() - 4);
        assert_eq!(format!("{:04X}", crc16_ccitt_false(body.as_bytes())), crc);
    }
}
