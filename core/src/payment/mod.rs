//! Payment module
//!
//! Per-property PromptPay settings and the QR payload derived from them.

mod model;
mod promptpay;
mod repository;

pub use model::*;
pub use promptpay::{crc16_ccitt_false, PromptPayPayload};
pub use repository::PaymentRepository;
