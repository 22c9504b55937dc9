//! Core library for the dormitory admin service
//!
//! This crate contains the domain logic, including:
//! - The document store capability and its implementations
//! - Properties, room types and rooms
//! - Batch room provisioning from range expressions
//! - PromptPay payment profiles and QR payloads

pub mod error;
pub mod payment;
pub mod property;
pub mod room;
pub mod room_type;
pub mod store;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
