//! Property module
//!
//! A property is the dormitory building, the tenancy scope for rooms,
//! room types and payment settings.

mod model;
mod repository;

pub use model::*;
pub use repository::{property_path, PropertyRepository};
