//! Room type module

mod model;
mod repository;

pub use model::*;
pub use repository::RoomTypeRepository;
