//! Room module
//!
//! Room records, the range expression parser used by the add-room form,
//! the duplicate guard and the sequential batch provisioner.

mod guard;
mod model;
mod provision;
mod range;
mod repository;

pub use guard::{check_duplicates, DuplicateError};
pub use model::*;
pub use provision::{
    Progress, ProvisionFailure, ProvisionPlan, ProvisionReport, ProvisionRequest, Provisioner,
    DEFAULT_CREATE_TIMEOUT,
};
pub use range::{parse_room_numbers, MAX_RANGE_SPAN};
pub use repository::RoomRepository;
