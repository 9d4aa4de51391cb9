//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod admin_session;
pub mod admin_user;
pub mod deletion;
pub mod history;
pub mod image;
pub mod inquiry;
pub mod press;
pub mod product;
pub mod settings;
pub mod story;
pub mod tag;

pub use deletion::DeletionState;
