//! Session-wide state: entity registries and the member roster.

mod error;
pub use error::StoreError;

pub mod registry;
pub mod roster;

pub use registry::{DocumentRegistry, QuestionRegistry, Registry};
pub use roster::Roster;
