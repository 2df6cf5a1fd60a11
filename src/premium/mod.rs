//! Add-on instruments scored from their own item sets.

pub mod career;
pub mod relationship;

pub use career::{score_career, CareerResult};
pub use relationship::{score_relationship, RelationshipResult};
