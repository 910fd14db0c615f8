//! The brief data model.
//!
//! - [`types`]: [`BriefData`] and its section records
//! - [`schema`]: shape validation and normalization of untrusted JSON
//! - [`io`]: JSON import / export files

#[cfg(test)]
pub(crate) mod arbitrary;
pub mod io;
pub mod schema;
pub mod types;

pub use schema::{validate, FieldIssue, ValidationError};
pub use types::{
    Assets, Audience, Brand, BriefData, Context, Copywriting, Deliverables, General, Message,
    Notes, Objective, Platform, Priority, Validation, Visual, YesNo,
};
