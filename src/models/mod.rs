//! Tourism data models
//!
//! This module defines the record collections consumed from the
//! data-loading collaborator and the immutable store that holds them.

pub mod record;
pub mod store;

pub use record::*;
pub use store::*;
