//! HTTP handlers for the to-do CRUD surface.

pub mod todo;
pub use todo::*;
