//! Model → entity mappers
//!
//! The banner tables do not store their kind, so conversion takes it from
//! the repository that read the row.

mod banner;
