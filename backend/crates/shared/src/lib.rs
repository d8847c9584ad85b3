//! Shared Kernel
//!
//! Vocabulary every forum crate agrees on:
//! - [`error::app_error::AppError`], the client-facing error shape
//! - [`error::kind::ErrorKind`], its HTTP classification
//! - [`id::Id`], UUID-backed typed identifiers
//!
//! Anything with auth or forum semantics lives in the crates that own it.

pub mod error {
    pub mod app_error;
    pub mod kind;
    pub mod problem;
}
pub mod id;
