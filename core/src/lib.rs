//! Ordered route storage with validated JSON persistence.
//!
//! [`store`] owns the in-memory collection and its invariants, [`codec`]
//! moves it to and from disk. Neither logs; failures are returned as
//! [`Error`] and reporting is left to the caller.

pub mod codec;
pub mod error;
pub mod store;

pub use error::{Error, Result};
pub use store::RouteStore;
