#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Postgres implementation of the ais consumer's storage port.

mod adapter;
mod error;
mod settings;

pub use adapter::*;
pub use error::*;
pub use settings::*;
