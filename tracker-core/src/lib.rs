#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Domain types shared between the ais stream consumer and its storage
//! backends.

mod ais;
mod error;
mod ports;
mod registry;

pub use ais::*;
pub use error::*;
pub use ports::*;
pub use registry::*;
