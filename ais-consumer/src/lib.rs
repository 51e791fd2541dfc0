#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Implements a binary that continuously consumes the aisstream.io ais feed,
//! classifies each message as vessel static data or a position report and
//! persists the resulting records to our postgres database.

pub mod aisstream;
pub mod consumer;
pub mod error;
pub mod models;
pub mod settings;
pub mod startup;
