//! Raster I/O: clipping DSM elevation windows under polygon envelopes.

pub mod dsm;

pub use dsm::DsmReader;
