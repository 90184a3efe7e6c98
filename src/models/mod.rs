//! Data model for the places pipeline and its persistence boundary

pub mod place;

pub use place::{Category, Coordinates, Place, RawRecord};
