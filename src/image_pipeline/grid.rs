//! Sample grids and the format-independent decoded image.

mod decoded;
mod types;

#[cfg(test)]
mod tests;

pub use decoded::{Channel, DecodedImage, Plane, PlaneLayout};
pub use types::{Grid, sample_count};
