//! Domain models shared by the engines and the HTTP layer

pub mod venue;

pub use venue::{Coordinate, Venue, Yen};
