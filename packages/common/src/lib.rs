pub mod property;

pub use property::{Property, round_to_cents};
