pub mod api;
pub mod filter;

pub use api::{ApiClient, ApiError};
pub use filter::{FilterState, ListingSet};
