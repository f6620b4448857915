pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::transformer::{Transformed, transform, try_transform};
pub use domain::geo::haversine_distance;
pub use domain::record::Outcome;
