pub mod geo;
pub mod ports;
pub mod record;
