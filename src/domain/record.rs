use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Content type records are expected to carry. Informational only; never enforced.
pub const EXPECTED_CONTENT_TYPE: &str = "application/json";

pub const FIELD_DATA: &str = "data";
pub const FIELD_BASE_PRICE: &str = "prix_base_per_km";
pub const FIELD_COMFORT: &str = "confort";
pub const FIELD_CLIENT: &str = "properties-client";
pub const FIELD_DRIVER: &str = "properties-driver";
pub const FIELD_LATITUDE: &str = "latitude";
pub const FIELD_LONGITUDE: &str = "longitude";

/// Routing decision attached to a processed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => f.write_str("success"),
            Outcome::Failure => f.write_str("failure"),
        }
    }
}

/// One priced trip, as written to the success output.
///
/// Field order matches the emitted JSON. The property objects are borrowed from the
/// parsed input so unknown sibling fields travel through untouched.
#[derive(Debug, Serialize)]
pub struct PricedTrip<'a> {
    #[serde(rename = "properties-client")]
    pub client: &'a Map<String, Value>,
    pub distance: f64,
    #[serde(rename = "properties-driver")]
    pub driver: &'a Map<String, Value>,
    pub prix_base_per_km: f64,
    pub confort: &'a str,
    pub prix_travel: f64,
}

/// Envelope around the single output entry: `{"data":[entry]}`.
#[derive(Debug, Serialize)]
pub struct TripDocument<'a> {
    pub data: [PricedTrip<'a>; 1],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Success.to_string(), "success");
        assert_eq!(Outcome::Failure.to_string(), "failure");
    }

    #[test]
    fn test_priced_trip_field_order() {
        let client = Map::new();
        let driver = Map::new();
        let doc = TripDocument {
            data: [PricedTrip {
                client: &client,
                distance: 10.0,
                driver: &driver,
                prix_base_per_km: 2.0,
                confort: "standard",
                prix_travel: 20.0,
            }],
        };

        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"data":[{"properties-client":{},"distance":10.0,"properties-driver":{},"prix_base_per_km":2.0,"confort":"standard","prix_travel":20.0}]}"#
        );
    }
}
