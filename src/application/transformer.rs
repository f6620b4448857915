use crate::domain::geo::GeoPoint;
use crate::domain::record::{
    FIELD_BASE_PRICE, FIELD_CLIENT, FIELD_COMFORT, FIELD_DATA, FIELD_DRIVER, FIELD_LATITUDE,
    FIELD_LONGITUDE, Outcome, PricedTrip, TripDocument,
};
use crate::error::TransformError;
use serde_json::{Map, Value};

/// Result of transforming one record.
///
/// On failure the original payload is handed back untouched together with the reason.
#[derive(Debug)]
pub enum Transformed {
    Success(Vec<u8>),
    Failure {
        original: Vec<u8>,
        error: TransformError,
    },
}

impl Transformed {
    pub fn outcome(&self) -> Outcome {
        match self {
            Transformed::Success(_) => Outcome::Success,
            Transformed::Failure { .. } => Outcome::Failure,
        }
    }

    /// Bytes to forward downstream: the new document or the original input.
    pub fn payload(&self) -> &[u8] {
        match self {
            Transformed::Success(output) => output,
            Transformed::Failure { original, .. } => original,
        }
    }

    pub fn into_parts(self) -> (Vec<u8>, Outcome) {
        match self {
            Transformed::Success(output) => (output, Outcome::Success),
            Transformed::Failure { original, .. } => (original, Outcome::Failure),
        }
    }
}

/// Enriches one trip record with its distance and price.
///
/// Never panics and never returns partial output: either the full priced document
/// comes back as [`Transformed::Success`], or the input is returned as-is.
pub fn transform(input: Vec<u8>) -> Transformed {
    match try_transform(&input) {
        Ok(output) => Transformed::Success(output),
        Err(error) => Transformed::Failure {
            original: input,
            error,
        },
    }
}

/// Fallible core of [`transform`].
pub fn try_transform(input: &[u8]) -> Result<Vec<u8>, TransformError> {
    let root: Value = serde_json::from_slice(input)?;

    let entry = root
        .get(FIELD_DATA)
        .and_then(Value::as_array)
        .and_then(|data| data.first())
        .ok_or_else(|| TransformError::MissingFieldError("data[0]".to_string()))?;
    let entry = as_object(entry, "data[0]")?;

    let base_price = require_f64(entry, FIELD_BASE_PRICE, FIELD_BASE_PRICE)?;

    let client = require_object(entry, FIELD_CLIENT)?;
    let driver = require_object(entry, FIELD_DRIVER)?;
    let client_position = GeoPoint::new(
        require_f64(client, FIELD_LATITUDE, "properties-client.latitude")?,
        require_f64(client, FIELD_LONGITUDE, "properties-client.longitude")?,
    );
    let driver_position = GeoPoint::new(
        require_f64(driver, FIELD_LATITUDE, "properties-driver.latitude")?,
        require_f64(driver, FIELD_LONGITUDE, "properties-driver.longitude")?,
    );

    let comfort = match entry.get(FIELD_COMFORT) {
        None | Some(Value::Null) => "",
        Some(Value::String(comfort)) => comfort.as_str(),
        Some(other) => {
            return Err(TransformError::TypeError {
                field: FIELD_COMFORT.to_string(),
                expected: "a string",
                found: kind(other),
            });
        }
    };

    let distance = client_position.distance_to(&driver_position);
    if !distance.is_finite() {
        return Err(TransformError::NumericError("distance"));
    }
    let travel_price = distance * base_price;
    if !travel_price.is_finite() {
        return Err(TransformError::NumericError("prix_travel"));
    }

    let document = TripDocument {
        data: [PricedTrip {
            client,
            distance,
            driver,
            prix_base_per_km: base_price,
            confort: comfort,
            prix_travel: travel_price,
        }],
    };

    Ok(serde_json::to_vec(&document)?)
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, TransformError> {
    value.as_object().ok_or_else(|| TransformError::TypeError {
        field: path.to_string(),
        expected: "an object",
        found: kind(value),
    })
}

fn require_object<'a>(
    parent: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Map<String, Value>, TransformError> {
    let value = parent
        .get(field)
        .ok_or_else(|| TransformError::MissingFieldError(field.to_string()))?;
    as_object(value, field)
}

/// Reads a required number. Strings such as `"2"` are rejected rather than coerced.
fn require_f64(
    parent: &Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<f64, TransformError> {
    let value = parent
        .get(field)
        .ok_or_else(|| TransformError::MissingFieldError(path.to_string()))?;
    value.as_f64().ok_or_else(|| TransformError::TypeError {
        field: path.to_string(),
        expected: "a number",
        found: kind(value),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
