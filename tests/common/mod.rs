use rand::Rng;
use serde_json::{Value, json};
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

pub fn trip_record(client: (f64, f64), driver: (f64, f64), base_price: f64) -> Value {
    json!({
        "data": [{
            "confort": "standard",
            "prix_base_per_km": base_price,
            "properties-client": {
                "latitude": client.0,
                "longitude": client.1,
                "nomClient": "FALL"
            },
            "properties-driver": {
                "latitude": driver.0,
                "longitude": driver.1,
                "nomDriver": "DIOP"
            }
        }]
    })
}

pub fn random_point<R: Rng>(rng: &mut R) -> (f64, f64) {
    (rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0))
}

/// Writes `rows` valid trip records as newline-delimited JSON.
pub fn generate_trips(path: &Path, rows: usize) -> Result<(), Error> {
    let mut rng = rand::thread_rng();
    let mut file = File::create(path)?;

    for _ in 0..rows {
        let record = trip_record(
            random_point(&mut rng),
            random_point(&mut rng),
            rng.gen_range(0.5..5.0),
        );
        writeln!(file, "{record}")?;
    }

    file.flush()?;
    Ok(())
}
