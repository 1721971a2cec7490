//! Writes a synthetic meteorite dataset as both Parquet and JSON.
//!
//! A few percent of the rows carry missing or malformed fields so the
//! dashboard's skipping rules can be seen at work.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{Map, Value as JsonValue};

const ROWS: usize = 1000;

const COLUMNS: [&str; 9] = [
    "name", "id", "nametype", "recclass", "mass", "fall", "year", "reclat", "reclong",
];

/// Composition classes with relative weights.
const CLASSES: [(&str, u32); 8] = [
    ("L6", 30),
    ("H5", 25),
    ("L5", 15),
    ("H6", 12),
    ("H4", 8),
    ("LL5", 5),
    ("CM2", 3),
    ("Eucrite", 2),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn pick_class(rng: &mut SimpleRng) -> &'static str {
    let total: u32 = CLASSES.iter().map(|(_, w)| w).sum();
    let mut roll = (rng.next_f64() * total as f64) as u32;
    for (class, weight) in CLASSES {
        if roll < weight {
            return class;
        }
        roll -= weight;
    }
    CLASSES[0].0
}

/// One synthetic row, column values in `COLUMNS` order.
fn generate_row(i: usize, rng: &mut SimpleRng) -> [Option<String>; 9] {
    let mass = if rng.chance(0.03) {
        None
    } else if rng.chance(0.01) {
        Some("unknown".to_string())
    } else {
        // Log-normal, grams.
        Some(format!("{:.1}", rng.gauss(3.0, 2.0).exp()))
    };

    let year = if rng.chance(0.02) {
        None
    } else if rng.chance(0.01) {
        Some("n/a".to_string())
    } else {
        let y = rng.range(1800.0, 2013.0) as i32;
        Some(format!("{y}-01-01T00:00:00.000"))
    };

    let (reclat, reclong) = if rng.chance(0.1) {
        (None, None)
    } else {
        (
            Some(format!("{:.5}", rng.range(-80.0, 80.0))),
            Some(format!("{:.5}", rng.range(-180.0, 180.0))),
        )
    };

    let fall = if rng.chance(0.1) { "Fell" } else { "Found" };

    [
        Some(format!("Sample {i:04}")),
        Some((i + 1).to_string()),
        Some("Valid".to_string()),
        Some(pick_class(rng).to_string()),
        mass,
        Some(fall.to_string()),
        year,
        reclat,
        reclong,
    ]
}

fn write_parquet(rows: &[[Option<String>; 9]], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let columns: Vec<ArrayRef> = (0..COLUMNS.len())
        .map(|c| {
            let values: StringArray = rows.iter().map(|row| row[c].as_deref()).collect();
            Arc::new(values) as ArrayRef
        })
        .collect();

    let batch =
        RecordBatch::try_new(schema.clone(), columns).context("creating record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn write_json(rows: &[[Option<String>; 9]], path: &str) -> Result<()> {
    let records: Vec<JsonValue> = rows
        .iter()
        .map(|row| {
            let obj: Map<String, JsonValue> = COLUMNS
                .iter()
                .zip(row)
                .filter_map(|(name, value)| {
                    value
                        .as_ref()
                        .map(|v| (name.to_string(), JsonValue::String(v.clone())))
                })
                .collect();
            JsonValue::Object(obj)
        })
        .collect();

    let text = serde_json::to_string_pretty(&records).context("serialising JSON")?;
    std::fs::write(path, text).context("writing JSON file")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<_> = (0..ROWS).map(|i| generate_row(i, &mut rng)).collect();

    write_parquet(&rows, "sample_meteorites.parquet")?;
    write_json(&rows, "sample_meteorites.json")?;

    println!("Wrote {ROWS} records to sample_meteorites.parquet and sample_meteorites.json");
    Ok(())
}
