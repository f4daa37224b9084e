use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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
}

/// One row of the sample plant-uptake table.
struct Row {
    plant: String,
    kind: &'static str,
    conc: i64,
    uptake: Option<f64>,
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    let kinds = ["Quebec", "Mississippi"];
    let concentrations = [95, 175, 250, 350, 500, 675, 1000];

    let mut rows = Vec::new();
    for (k, &kind) in kinds.iter().enumerate() {
        for plant in 1..=3 {
            let ceiling = if k == 0 { 40.0 } else { 30.0 };
            for &conc in &concentrations {
                let base = ceiling * (1.0 - (-(conc as f64) / 300.0).exp());
                // Roughly one reading in twenty is lost.
                let uptake = if rng.next_f64() < 0.05 {
                    None
                } else {
                    Some(((base + rng.next_f64() * 4.0 - 2.0) * 10.0).round() / 10.0)
                };
                rows.push(Row {
                    plant: format!("{}n{plant}", &kind[..1]),
                    kind,
                    conc,
                    uptake,
                });
            }
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(["plant", "type", "conc", "uptake"])?;
    for row in rows {
        let conc = row.conc.to_string();
        let uptake = row.uptake.map_or_else(|| "NA".to_string(), |u| u.to_string());
        writer.write_record([row.plant.as_str(), row.kind, conc.as_str(), uptake.as_str()])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("plant", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("conc", DataType::Int64, false),
        Field::new("uptake", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.plant.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.kind).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.conc).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.uptake).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv(&rows, "sample_data.csv")?;
    write_parquet(&rows, "sample_data.parquet")?;

    println!(
        "Wrote {} rows to sample_data.csv and sample_data.parquet",
        rows.len()
    );
    Ok(())
}
