use std::f64::consts::TAU;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int32Array, Int8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**), seeded so every run writes the same sample.
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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Exponential with the given mean, a crude soft pt spectrum.
    fn exponential(&mut self, mean: f64) -> f64 {
        -mean * self.next_f64().max(1e-15).ln()
    }
}

const N_SLOTS: usize = 500;
/// Every n-th slot is left empty.
const EMPTY_EVERY: usize = 17;

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let mut pt = Vec::with_capacity(N_SLOTS);
    let mut eta = Vec::with_capacity(N_SLOTS);
    let mut phi = Vec::with_capacity(N_SLOTS);
    let mut charge = Vec::with_capacity(N_SLOTS);
    let mut mc_label = Vec::with_capacity(N_SLOTS);

    for slot in 0..N_SLOTS {
        let empty = slot % EMPTY_EVERY == EMPTY_EVERY - 1;
        pt.push((!empty).then(|| rng.exponential(0.7)));
        eta.push(rng.uniform(-1.2, 1.2));
        phi.push(rng.uniform(0.0, TAU));
        charge.push(match rng.next_u64() % 3 {
            0 => -1i8,
            1 => 0,
            _ => 1,
        });
        // A few fakes with negative labels.
        let label = i32::try_from(slot).context("slot index overflows i32")?;
        mc_label.push(if rng.next_f64() < 0.05 { -label } else { label });
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("pt", DataType::Float64, true),
        Field::new("eta", DataType::Float64, false),
        Field::new("phi", DataType::Float64, false),
        Field::new("charge", DataType::Int8, false),
        Field::new("mc_label", DataType::Int32, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(pt)),
            Arc::new(Float64Array::from(eta)),
            Arc::new(Float64Array::from(phi)),
            Arc::new(Int8Array::from(charge)),
            Arc::new(Int32Array::from(mc_label)),
        ],
    )
    .context("building record batch")?;

    let output_path = "sample_particles.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;

    println!("Wrote {N_SLOTS} particle slots to {output_path}");
    Ok(())
}
