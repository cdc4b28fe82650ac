use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array, Int8Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::Particle;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load particle slots from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – columns `pt`, `eta`, `phi`, `charge`, optional `mc_label`
/// * `.json`    – `[{ "pt": 1.2, "eta": 0.1, "phi": 2.0, "charge": 1 }, null, ...]`
/// * `.csv`     – header `pt,eta,phi,charge,mc_label`
///
/// Empty slots are `null` records in JSON and rows with a missing `pt`
/// in CSV and Parquet.
pub fn load_file(path: &Path) -> Result<Vec<Option<Particle>>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let slots = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    info!(
        "loaded {} slots ({} empty) from {}",
        slots.len(),
        slots.iter().filter(|s| s.is_none()).count(),
        path.display()
    );
    Ok(slots)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<Option<Particle>>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON particle records")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    pt: Option<f64>,
    eta: Option<f64>,
    phi: Option<f64>,
    charge: Option<i8>,
    #[serde(default)]
    mc_label: Option<i32>,
}

fn load_csv(path: &Path) -> Result<Vec<Option<Particle>>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let mut slots = Vec::new();

    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let Some(pt) = row.pt else {
            slots.push(None);
            continue;
        };
        slots.push(Some(Particle {
            pt,
            eta: row
                .eta
                .with_context(|| format!("CSV row {row_no}: missing 'eta'"))?,
            phi: row
                .phi
                .with_context(|| format!("CSV row {row_no}: missing 'phi'"))?,
            charge: row
                .charge
                .with_context(|| format!("CSV row {row_no}: missing 'charge'"))?,
            mc_label: row.mc_label.unwrap_or(0),
        }));
    }

    Ok(slots)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet particle table.
///
/// Expected schema:
/// - `pt`, `eta`, `phi`: Float64 or Float32; a null `pt` marks an empty slot
/// - `charge`: any signed integer type
/// - `mc_label` (optional): any signed integer type
fn load_parquet(path: &Path) -> Result<Vec<Option<Particle>>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut slots = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let pt_col = column(&batch, "pt")?;
        let eta_col = column(&batch, "eta")?;
        let phi_col = column(&batch, "phi")?;
        let charge_col = column(&batch, "charge")?;
        let label_col = column(&batch, "mc_label").ok();

        for row in 0..batch.num_rows() {
            let Some(pt) = extract_f64(pt_col, row).context("reading 'pt'")? else {
                slots.push(None);
                continue;
            };
            let eta = extract_f64(eta_col, row)?
                .with_context(|| format!("Row {row}: null 'eta'"))?;
            let phi = extract_f64(phi_col, row)?
                .with_context(|| format!("Row {row}: null 'phi'"))?;
            let charge = extract_i64(charge_col, row)?
                .with_context(|| format!("Row {row}: null 'charge'"))?;
            let mc_label = match label_col {
                Some(col) => extract_i64(col, row)?.unwrap_or(0),
                None => 0,
            };

            slots.push(Some(Particle {
                pt,
                eta,
                phi,
                charge: i8::try_from(charge)
                    .with_context(|| format!("Row {row}: charge {charge} out of range"))?,
                mc_label: i32::try_from(mc_label)
                    .with_context(|| format!("Row {row}: MC label {mc_label} out of range"))?,
            }));
        }
    }

    Ok(slots)
}

// -- Parquet / Arrow helpers --

fn column<'b>(batch: &'b RecordBatch, name: &str) -> Result<&'b ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Read a floating point cell, `None` when null.
fn extract_f64(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row),
        DataType::Float32 => f64::from(downcast::<Float32Array>(col)?.value(row)),
        other => bail!("Expected Float64 or Float32 column, got {other:?}"),
    };
    Ok(Some(value))
}

/// Read a signed integer cell, `None` when null.
fn extract_i64(col: &ArrayRef, row: usize) -> Result<Option<i64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int8 => i64::from(downcast::<Int8Array>(col)?.value(row)),
        DataType::Int16 => i64::from(downcast::<Int16Array>(col)?.value(row)),
        DataType::Int32 => i64::from(downcast::<Int32Array>(col)?.value(row)),
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row),
        other => bail!("Expected a signed integer column, got {other:?}"),
    };
    Ok(Some(value))
}

fn downcast<T: Array + 'static>(col: &ArrayRef) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array type {:?}", col.data_type()))
}
