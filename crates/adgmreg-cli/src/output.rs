//! Dataset persistence: pretty-printed JSON plus fixed-column CSV.
//!
//! Both writes fully overwrite any prior file of the same name; there is no
//! atomic rename or partial-write protection.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use adgmreg_core::CsvRecord;

/// Creates the output directory if it does not exist yet.
pub(crate) fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))
}

/// Writes `records` as a pretty-printed JSON array.
pub(crate) fn write_json<T: Serialize>(path: &Path, records: &[T]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(records)
        .with_context(|| format!("failed to serialize records for {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Writes `records` as CSV with the record type's fixed header and column
/// order.
pub(crate) fn write_csv<R: CsvRecord>(path: &Path, records: &[R]) -> anyhow::Result<()> {
    let file =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(R::HEADER)?;
    for record in records {
        writer.write_record(record.csv_fields())?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes both artifacts for a finished run.
pub(crate) fn save_dataset<R>(
    dir: &Path,
    json_name: &str,
    csv_name: &str,
    records: &[R],
) -> anyhow::Result<()>
where
    R: CsvRecord + Serialize,
{
    ensure_dir(dir)?;

    let json_path = dir.join(json_name);
    write_json(&json_path, records)?;
    tracing::info!(path = %json_path.display(), records = records.len(), "dataset saved");

    let csv_path = dir.join(csv_name);
    write_csv(&csv_path, records)?;
    tracing::info!(path = %csv_path.display(), records = records.len(), "dataset saved");

    Ok(())
}
