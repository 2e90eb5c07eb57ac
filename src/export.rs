use anyhow::Context;
use std::path::Path;

use crate::merge::Importable;
use crate::store::Store;

/// Writes the downloadable template for an entity: the recognized header
/// row plus one illustrative data row.
pub fn write_template<T: Importable>(out_path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(out_path)
        .with_context(|| format!("create template at {}", out_path.display()))?;
    writer.write_record(T::COLUMNS)?;
    writer.write_record(T::template_row())?;
    writer.flush()?;
    Ok(())
}

/// Writes one CSV row per record in collection order. Returns the number of
/// data rows written.
pub fn write_export<T: Importable>(store: &Store<T>, out_path: &Path) -> anyhow::Result<usize> {
    let mut writer = csv::Writer::from_path(out_path)
        .with_context(|| format!("create export at {}", out_path.display()))?;
    writer.write_record(T::COLUMNS)?;
    for record in store.all() {
        writer.write_record(record.export_row())?;
    }
    writer.flush()?;
    Ok(store.len())
}
