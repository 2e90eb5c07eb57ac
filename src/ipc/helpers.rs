use serde_json::{json, Value};
use std::path::Path;

use crate::export;
use crate::ipc::error::{err, ok};
use crate::ipc::types::Request;
use crate::merge::{merge_rows, Importable};
use crate::sheet::{self, SheetError};
use crate::store::Store;

pub(crate) fn param_str(params: &Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub(crate) fn param_i64(params: &Value, key: &str) -> Option<i64> {
    params.get(key).and_then(|v| v.as_i64())
}

pub(crate) fn param_f64(params: &Value, key: &str) -> Option<f64> {
    params.get(key).and_then(|v| v.as_f64())
}

/// Shared `<entity>.import` behavior: decode the file at params.path and
/// merge it into the store. Decode failures and empty files abort with a
/// single error and leave the collection untouched; per-row problems never
/// abort the import.
pub(crate) fn handle_import<T: Importable>(store: &mut Store<T>, req: &Request) -> Value {
    let Some(path) = param_str(&req.params, "path") else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    let rows = match sheet::decode_rows(Path::new(&path)) {
        Ok(rows) => rows,
        Err(SheetError::NotFound(p)) => {
            return err(&req.id, "file_not_found", format!("no such file: {}", p), None);
        }
        Err(SheetError::UnsupportedFormat(ext)) => {
            return err(
                &req.id,
                "unsupported_format",
                format!("unsupported file format: .{}", ext),
                None,
            );
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "import decode failed");
            return err(&req.id, "parse_failed", "could not read file", None);
        }
    };

    if rows.is_empty() {
        return err(&req.id, "empty_file", "file is empty or invalid", None);
    }

    let outcome = merge_rows(store, &rows);
    tracing::info!(
        path = %path,
        added = outcome.added,
        updated = outcome.updated,
        "import merged"
    );
    ok(
        &req.id,
        json!({ "added": outcome.added, "updated": outcome.updated }),
    )
}

/// Shared `<entity>.export` behavior: write the collection as CSV to
/// params.outPath.
pub(crate) fn handle_export<T: Importable>(store: &Store<T>, req: &Request) -> Value {
    let Some(out_path) = param_str(&req.params, "outPath") else {
        return err(&req.id, "bad_params", "missing params.outPath", None);
    };
    match export::write_export(store, Path::new(&out_path)) {
        Ok(rows_exported) => ok(
            &req.id,
            json!({ "rowsExported": rows_exported, "outPath": out_path }),
        ),
        Err(e) => err(&req.id, "export_failed", format!("{e:#}"), None),
    }
}

/// Shared `<entity>.template` behavior: write the header-plus-example CSV
/// to params.outPath.
pub(crate) fn handle_template<T: Importable>(req: &Request) -> Value {
    let Some(out_path) = param_str(&req.params, "outPath") else {
        return err(&req.id, "bad_params", "missing params.outPath", None);
    };
    match export::write_template::<T>(Path::new(&out_path)) {
        Ok(()) => ok(&req.id, json!({ "outPath": out_path })),
        Err(e) => err(&req.id, "export_failed", format!("{e:#}"), None),
    }
}

/// Shared `<entity>.delete` behavior.
pub(crate) fn handle_delete<T: Importable>(store: &mut Store<T>, req: &Request) -> Value {
    let Some(id) = param_i64(&req.params, "id") else {
        return err(&req.id, "bad_params", "missing params.id", None);
    };
    if store.delete(id) {
        ok(&req.id, json!({ "deleted": id }))
    } else {
        err(&req.id, "not_found", format!("no record with id {}", id), None)
    }
}
