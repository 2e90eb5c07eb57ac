use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{handle_delete, handle_export, handle_import, handle_template, param_f64, param_i64, param_str};
use crate::ipc::types::{AppState, Request};
use crate::model::{exam_status, grade_for_marks, ExamResult};
use serde_json::json;

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let results = state
        .results
        .all()
        .iter()
        .map(|r| serde_json::to_value(r).unwrap_or_default())
        .collect::<Vec<_>>();
    ok(&req.id, json!({ "results": results }))
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (Some(name), Some(email)) = (
        param_str(&req.params, "name"),
        param_str(&req.params, "email"),
    ) else {
        return err(&req.id, "bad_params", "missing params.name or params.email", None);
    };
    if state.results.find_by_email(&email).is_some() {
        return err(&req.id, "email_exists", format!("a result with email {} already exists", email), None);
    }

    let class = param_str(&req.params, "class").unwrap_or_default();
    let subject = param_str(&req.params, "subject").unwrap_or_default();
    let marks = param_f64(&req.params, "marks").unwrap_or(0.0);
    let grade = param_str(&req.params, "grade").unwrap_or_else(|| grade_for_marks(marks));
    let status = param_str(&req.params, "status").unwrap_or_else(|| exam_status(marks).to_string());

    let created = state.results.insert(|id| ExamResult {
        id,
        name,
        email,
        class,
        subject,
        marks,
        grade,
        status,
    });
    ok(&req.id, json!({ "resultId": created.id }))
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(id) = param_i64(&req.params, "id") else {
        return err(&req.id, "bad_params", "missing params.id", None);
    };
    let patch = req.params.get("patch").cloned().unwrap_or_else(|| json!({}));
    if !patch.is_object() {
        return err(&req.id, "bad_params", "params.patch must be an object", None);
    }

    if let Some(new_email) = param_str(&patch, "email") {
        if let Some(other) = state.results.find_by_email(&new_email) {
            if other.id != id {
                return err(&req.id, "email_exists", format!("a result with email {} already exists", new_email), None);
            }
        }
    }

    let updated = state.results.update(id, |r| {
        if let Some(v) = param_str(&patch, "name") {
            r.name = v;
        }
        if let Some(v) = param_str(&patch, "email") {
            r.email = v;
        }
        if let Some(v) = param_str(&patch, "class") {
            r.class = v;
        }
        if let Some(v) = param_str(&patch, "subject") {
            r.subject = v;
        }
        if let Some(m) = param_f64(&patch, "marks") {
            r.marks = m;
            r.grade = param_str(&patch, "grade").unwrap_or_else(|| grade_for_marks(m));
            r.status = param_str(&patch, "status").unwrap_or_else(|| exam_status(m).to_string());
        } else {
            if let Some(v) = param_str(&patch, "grade") {
                r.grade = v;
            }
            if let Some(v) = param_str(&patch, "status") {
                r.status = v;
            }
        }
    });
    if updated {
        ok(&req.id, json!({ "resultId": id }))
    } else {
        err(&req.id, "not_found", format!("no result with id {}", id), None)
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "results.list" => Some(handle_list(state, req)),
        "results.create" => Some(handle_create(state, req)),
        "results.update" => Some(handle_update(state, req)),
        "results.delete" => Some(handle_delete(&mut state.results, req)),
        "results.import" => Some(handle_import(&mut state.results, req)),
        "results.export" => Some(handle_export(&state.results, req)),
        "results.template" => Some(handle_template::<ExamResult>(req)),
        _ => None,
    }
}
