use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{handle_delete, handle_export, handle_import, handle_template, param_i64, param_str};
use crate::ipc::types::{AppState, Request};
use crate::model::{Teacher, DEFAULT_STATUS};
use serde_json::json;

fn param_classes(params: &serde_json::Value) -> Option<Vec<String>> {
    let list = params.get("classes")?.as_array()?;
    Some(
        list.iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let teachers = state
        .teachers
        .all()
        .iter()
        .map(|t| serde_json::to_value(t).unwrap_or_default())
        .collect::<Vec<_>>();
    ok(&req.id, json!({ "teachers": teachers }))
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (Some(name), Some(email)) = (
        param_str(&req.params, "name"),
        param_str(&req.params, "email"),
    ) else {
        return err(&req.id, "bad_params", "missing params.name or params.email", None);
    };
    if state.teachers.find_by_email(&email).is_some() {
        return err(&req.id, "email_exists", format!("a teacher with email {} already exists", email), None);
    }

    let subject = param_str(&req.params, "subject").unwrap_or_default();
    let phone = param_str(&req.params, "phone").unwrap_or_default();
    let status = param_str(&req.params, "status").unwrap_or_else(|| DEFAULT_STATUS.to_string());
    let classes = param_classes(&req.params).unwrap_or_default();

    let created = state.teachers.insert(|id| Teacher {
        id,
        name,
        email,
        subject,
        phone,
        status,
        classes,
    });
    ok(&req.id, json!({ "teacherId": created.id }))
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
        if let Some(other) = state.teachers.find_by_email(&new_email) {
            if other.id != id {
                return err(&req.id, "email_exists", format!("a teacher with email {} already exists", new_email), None);
            }
        }
    }

    let updated = state.teachers.update(id, |t| {
        if let Some(v) = param_str(&patch, "name") {
            t.name = v;
        }
        if let Some(v) = param_str(&patch, "email") {
            t.email = v;
        }
        if let Some(v) = param_str(&patch, "subject") {
            t.subject = v;
        }
        if let Some(v) = param_str(&patch, "phone") {
            t.phone = v;
        }
        if let Some(v) = param_str(&patch, "status") {
            t.status = v;
        }
        if let Some(v) = param_classes(&patch) {
            t.classes = v;
        }
    });
    if updated {
        ok(&req.id, json!({ "teacherId": id }))
    } else {
        err(&req.id, "not_found", format!("no teacher with id {}", id), None)
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "teachers.list" => Some(handle_list(state, req)),
        "teachers.create" => Some(handle_create(state, req)),
        "teachers.update" => Some(handle_update(state, req)),
        "teachers.delete" => Some(handle_delete(&mut state.teachers, req)),
        "teachers.import" => Some(handle_import(&mut state.teachers, req)),
        "teachers.export" => Some(handle_export(&state.teachers, req)),
        "teachers.template" => Some(handle_template::<Teacher>(req)),
        _ => None,
    }
}
