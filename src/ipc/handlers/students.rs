use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{handle_delete, handle_export, handle_import, handle_template, param_i64, param_str};
use crate::ipc::types::{AppState, Request};
use crate::model::{Student, DEFAULT_STATUS};
use serde_json::json;

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let students = state
        .students
        .all()
        .iter()
        .map(|s| serde_json::to_value(s).unwrap_or_default())
        .collect::<Vec<_>>();
    ok(&req.id, json!({ "students": students }))
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (Some(name), Some(email)) = (
        param_str(&req.params, "name"),
        param_str(&req.params, "email"),
    ) else {
        return err(&req.id, "bad_params", "missing params.name or params.email", None);
    };
    if state.students.find_by_email(&email).is_some() {
        return err(&req.id, "email_exists", format!("a student with email {} already exists", email), None);
    }

    let class = param_str(&req.params, "class").unwrap_or_default();
    let roll_no = param_str(&req.params, "rollNo").unwrap_or_default();
    let phone = param_str(&req.params, "phone").unwrap_or_default();
    let status = param_str(&req.params, "status").unwrap_or_else(|| DEFAULT_STATUS.to_string());
    let avatar = param_str(&req.params, "avatar");

    let created = state.students.insert(|id| Student {
        id,
        name,
        email,
        class,
        roll_no,
        phone,
        status,
        avatar,
    });
    ok(&req.id, json!({ "studentId": created.id }))
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(id) = param_i64(&req.params, "id") else {
        return err(&req.id, "bad_params", "missing params.id", None);
    };
    let patch = req.params.get("patch").cloned().unwrap_or_else(|| json!({}));
    if !patch.is_object() {
        return err(&req.id, "bad_params", "params.patch must be an object", None);
    }

    // Email stays unique across the collection.
    if let Some(new_email) = param_str(&patch, "email") {
        if let Some(other) = state.students.find_by_email(&new_email) {
            if other.id != id {
                return err(&req.id, "email_exists", format!("a student with email {} already exists", new_email), None);
            }
        }
    }

    let updated = state.students.update(id, |s| {
        if let Some(v) = param_str(&patch, "name") {
            s.name = v;
        }
        if let Some(v) = param_str(&patch, "email") {
            s.email = v;
        }
        if let Some(v) = param_str(&patch, "class") {
            s.class = v;
        }
        if let Some(v) = param_str(&patch, "rollNo") {
            s.roll_no = v;
        }
        if let Some(v) = param_str(&patch, "phone") {
            s.phone = v;
        }
        if let Some(v) = param_str(&patch, "status") {
            s.status = v;
        }
        if let Some(v) = param_str(&patch, "avatar") {
            s.avatar = Some(v);
        }
    });
    if updated {
        ok(&req.id, json!({ "studentId": id }))
    } else {
        err(&req.id, "not_found", format!("no student with id {}", id), None)
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_list(state, req)),
        "students.create" => Some(handle_create(state, req)),
        "students.update" => Some(handle_update(state, req)),
        "students.delete" => Some(handle_delete(&mut state.students, req)),
        "students.import" => Some(handle_import(&mut state.students, req)),
        "students.export" => Some(handle_export(&state.students, req)),
        "students.template" => Some(handle_template::<Student>(req)),
        _ => None,
    }
}
