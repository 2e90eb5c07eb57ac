use crate::ipc::error::{err, ok};
use crate::ipc::helpers::param_str;
use crate::ipc::types::{AppState, Request};
use crate::model::User;
use serde_json::json;

/// Placeholder issued to every successful login. The prototype this
/// replaces never validates it anywhere.
const DEMO_TOKEN: &str = "school-hub-demo-token";

const DEFAULT_ROLE: &str = "student";

fn handle_signup(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (Some(name), Some(email), Some(password)) = (
        param_str(&req.params, "name"),
        param_str(&req.params, "email"),
        param_str(&req.params, "password"),
    ) else {
        return err(&req.id, "bad_params", "All fields are required", None);
    };

    if state
        .users
        .iter()
        .any(|u| u.email.eq_ignore_ascii_case(&email))
    {
        return err(&req.id, "user_exists", "User already exists", None);
    }

    let role = param_str(&req.params, "role").unwrap_or_else(|| DEFAULT_ROLE.to_string());
    state.users.push(User {
        name,
        email,
        password,
        role,
    });
    ok(&req.id, json!({ "message": "User created successfully" }))
}

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (Some(email), Some(password)) = (
        param_str(&req.params, "email"),
        param_str(&req.params, "password"),
    ) else {
        return err(&req.id, "bad_params", "missing params.email or params.password", None);
    };

    let user = state
        .users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(&email));
    match user {
        // Plaintext comparison, faithful to the stub this replaces.
        Some(u) if u.password == password => ok(
            &req.id,
            json!({
                "message": "Login successful",
                "user": { "name": u.name, "email": u.email, "role": u.role },
                "token": DEMO_TOKEN,
            }),
        ),
        _ => err(&req.id, "invalid_credentials", "Invalid email or password", None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.signup" => Some(handle_signup(state, req)),
        "auth.login" => Some(handle_login(state, req)),
        _ => None,
    }
}
