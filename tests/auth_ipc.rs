
use serde_json::json;
use test_support::{request_err, request_ok, spawn_sidecar};

#[test]
fn signup_then_login_roundtrip() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "auth.signup",
        json!({ "name": "Priya Nair", "email": "priya@school.edu", "password": "hunter2" }),
    );
    assert_eq!(created["message"].as_str(), Some("User created successfully"));

    // Duplicate email, case-insensitively.
    request_err(
        &mut stdin,
        &mut reader,
        "2",
        "auth.signup",
        json!({ "name": "Priya N", "email": "PRIYA@school.edu", "password": "other" }),
        "user_exists",
    );

    request_err(
        &mut stdin,
        &mut reader,
        "3",
        "auth.signup",
        json!({ "name": "No Password", "email": "np@school.edu" }),
        "bad_params",
    );

    let login = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "auth.login",
        json!({ "email": "priya@school.edu", "password": "hunter2" }),
    );
    assert_eq!(login["message"].as_str(), Some("Login successful"));
    assert_eq!(login["user"]["name"].as_str(), Some("Priya Nair"));
    assert_eq!(login["user"]["role"].as_str(), Some("student"));
    assert_eq!(login["token"].as_str(), Some("school-hub-demo-token"));

    request_err(
        &mut stdin,
        &mut reader,
        "5",
        "auth.login",
        json!({ "email": "priya@school.edu", "password": "wrong" }),
        "invalid_credentials",
    );
    request_err(
        &mut stdin,
        &mut reader,
        "6",
        "auth.login",
        json!({ "email": "ghost@school.edu", "password": "hunter2" }),
        "invalid_credentials",
    );

    drop(stdin);
    let _ = child.wait();
}
