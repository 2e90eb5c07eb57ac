
use serde_json::json;
use test_support::{request_err, request_ok, spawn_sidecar};

#[test]
fn create_enforces_unique_email_per_collection() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.create",
        json!({ "name": "A", "email": "a@x.com" }),
    );
    request_err(
        &mut stdin,
        &mut reader,
        "2",
        "students.create",
        json!({ "name": "A again", "email": "A@X.COM" }),
        "email_exists",
    );
    // Same email in a different collection is fine.
    request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "results.create",
        json!({ "name": "A", "email": "a@x.com", "marks": 80.0 }),
    );

    request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.create",
        json!({ "name": "B", "email": "b@x.com" }),
    );
    request_err(
        &mut stdin,
        &mut reader,
        "5",
        "students.update",
        json!({ "id": 2, "patch": { "email": "a@x.com" } }),
        "email_exists",
    );

    request_err(
        &mut stdin,
        &mut reader,
        "6",
        "students.update",
        json!({ "id": 42, "patch": { "name": "Nobody" } }),
        "not_found",
    );
    request_err(
        &mut stdin,
        &mut reader,
        "7",
        "students.delete",
        json!({ "id": 42 }),
        "not_found",
    );

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn updating_marks_rederives_grade_and_status() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "results.create",
        json!({ "name": "P", "email": "p@x.com", "class": "10-A", "subject": "Physics", "marks": 85.0 }),
    );
    let id = created["resultId"].as_i64().expect("resultId");

    let listed = request_ok(&mut stdin, &mut reader, "2", "results.list", json!({}));
    assert_eq!(listed["results"][0]["grade"].as_str(), Some("A"));
    assert_eq!(listed["results"][0]["status"].as_str(), Some("Pass"));

    request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "results.update",
        json!({ "id": id, "patch": { "marks": 30.0 } }),
    );
    let relisted = request_ok(&mut stdin, &mut reader, "4", "results.list", json!({}));
    assert_eq!(relisted["results"][0]["marks"].as_f64(), Some(30.0));
    assert_eq!(relisted["results"][0]["grade"].as_str(), Some("F"));
    assert_eq!(relisted["results"][0]["status"].as_str(), Some("Fail"));
    // The record itself is the same one.
    assert_eq!(relisted["results"][0]["id"].as_i64(), Some(id));
    assert_eq!(relisted["results"][0]["subject"].as_str(), Some("Physics"));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn teacher_import_splits_comma_separated_classes() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let dir = test_support::temp_dir("school-hub-teacher-classes");
    let csv_path = dir.join("teachers.csv");
    std::fs::write(
        &csv_path,
        "Name,Email,Subject,Classes\nMr. Fox,fox@school.edu,Maths,\"10-A, 11-B , ,12-A\"\nMs. Ada,ada@school.edu,CS,9-C\n",
    )
    .expect("write csv");

    let outcome = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "teachers.import",
        json!({ "path": csv_path.to_string_lossy() }),
    );
    assert_eq!(outcome["added"].as_u64(), Some(2));

    let listed = request_ok(&mut stdin, &mut reader, "2", "teachers.list", json!({}));
    let teachers = listed["teachers"].as_array().expect("teachers array");
    // Tokens are trimmed and empties dropped.
    assert_eq!(teachers[0]["classes"], json!(["10-A", "11-B", "12-A"]));
    // A plain value is a single-element list.
    assert_eq!(teachers[1]["classes"], json!(["9-C"]));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(dir);
}
