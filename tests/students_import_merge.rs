
use serde_json::json;
use test_support::{request_ok, spawn_sidecar, temp_dir};

fn write_csv(dir: &std::path::Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write csv");
    path.to_string_lossy().to_string()
}

#[test]
fn import_appends_updates_and_skips_by_email_key() {
    let dir = temp_dir("school-hub-students-import");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.create",
        json!({
            "name": "A",
            "email": "a@x.com",
            "class": "10-A",
            "rollNo": "101",
            "status": "Active",
            "avatar": "https://example.com/a.png"
        }),
    );
    assert_eq!(created["studentId"].as_i64(), Some(1));

    // One row updates the existing record, one appends, one has no email
    // and is silently dropped.
    let csv_path = write_csv(
        dir.as_path(),
        "roster.csv",
        "Name,Email,Class\nA2,A@X.COM,11-A\nB,b@x.com,9-B\nNoEmail,,9-B\n",
    );
    let outcome = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.import",
        json!({ "path": csv_path }),
    );
    assert_eq!(outcome["added"].as_u64(), Some(1));
    assert_eq!(outcome["updated"].as_u64(), Some(1));

    let listed = request_ok(&mut stdin, &mut reader, "3", "students.list", json!({}));
    let students = listed["students"].as_array().expect("students array");
    assert_eq!(students.len(), 2);

    // Updated in place: same id, avatar untouched, supplied fields replaced,
    // unrelated fields kept.
    assert_eq!(students[0]["id"].as_i64(), Some(1));
    assert_eq!(students[0]["name"].as_str(), Some("A2"));
    assert_eq!(students[0]["class"].as_str(), Some("11-A"));
    assert_eq!(students[0]["rollNo"].as_str(), Some("101"));
    assert_eq!(students[0]["status"].as_str(), Some("Active"));
    assert_eq!(
        students[0]["avatar"].as_str(),
        Some("https://example.com/a.png")
    );

    // Appended with the next id and the default status.
    assert_eq!(students[1]["id"].as_i64(), Some(2));
    assert_eq!(students[1]["name"].as_str(), Some("B"));
    assert_eq!(students[1]["status"].as_str(), Some("Active"));

    // Re-importing the same file only updates; the collection is unchanged.
    let again = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.import",
        json!({ "path": csv_path }),
    );
    assert_eq!(again["added"].as_u64(), Some(0));
    assert_eq!(again["updated"].as_u64(), Some(2));
    let relisted = request_ok(&mut stdin, &mut reader, "5", "students.list", json!({}));
    assert_eq!(relisted["students"].as_array().map(|a| a.len()), Some(2));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn import_accepts_header_spelling_variants() {
    let dir = temp_dir("school-hub-students-headers");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let csv_path = write_csv(
        dir.as_path(),
        "variants.csv",
        "NAME,E-Mail,CLASS,roll_no\nEmma,emma@school.edu,10-A,107\n",
    );
    let outcome = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.import",
        json!({ "path": csv_path }),
    );
    assert_eq!(outcome["added"].as_u64(), Some(1));

    let listed = request_ok(&mut stdin, &mut reader, "2", "students.list", json!({}));
    let students = listed["students"].as_array().expect("students array");
    assert_eq!(students[0]["email"].as_str(), Some("emma@school.edu"));
    assert_eq!(students[0]["rollNo"].as_str(), Some("107"));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn seeded_collection_merges_like_the_dashboard() {
    let dir = temp_dir("school-hub-students-seeded");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let seeded = request_ok(&mut stdin, &mut reader, "1", "demo.seed", json!({}));
    assert_eq!(seeded["students"].as_u64(), Some(6));

    let csv_path = write_csv(
        dir.as_path(),
        "transfer.csv",
        "Name,Email,Class,Phone\nEmma Wilson,emma.w@school.edu,11-A,+1 234-567-9999\nNoah Patel,noah.p@school.edu,9-A,+1 234-567-8907\n",
    );
    let outcome = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.import",
        json!({ "path": csv_path }),
    );
    assert_eq!(outcome["added"].as_u64(), Some(1));
    assert_eq!(outcome["updated"].as_u64(), Some(1));

    let listed = request_ok(&mut stdin, &mut reader, "3", "students.list", json!({}));
    let students = listed["students"].as_array().expect("students array");
    assert_eq!(students.len(), 7);
    // The seed avatar survives the merge.
    assert!(students[0]["avatar"].as_str().unwrap_or("").starts_with("https://"));
    assert_eq!(students[0]["class"].as_str(), Some("11-A"));
    // New records continue the monotonic id sequence.
    assert_eq!(students[6]["id"].as_i64(), Some(7));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(dir);
}
