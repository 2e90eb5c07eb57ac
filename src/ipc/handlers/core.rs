use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::model::{exam_status, grade_for_marks, ExamResult, Fee, Student, Teacher};
use chrono::NaiveDate;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "students": state.students.len(),
            "teachers": state.teachers.len(),
            "results": state.results.len(),
            "fees": state.fees.len(),
        }),
    )
}

/// Replaces every collection with the sample rosters the dashboard ships
/// with. Mainly useful for demos and tests; restart gets you back to empty.
fn handle_demo_seed(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.students.reset();
    state.teachers.reset();
    state.results.reset();
    state.fees.reset();

    let students: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
        ("Emma Wilson", "emma.w@school.edu", "10-A", "101", "+1 234-567-8901", "Active",
         "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=100&h=100&fit=crop&crop=face"),
        ("James Miller", "james.m@school.edu", "9-B", "102", "+1 234-567-8902", "Active",
         "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop&crop=face"),
        ("Sophia Brown", "sophia.b@school.edu", "11-A", "103", "+1 234-567-8903", "Inactive",
         "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=100&h=100&fit=crop&crop=face"),
        ("Michael Chen", "michael.c@school.edu", "10-B", "104", "+1 234-567-8904", "Active",
         "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=100&h=100&fit=crop&crop=face"),
        ("Emily Davis", "emily.d@school.edu", "12-A", "105", "+1 234-567-8905", "Active",
         "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=100&h=100&fit=crop&crop=face"),
        ("William Taylor", "william.t@school.edu", "10-A", "106", "+1 234-567-8906", "Active",
         "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=100&h=100&fit=crop&crop=face"),
    ];
    for (name, email, class, roll_no, phone, status, avatar) in students {
        state.students.insert(|id| Student {
            id,
            name: name.to_string(),
            email: email.to_string(),
            class: class.to_string(),
            roll_no: roll_no.to_string(),
            phone: phone.to_string(),
            status: status.to_string(),
            avatar: Some(avatar.to_string()),
        });
    }

    let teachers: &[(&str, &str, &str, &str, &str, &[&str])] = &[
        ("Mr. Robert Fox", "robert@school.edu", "Mathematics", "+1 234 567 890", "Active",
         &["9-B", "10-A"]),
        ("Ms. Esther Howard", "esther@school.edu", "English", "+1 234 567 891", "On Leave",
         &["10-B", "11-A"]),
        ("Mr. Cameron Williamson", "cameron@school.edu", "Physics", "+1 234 567 892", "Active",
         &["11-A", "12-A"]),
    ];
    for (name, email, subject, phone, status, classes) in teachers {
        state.teachers.insert(|id| Teacher {
            id,
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            phone: phone.to_string(),
            status: status.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        });
    }

    let results: &[(&str, &str, &str, &str, f64)] = &[
        ("Emma Wilson", "emma.w@school.edu", "10-A", "Mathematics", 98.0),
        ("James Miller", "james.m@school.edu", "9-B", "Mathematics", 67.0),
        ("Sophia Brown", "sophia.b@school.edu", "11-A", "Physics", 34.0),
    ];
    for (name, email, class, subject, marks) in results {
        state.results.insert(|id| ExamResult {
            id,
            name: name.to_string(),
            email: email.to_string(),
            class: class.to_string(),
            subject: subject.to_string(),
            marks: *marks,
            grade: grade_for_marks(*marks),
            status: exam_status(*marks).to_string(),
        });
    }

    let fees: &[(&str, &str, &str, f64, f64, (i32, u32, u32))] = &[
        ("Emma Wilson", "emma.w@school.edu", "10-A", 500.0, 500.0, (2026, 9, 1)),
        ("James Miller", "james.m@school.edu", "9-B", 500.0, 200.0, (2026, 9, 1)),
        ("Sophia Brown", "sophia.b@school.edu", "11-A", 650.0, 0.0, (2026, 9, 15)),
    ];
    for (student, email, class, due, paid, (y, m, d)) in fees {
        let Some(date) = NaiveDate::from_ymd_opt(*y, *m, *d) else {
            continue;
        };
        state.fees.insert(|id| Fee {
            id,
            student: student.to_string(),
            email: email.to_string(),
            class: class.to_string(),
            amount_due: *due,
            amount_paid: *paid,
            due_date: date,
        });
    }

    ok(
        &req.id,
        json!({
            "students": state.students.len(),
            "teachers": state.teachers.len(),
            "results": state.results.len(),
            "fees": state.fees.len(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "demo.seed" => Some(handle_demo_seed(state, req)),
        _ => None,
    }
}
