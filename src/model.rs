use chrono::NaiveDate;
use serde::Serialize;

use crate::merge::Importable;
use crate::sheet::ImportRow;
use crate::store::Keyed;

/// Default status applied when an import row or create call supplies none.
pub const DEFAULT_STATUS: &str = "Active";

/// Marks at or above this are a pass.
pub const PASS_MARK: f64 = 40.0;

pub fn exam_status(marks: f64) -> &'static str {
    if marks >= PASS_MARK {
        "Pass"
    } else {
        "Fail"
    }
}

/// Letter grade band for a marks value, used when an import row carries
/// marks but no grade column.
pub fn grade_for_marks(marks: f64) -> String {
    let g = if marks >= 90.0 {
        "A+"
    } else if marks >= 80.0 {
        "A"
    } else if marks >= 70.0 {
        "B"
    } else if marks >= 60.0 {
        "C"
    } else if marks >= 50.0 {
        "D"
    } else if marks >= PASS_MARK {
        "E"
    } else {
        "F"
    };
    g.to_string()
}

pub fn fee_status(amount_due: f64, amount_paid: f64) -> &'static str {
    if amount_paid >= amount_due {
        "Paid"
    } else {
        "Pending"
    }
}

// Normalized column keys shared by import lookup and template/export
// generation. Multiple accepted spellings map to the same key via
// sheet::normalize_header.
const NAME: &[&str] = &["name"];
const CLASS: &[&str] = &["class"];
const ROLL_NO: &[&str] = &["rollno"];
const PHONE: &[&str] = &["phone"];
const STATUS: &[&str] = &["status"];
const SUBJECT: &[&str] = &["subject"];
const CLASSES: &[&str] = &["classes", "subjects"];
const MARKS: &[&str] = &["marks"];
const GRADE: &[&str] = &["grade"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub class: String,
    pub roll_no: String,
    pub phone: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Keyed for Student {
    fn id(&self) -> i64 {
        self.id
    }
    fn email(&self) -> &str {
        &self.email
    }
}

impl Importable for Student {
    const COLUMNS: &'static [&'static str] =
        &["Name", "Email", "Class", "Roll No", "Phone", "Status"];

    fn template_row() -> Vec<String> {
        vec![
            "John Doe".to_string(),
            "john.doe@school.edu".to_string(),
            "10-A".to_string(),
            "107".to_string(),
            "+1 234-567-8900".to_string(),
            DEFAULT_STATUS.to_string(),
        ]
    }

    fn export_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.class.clone(),
            self.roll_no.clone(),
            self.phone.clone(),
            self.status.clone(),
        ]
    }

    fn from_row(id: i64, email: String, row: &ImportRow) -> Self {
        Student {
            id,
            name: row.text(NAME).unwrap_or_default(),
            email,
            class: row.text(CLASS).unwrap_or_default(),
            roll_no: row.text(ROLL_NO).unwrap_or_default(),
            phone: row.text(PHONE).unwrap_or_default(),
            status: row.text(STATUS).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            avatar: None,
        }
    }

    fn apply_row(&mut self, email: String, row: &ImportRow) {
        // Only fields the row supplies overwrite; id and avatar are never
        // supplied by a spreadsheet and stay as they are.
        self.email = email;
        if let Some(v) = row.text(NAME) {
            self.name = v;
        }
        if let Some(v) = row.text(CLASS) {
            self.class = v;
        }
        if let Some(v) = row.text(ROLL_NO) {
            self.roll_no = v;
        }
        if let Some(v) = row.text(PHONE) {
            self.phone = v;
        }
        if let Some(v) = row.text(STATUS) {
            self.status = v;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub phone: String,
    pub status: String,
    pub classes: Vec<String>,
}

impl Keyed for Teacher {
    fn id(&self) -> i64 {
        self.id
    }
    fn email(&self) -> &str {
        &self.email
    }
}

impl Importable for Teacher {
    const COLUMNS: &'static [&'static str] =
        &["Name", "Email", "Subject", "Phone", "Status", "Classes"];

    fn template_row() -> Vec<String> {
        vec![
            "Ms. Jane Smith".to_string(),
            "jane.smith@school.edu".to_string(),
            "Chemistry".to_string(),
            "+1 234 567 893".to_string(),
            DEFAULT_STATUS.to_string(),
            "10-A, 11-B".to_string(),
        ]
    }

    fn export_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.subject.clone(),
            self.phone.clone(),
            self.status.clone(),
            self.classes.join(", "),
        ]
    }

    fn from_row(id: i64, email: String, row: &ImportRow) -> Self {
        Teacher {
            id,
            name: row.text(NAME).unwrap_or_default(),
            email,
            subject: row.text(SUBJECT).unwrap_or_default(),
            phone: row.text(PHONE).unwrap_or_default(),
            status: row.text(STATUS).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            classes: row.list(CLASSES).unwrap_or_default(),
        }
    }

    fn apply_row(&mut self, email: String, row: &ImportRow) {
        self.email = email;
        if let Some(v) = row.text(NAME) {
            self.name = v;
        }
        if let Some(v) = row.text(SUBJECT) {
            self.subject = v;
        }
        if let Some(v) = row.text(PHONE) {
            self.phone = v;
        }
        if let Some(v) = row.text(STATUS) {
            self.status = v;
        }
        if let Some(v) = row.list(CLASSES) {
            self.classes = v;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub class: String,
    pub subject: String,
    pub marks: f64,
    pub grade: String,
    pub status: String,
}

impl Keyed for ExamResult {
    fn id(&self) -> i64 {
        self.id
    }
    fn email(&self) -> &str {
        &self.email
    }
}

impl Importable for ExamResult {
    const COLUMNS: &'static [&'static str] =
        &["Name", "Email", "Class", "Subject", "Marks", "Grade", "Status"];

    fn template_row() -> Vec<String> {
        vec![
            "John Doe".to_string(),
            "john.doe@school.edu".to_string(),
            "10-A".to_string(),
            "Mathematics".to_string(),
            "72".to_string(),
            "B".to_string(),
            "Pass".to_string(),
        ]
    }

    fn export_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.class.clone(),
            self.subject.clone(),
            crate::sheet::Cell::Number(self.marks).as_text(),
            self.grade.clone(),
            self.status.clone(),
        ]
    }

    fn from_row(id: i64, email: String, row: &ImportRow) -> Self {
        let marks = row.number(MARKS).unwrap_or(0.0);
        ExamResult {
            id,
            name: row.text(NAME).unwrap_or_default(),
            email,
            class: row.text(CLASS).unwrap_or_default(),
            subject: row.text(SUBJECT).unwrap_or_default(),
            marks,
            grade: row.text(GRADE).unwrap_or_else(|| grade_for_marks(marks)),
            status: row
                .text(STATUS)
                .unwrap_or_else(|| exam_status(marks).to_string()),
        }
    }

    fn apply_row(&mut self, email: String, row: &ImportRow) {
        self.email = email;
        if let Some(v) = row.text(NAME) {
            self.name = v;
        }
        if let Some(v) = row.text(CLASS) {
            self.class = v;
        }
        if let Some(v) = row.text(SUBJECT) {
            self.subject = v;
        }
        if let Some(m) = row.number(MARKS) {
            // New marks re-derive grade and pass/fail unless the row also
            // supplies them explicitly.
            self.marks = m;
            self.grade = row.text(GRADE).unwrap_or_else(|| grade_for_marks(m));
            self.status = row
                .text(STATUS)
                .unwrap_or_else(|| exam_status(m).to_string());
        } else {
            if let Some(v) = row.text(GRADE) {
                self.grade = v;
            }
            if let Some(v) = row.text(STATUS) {
                self.status = v;
            }
        }
    }
}

/// Fee records are not importable; they are created and settled through the
/// fees handler and their status is always derived from the amounts.
#[derive(Debug, Clone)]
pub struct Fee {
    pub id: i64,
    pub student: String,
    pub email: String,
    pub class: String,
    pub amount_due: f64,
    pub amount_paid: f64,
    pub due_date: NaiveDate,
}

impl Fee {
    pub fn status(&self) -> &'static str {
        fee_status(self.amount_due, self.amount_paid)
    }
}

impl Keyed for Fee {
    fn id(&self) -> i64 {
        self.id
    }
    fn email(&self) -> &str {
        &self.email
    }
}

/// Signup/login stub account. Passwords are stored and compared in
/// plaintext, as in the prototype this replaces.
#[derive(Debug, Clone)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}
