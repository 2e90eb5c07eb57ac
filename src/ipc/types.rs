use serde::Deserialize;

use crate::model::{ExamResult, Fee, Student, Teacher, User};
use crate::store::Store;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Everything the daemon holds. Collections live here for the lifetime of
/// the process; there is no durable storage behind them.
pub struct AppState {
    pub students: Store<Student>,
    pub teachers: Store<Teacher>,
    pub results: Store<ExamResult>,
    pub fees: Store<Fee>,
    pub users: Vec<User>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            students: Store::new(),
            teachers: Store::new(),
            results: Store::new(),
            fees: Store::new(),
            users: Vec::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}
