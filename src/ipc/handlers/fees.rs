use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{param_f64, param_i64, param_str};
use crate::ipc::types::{AppState, Request};
use crate::model::Fee;
use chrono::NaiveDate;
use serde_json::json;

fn fee_json(fee: &Fee) -> serde_json::Value {
    json!({
        "id": fee.id,
        "student": fee.student,
        "email": fee.email,
        "class": fee.class,
        "amountDue": fee.amount_due,
        "amountPaid": fee.amount_paid,
        "dueDate": fee.due_date.format("%Y-%m-%d").to_string(),
        "status": fee.status(),
    })
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let fees = state.fees.all().iter().map(fee_json).collect::<Vec<_>>();
    let collected: f64 = state.fees.all().iter().map(|f| f.amount_paid).sum();
    let pending: f64 = state
        .fees
        .all()
        .iter()
        .map(|f| (f.amount_due - f.amount_paid).max(0.0))
        .sum();
    ok(
        &req.id,
        json!({ "fees": fees, "totalCollected": collected, "totalPending": pending }),
    )
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (Some(student), Some(email), Some(amount_due)) = (
        param_str(&req.params, "student"),
        param_str(&req.params, "email"),
        param_f64(&req.params, "amountDue"),
    ) else {
        return err(
            &req.id,
            "bad_params",
            "missing params.student, params.email or params.amountDue",
            None,
        );
    };
    let Some(due_date) = param_str(&req.params, "dueDate")
        .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
    else {
        return err(&req.id, "bad_params", "params.dueDate must be YYYY-MM-DD", None);
    };

    let class = param_str(&req.params, "class").unwrap_or_default();
    let amount_paid = param_f64(&req.params, "amountPaid").unwrap_or(0.0);
    let created = state.fees.insert(|id| Fee {
        id,
        student,
        email,
        class,
        amount_due,
        amount_paid,
        due_date,
    });
    ok(&req.id, json!({ "feeId": created.id, "status": created.status() }))
}

/// Adds a payment to a fee record. Status is always re-derived from the
/// amounts, never stored.
fn handle_record_payment(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(id) = param_i64(&req.params, "id") else {
        return err(&req.id, "bad_params", "missing params.id", None);
    };
    let Some(amount) = param_f64(&req.params, "amount").filter(|a| *a > 0.0) else {
        return err(&req.id, "bad_params", "params.amount must be a positive number", None);
    };

    if !state.fees.update(id, |f| f.amount_paid += amount) {
        return err(&req.id, "not_found", format!("no fee record with id {}", id), None);
    }
    match state.fees.get(id) {
        Some(fee) => ok(&req.id, fee_json(fee)),
        None => err(&req.id, "not_found", format!("no fee record with id {}", id), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "fees.list" => Some(handle_list(state, req)),
        "fees.create" => Some(handle_create(state, req)),
        "fees.recordPayment" => Some(handle_record_payment(state, req)),
        _ => None,
    }
}
