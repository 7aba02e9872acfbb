//! Static catalog of dispatchable operations.
//!
//! # Design
//! One `Operation` descriptor per supported action, with a tagged
//! `OperationKind` so the dispatcher can match exhaustively instead of
//! branching on strings. The table is declarative data: resource paths,
//! default sort orders, and create/update body field lists (selected from
//! the argument bag in declaration order). Built once, read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

/// What kind of request an operation maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// `GET {base}` with query parameters and a composed filter.
    List {
        /// Sort order applied only when the caller supplies none.
        default_orderby: Option<&'static str>,
    },
    /// `GET {base}/{id}`, `expand` being the only allowed query parameter.
    GetById,
    /// `POST {base}` with the declared body-field subset.
    Create,
    /// `PUT {base}/{id}` with the declared body-field subset.
    Update,
    /// `DELETE {base}/{id}`; success yields a textual confirmation.
    Delete,
    /// `PUT {base}/{sub_path}` with the literal argument bag as body.
    BulkStatus { sub_path: &'static str },
    /// `GET {base}/{id}/statusHistory` with plain query parameters.
    History,
}

/// Immutable descriptor for one operation.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    /// Human-readable resource label used in confirmation messages.
    pub label: &'static str,
    pub base_path: &'static str,
    pub kind: OperationKind,
    /// Body fields for create/update, in the order they are sent.
    pub body_fields: &'static [&'static str],
}

const fn op(
    name: &'static str,
    label: &'static str,
    base_path: &'static str,
    kind: OperationKind,
    body_fields: &'static [&'static str],
) -> Operation {
    Operation {
        name,
        label,
        base_path,
        kind,
        body_fields,
    }
}

const CUSTOMER_FIELDS: &[&str] = &[
    "name",
    "active",
    "relationId",
    "paymentPeriod",
    "hourlyRate",
    "notes",
];

const PROJECT_FIELDS: &[&str] = &[
    "name",
    "active",
    "code",
    "color",
    "notes",
    "customerId",
    "managerId",
    "startDate",
    "endDate",
    "hourlyRate",
    "budgetHours",
];

const TASK_FIELDS: &[&str] = &["name", "active", "billable", "hourlyRate"];

const TIME_ENTRY_FIELDS: &[&str] = &[
    "userId",
    "customerId",
    "projectId",
    "taskId",
    "date",
    "start",
    "end",
    "hours",
    "notes",
    "billable",
];

const EXPENSE_FIELDS: &[&str] = &[
    "userId",
    "customerId",
    "projectId",
    "date",
    "category",
    "notes",
    "quantity",
    "rate",
    "billable",
    "vendor",
];

const MILEAGE_FIELDS: &[&str] = &[
    "userId",
    "customerId",
    "projectId",
    "vehicleId",
    "date",
    "fromAddress",
    "toAddress",
    "distance",
    "billable",
    "type",
    "notes",
];

use OperationKind::{BulkStatus, Create, Delete, GetById, History, List, Update};

/// Every operation the dispatcher supports.
static CATALOG: &[Operation] = &[
    // Users (read-only).
    op("get_users", "User", "/users", List { default_orderby: Some("displayName") }, &[]),
    op("get_user_by_id", "User", "/users", GetById, &[]),
    // Customers.
    op("get_customers", "Customer", "/customers", List { default_orderby: Some("name") }, &[]),
    op("get_customer_by_id", "Customer", "/customers", GetById, &[]),
    op("create_customer", "Customer", "/customers", Create, CUSTOMER_FIELDS),
    op("update_customer", "Customer", "/customers", Update, CUSTOMER_FIELDS),
    op("delete_customer", "Customer", "/customers", Delete, &[]),
    // Projects.
    op("get_projects", "Project", "/projects", List { default_orderby: Some("name") }, &[]),
    op("get_project_by_id", "Project", "/projects", GetById, &[]),
    op("create_project", "Project", "/projects", Create, PROJECT_FIELDS),
    op("update_project", "Project", "/projects", Update, PROJECT_FIELDS),
    op("delete_project", "Project", "/projects", Delete, &[]),
    // Tasks.
    op("get_tasks", "Task", "/tasks", List { default_orderby: Some("name") }, &[]),
    op("get_task_by_id", "Task", "/tasks", GetById, &[]),
    op("create_task", "Task", "/tasks", Create, TASK_FIELDS),
    op("update_task", "Task", "/tasks", Update, TASK_FIELDS),
    op("delete_task", "Task", "/tasks", Delete, &[]),
    // Time entries.
    op("get_time_entries", "Time entry", "/timeEntries", List { default_orderby: Some("date desc") }, &[]),
    op("get_time_entry_by_id", "Time entry", "/timeEntries", GetById, &[]),
    op("create_time_entry", "Time entry", "/timeEntries", Create, TIME_ENTRY_FIELDS),
    op("update_time_entry", "Time entry", "/timeEntries", Update, TIME_ENTRY_FIELDS),
    op("delete_time_entry", "Time entry", "/timeEntries", Delete, &[]),
    // Expenses.
    op("get_expenses", "Expense", "/expenses", List { default_orderby: Some("date desc") }, &[]),
    op("get_expense_by_id", "Expense", "/expenses", GetById, &[]),
    op("create_expense", "Expense", "/expenses", Create, EXPENSE_FIELDS),
    op("update_expense", "Expense", "/expenses", Update, EXPENSE_FIELDS),
    op("delete_expense", "Expense", "/expenses", Delete, &[]),
    op("update_expenses_status", "Expense", "/expenses", BulkStatus { sub_path: "status" }, &[]),
    op("update_expenses_client_status", "Expense", "/expenses", BulkStatus { sub_path: "clientStatus" }, &[]),
    op("get_expense_status_history", "Expense", "/expenses", History, &[]),
    // Mileage.
    op("get_mileage", "Mileage", "/mileage", List { default_orderby: Some("date desc") }, &[]),
    op("get_mileage_by_id", "Mileage", "/mileage", GetById, &[]),
    op("create_mileage", "Mileage", "/mileage", Create, MILEAGE_FIELDS),
    op("update_mileage", "Mileage", "/mileage", Update, MILEAGE_FIELDS),
    op("delete_mileage", "Mileage", "/mileage", Delete, &[]),
    op("update_mileage_status", "Mileage", "/mileage", BulkStatus { sub_path: "status" }, &[]),
    op("update_mileage_client_status", "Mileage", "/mileage", BulkStatus { sub_path: "clientStatus" }, &[]),
    op("get_mileage_status_history", "Mileage", "/mileage", History, &[]),
];

fn index() -> &'static HashMap<&'static str, &'static Operation> {
    static INDEX: OnceLock<HashMap<&'static str, &'static Operation>> = OnceLock::new();
    INDEX.get_or_init(|| CATALOG.iter().map(|op| (op.name, op)).collect())
}

/// Look up an operation by name.
pub fn lookup(name: &str) -> Option<&'static Operation> {
    index().get(name).copied()
}

/// Iterate over every operation, in catalog order. Used by the protocol
/// layer to enumerate the available actions.
pub fn operations() -> impl Iterator<Item = &'static Operation> {
    CATALOG.iter()
}
