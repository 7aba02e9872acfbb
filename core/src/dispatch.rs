//! Operation dispatcher: from (operation name, argument bag) to envelope.
//!
//! # Design
//! Each dispatch is a stateless transformation. `plan` turns a descriptor
//! plus argument bag into a `Request` without touching the network, in the
//! same build/execute split the rest of the crate uses; `dispatch` runs the
//! plan through the executor and converts every error into a failure
//! envelope at this boundary — the protocol transport never sees a raw
//! error. Dispatches share no mutable state, so any number may be in
//! flight concurrently.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::catalog::{self, Operation, OperationKind};
use crate::client::ApiClient;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::filter::compose_filter;
use crate::http::{HttpMethod, Request};
use crate::query::{build_query, is_truthy, render};

/// Caller-supplied arguments for one invocation.
pub type Args = Map<String, Value>;

/// Dispatches catalog operations against the remote service.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: ApiClient,
}

impl Dispatcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Dispatch one operation and wrap the outcome in an envelope.
    pub async fn dispatch(&self, operation: &str, args: &Args) -> Envelope {
        debug!(operation, "dispatching operation");
        match self.run(operation, args).await {
            Ok(payload) => Envelope::success(payload),
            Err(err) => {
                warn!(operation, error = %err, "operation failed");
                Envelope::failure(&err)
            }
        }
    }

    /// Build the request an operation would execute, without executing it.
    pub fn plan_request(&self, operation: &str, args: &Args) -> Result<Request, Error> {
        plan(lookup(operation)?, args)
    }

    async fn run(&self, operation: &str, args: &Args) -> Result<Value, Error> {
        let op = lookup(operation)?;
        let request = plan(op, args)?;
        let payload = self.client.execute(&request).await?;

        // Delete responses carry no body; report a confirmation instead.
        if matches!(op.kind, OperationKind::Delete) {
            let id = require_id(op, args)?;
            return Ok(Value::String(format!(
                "{} {id} deleted successfully",
                op.label
            )));
        }
        Ok(payload)
    }
}

fn lookup(operation: &str) -> Result<&'static Operation, Error> {
    catalog::lookup(operation)
        .ok_or_else(|| Error::Protocol(format!("unknown operation: {operation}")))
}

/// Build the request for one operation. Pure; no side effects.
fn plan(op: &Operation, args: &Args) -> Result<Request, Error> {
    match op.kind {
        OperationKind::List { default_orderby } => {
            let mut effective = args.clone();
            let composed = compose_filter(args);
            // The composed filter supersedes any raw `filter` argument;
            // the raw expression is already its last fragment.
            if !composed.is_empty() {
                effective.insert("filter".to_string(), Value::String(composed));
            }
            if let Some(orderby) = default_orderby {
                if !args.get("orderby").is_some_and(is_truthy) {
                    effective.insert("orderby".to_string(), Value::String(orderby.to_string()));
                }
            }
            let mut request = Request::new(HttpMethod::Get, op.base_path);
            request.query = build_query(&effective);
            Ok(request)
        }
        OperationKind::GetById => {
            let id = require_id(op, args)?;
            let mut request = Request::new(HttpMethod::Get, format!("{}/{id}", op.base_path));
            if let Some(expand) = args.get("expand") {
                if is_truthy(expand) {
                    request.query.push(("$expand".to_string(), render(expand)));
                }
            }
            Ok(request)
        }
        OperationKind::Create => {
            let mut request = Request::new(HttpMethod::Post, op.base_path);
            request.body = Some(select_body(op, args));
            Ok(request)
        }
        OperationKind::Update => {
            let id = require_id(op, args)?;
            let mut request = Request::new(HttpMethod::Put, format!("{}/{id}", op.base_path));
            request.body = Some(select_body(op, args));
            Ok(request)
        }
        OperationKind::Delete => {
            let id = require_id(op, args)?;
            Ok(Request::new(
                HttpMethod::Delete,
                format!("{}/{id}", op.base_path),
            ))
        }
        OperationKind::BulkStatus { sub_path } => {
            let mut request = Request::new(HttpMethod::Put, format!("{}/{sub_path}", op.base_path));
            // Entry count is capped by the remote service, not here.
            request.body = Some(Value::Object(args.clone()));
            Ok(request)
        }
        OperationKind::History => {
            let id = require_id(op, args)?;
            let mut request = Request::new(
                HttpMethod::Get,
                format!("{}/{id}/statusHistory", op.base_path),
            );
            // Pagination, expand, filter and orderby pass through as given;
            // history listings get no composed filter and no default sort.
            request.query = build_query(args);
            Ok(request)
        }
    }
}

/// Select the declared body fields from the argument bag, in declaration
/// order. Absent fields stay absent so the remote service applies defaults.
fn select_body(op: &Operation, args: &Args) -> Value {
    let mut body = Map::new();
    for field in op.body_fields {
        if let Some(value) = args.get(*field) {
            if !value.is_null() {
                body.insert((*field).to_string(), value.clone());
            }
        }
    }
    Value::Object(body)
}

fn require_id(op: &Operation, args: &Args) -> Result<String, Error> {
    match args.get("id") {
        Some(value) if !value.is_null() => Ok(render(value)),
        _ => Err(Error::Protocol(format!(
            "{} requires an \"id\" argument",
            op.name
        ))),
    }
}
