//! HTTP handlers for the invoice routes

use super::host::DashboardHost;
use crate::core::error::{DashboardError, RequestError};
use crate::core::extractors::FormInput;
use crate::core::invoice::InvoiceRecord;
use crate::core::pipeline::{FormState, MutationError, Outcome};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// Response header telling whether the list came from the view cache
pub const VIEW_CACHE_HEADER: &str = "x-view-cache";

/// Health check endpoint handler
pub async fn health_check(State(host): State<Arc<DashboardHost>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": host.service_name()
    }))
}

/// GET the invoice list page, rendering it only when the cache is cold
pub async fn list_invoices(
    State(host): State<Arc<DashboardHost>>,
) -> Result<Response, DashboardError> {
    let path = host.list_path();

    if let Some(view) = host.cache.get(path).await {
        return Ok(with_cache_header(Html(view.body), "hit"));
    }

    let records = host.store.list().await?;
    let body = host.views.render_invoice_list(path, &records)?;
    tracing::debug!(path, invoices = records.len(), "invoice list rendered");
    host.cache.put(path, body.clone()).await;

    Ok(with_cache_header(Html(body), "miss"))
}

/// GET one invoice, e.g. to prefill the edit form
pub async fn get_invoice(
    State(host): State<Arc<DashboardHost>>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceRecord>, DashboardError> {
    let id = parse_id(&id)?;
    host.store
        .get(&id)
        .await?
        .map(Json)
        .ok_or(DashboardError::NotFound { id })
}

/// POST a new invoice
pub async fn create_invoice(
    State(host): State<Arc<DashboardHost>>,
    FormInput(form): FormInput,
) -> Response {
    let outcome = host
        .actions
        .create_invoice(&FormState::initial(), &form)
        .await;
    outcome_response(outcome)
}

/// PUT/POST an edited invoice
pub async fn update_invoice(
    State(host): State<Arc<DashboardHost>>,
    Path(id): Path<String>,
    FormInput(form): FormInput,
) -> Result<Response, DashboardError> {
    let id = parse_id(&id)?;
    let outcome = host
        .actions
        .update_invoice(&id, &FormState::initial(), &form)
        .await;
    Ok(outcome_response(outcome))
}

/// DELETE an invoice
pub async fn delete_invoice(
    State(host): State<Arc<DashboardHost>>,
    Path(id): Path<String>,
) -> Result<Response, DashboardError> {
    let id = parse_id(&id)?;
    let outcome = host.actions.delete_invoice(&id).await;
    Ok(outcome_response(outcome))
}

/// Map a pipeline outcome onto HTTP
///
/// Redirects become `303 See Other`, a completed delete `204`, validation
/// failures `422` and persistence faults `500`, both with the form state.
pub fn outcome_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Redirect(path) => Redirect::to(&path).into_response(),
        Outcome::Completed => StatusCode::NO_CONTENT.into_response(),
        Outcome::Error(err) => {
            let status = match &err {
                MutationError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                MutationError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(FormState::from(err))).into_response()
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, DashboardError> {
    Uuid::parse_str(raw).map_err(|_| {
        RequestError::InvalidId {
            value: raw.to_string(),
        }
        .into()
    })
}

fn with_cache_header(body: impl IntoResponse, state: &'static str) -> Response {
    let mut response = body.into_response();
    response
        .headers_mut()
        .insert(VIEW_CACHE_HEADER, HeaderValue::from_static(state));
    response
}
