//! Axum extractors for form submissions
//!
//! Browsers post `application/x-www-form-urlencoded`; API clients may post
//! a flat JSON object instead. Both end up as a [`FormData`].

use axum::Json;
use axum::extract::{Form, FromRequest, Request};
use axum::http::header;
use serde_json::Value;

use crate::core::error::{DashboardError, RequestError};
use crate::core::form::FormData;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Extractor yielding the raw fields of a form submission
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_invoice(
///     State(host): State<Arc<DashboardHost>>,
///     FormInput(form): FormInput,
/// ) -> Response {
///     let outcome = host.actions().create_invoice(&FormState::initial(), &form).await;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FormInput(pub FormData);

impl FormInput {
    pub fn into_inner(self) -> FormData {
        self.0
    }
}

impl std::ops::Deref for FormInput {
    type Target = FormData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequest<S> for FormInput
where
    S: Send + Sync,
{
    type Rejection = DashboardError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with(FORM_CONTENT_TYPE) {
            let Form(pairs): Form<Vec<(String, String)>> = Form::from_request(req, state)
                .await
                .map_err(|e| RequestError::InvalidBody {
                    message: e.body_text(),
                })?;
            return Ok(FormInput(first_value_wins(pairs)));
        }

        if content_type.starts_with(JSON_CONTENT_TYPE) {
            let Json(value): Json<Value> = Json::from_request(req, state)
                .await
                .map_err(|e| RequestError::InvalidBody {
                    message: e.body_text(),
                })?;
            let form = FormData::from_json(value)
                .map_err(|message| RequestError::InvalidBody { message })?;
            return Ok(FormInput(form));
        }

        Err(RequestError::UnsupportedContentType {
            content_type: if content_type.is_empty() {
                "none".to_string()
            } else {
                content_type
            },
        }
        .into())
    }
}

/// Collapse repeated fields the way a browser `FormData.get()` does
fn first_value_wins(pairs: Vec<(String, String)>) -> FormData {
    let mut form = FormData::new();
    for (name, value) in pairs {
        if form.get(&name).is_none() {
            form.insert(name, value);
        }
    }
    form
}
