use crate::catalogue::catalogue;
use crate::evaluate::{evaluate, Outcome};
use crate::server::page;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use heartcheck_classifiers::{LoadResult, Prediction};
use heartcheck_core::{Error, Feature, FeatureInputs, FeatureRecord};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, error};

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================================
// Form page
// ============================================================================

/// Render the form and, when the model is available, a prediction
///
/// The form submits back to this route, so every interaction is a full
/// re-evaluation from the query string.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let titles = page::Titles {
        window: &state.config.window_title,
        heading: &state.config.page_title,
    };
    let (inputs, parse_error) = form_inputs(&params);

    let outcome = match parse_error {
        Some(e) => Outcome::InvalidInput(e.to_string()),
        None => match evaluate(state.load_result(), &inputs) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Prediction failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(page::render_failure(titles, &e.to_string())),
                )
                    .into_response();
            }
        },
    };

    let status = match outcome {
        Outcome::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };
    (status, Html(page::render(titles, &inputs, &outcome))).into_response()
}

/// Form defaults overlaid with the query string
///
/// Fields are read in default order so the first reported error is stable.
/// Keys that name no field are ignored.
fn form_inputs(params: &HashMap<String, String>) -> (FeatureInputs, Option<Error>) {
    let mut inputs = FeatureInputs::defaults();
    let mut first_error = None;

    for feature in Feature::ALL {
        let Some(raw) = params.get(feature.name()) else {
            continue;
        };
        let parsed = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::out_of_domain(feature, format!("'{}' is not a number", raw)))
            .and_then(|number| feature.coerce(number));
        match parsed {
            Ok(value) => {
                inputs.set(feature, value);
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    let ignored: Vec<&str> = params
        .keys()
        .map(String::as_str)
        .filter(|key| key.parse::<Feature>().is_err())
        .collect();
    if !ignored.is_empty() {
        debug!(keys = ?ignored, "Ignoring query parameters that name no field");
    }

    (inputs, first_error)
}

// ============================================================================
// JSON API
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub label: i64,
    pub probability: Option<f64>,
    pub probability_display: Option<String>,
    pub record: FeatureRecord,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            label: prediction.label,
            probability: prediction.probability,
            probability_display: prediction.probability_display(),
            record: prediction.record,
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// Predict from a JSON object holding all thirteen fields
pub async fn predict(
    State(state): State<AppState>,
    Json(raw): Json<HashMap<String, f64>>,
) -> Response {
    let inputs = match FeatureInputs::from_raw(raw) {
        Ok(inputs) => inputs,
        Err(e) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    };

    match evaluate(state.load_result(), &inputs) {
        Ok(Outcome::Predicted(prediction)) => Json(PredictResponse::from(prediction)).into_response(),
        Ok(Outcome::InvalidInput(message)) => error_response(StatusCode::UNPROCESSABLE_ENTITY, message),
        Ok(Outcome::ModelUnavailable(message)) => error_response(StatusCode::SERVICE_UNAVAILABLE, message),
        Err(e) => {
            error!(error = %e, "Prediction failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub async fn list_features() -> impl IntoResponse {
    Json(catalogue())
}

pub async fn model_info(State(state): State<AppState>) -> impl IntoResponse {
    match state.load_result() {
        LoadResult::Loaded(classifier) => {
            let order: Vec<&str> = classifier
                .feature_names()
                .unwrap_or(&Feature::ALL)
                .iter()
                .map(|f| f.name())
                .collect();
            Json(serde_json::json!({
                "available": true,
                "path": state.model.path().display().to_string(),
                "name": classifier.name(),
                "version": classifier.version(),
                "declared_order": classifier.feature_names().is_some(),
                "feature_order": order,
                "probability": classifier.probability().is_some(),
            }))
        }
        LoadResult::Failed(message) => Json(serde_json::json!({
            "available": false,
            "path": state.model.path().display().to_string(),
            "error": message,
        })),
    }
}
