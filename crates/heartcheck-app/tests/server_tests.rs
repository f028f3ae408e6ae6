//! Router tests for the form page and the JSON API

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use heartcheck_app::{build_app, AppConfig, AppState};
use heartcheck_classifiers::{Classifier, LoadResult, ModelCache, ProbabilityEstimator};
use heartcheck_core::{Feature, FeatureRecord, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

/// Fixed-output classifier
struct StubClassifier {
    label: i64,
    probability: Option<f64>,
    feature_names: Option<Vec<Feature>>,
}

impl Classifier for StubClassifier {
    fn name(&self) -> &str {
        "stub"
    }

    fn predict(&self, _record: &FeatureRecord) -> Result<i64> {
        Ok(self.label)
    }

    fn feature_names(&self) -> Option<&[Feature]> {
        self.feature_names.as_deref()
    }

    fn probability(&self) -> Option<&dyn ProbabilityEstimator> {
        self.probability.map(|_| self as &dyn ProbabilityEstimator)
    }
}

impl ProbabilityEstimator for StubClassifier {
    fn predict_proba(&self, _record: &FeatureRecord) -> Result<Vec<f64>> {
        let p = self.probability.unwrap_or(0.0);
        Ok(vec![1.0 - p, p])
    }
}

/// Classifier that fails at prediction time
struct BrokenClassifier;

impl Classifier for BrokenClassifier {
    fn name(&self) -> &str {
        "broken"
    }

    fn predict(&self, _record: &FeatureRecord) -> Result<i64> {
        Err(heartcheck_core::Error::classifier("weights are corrupt"))
    }
}

/// Classifier whose record check fails after validation has passed
struct StaleClassifier;

impl Classifier for StaleClassifier {
    fn name(&self) -> &str {
        "stale"
    }

    fn predict(&self, _record: &FeatureRecord) -> Result<i64> {
        Err(heartcheck_core::Error::MissingFeature(Feature::Thal))
    }
}

fn app_with(result: LoadResult) -> Router {
    let cache: &'static ModelCache = Box::leak(Box::new(ModelCache::preloaded("stub.json", result)));
    build_app(AppState::new(AppConfig::default(), cache))
}

fn stub_app(label: i64, probability: Option<f64>) -> Router {
    app_with(LoadResult::Loaded(Arc::new(StubClassifier {
        label,
        probability,
        feature_names: None,
    })))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn example_body() -> serde_json::Value {
    serde_json::json!({
        "age": 55, "trestbps": 130, "chol": 245, "oldpeak": 1.0, "thalach": 150,
        "cp": 1, "exang": 0, "thal": 1, "sex": 1, "ca": 0, "fbs": 0, "restecg": 0, "slope": 1
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(stub_app(0, None), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ok"));
}

#[tokio::test]
async fn test_page_shows_label_probability_and_record() {
    let query = "/?age=55&trestbps=130&chol=245&oldpeak=1.0&thalach=150&cp=1&exang=0&thal=1&sex=1&ca=0&fbs=0&restecg=0&slope=1";
    let (status, body) = send(stub_app(0, Some(0.12)), get(query)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<div class=\"value\" id=\"label\">0</div>"));
    assert!(body.contains("<div class=\"value\" id=\"probability\">0.120</div>"));
    assert!(body.contains("<th>age</th><th>trestbps</th><th>chol</th>"));
    assert!(body.contains("<td>55.0</td><td>130.0</td><td>245.0</td><td>1.0</td><td>150.0</td><td>1</td>"));
}

#[tokio::test]
async fn test_page_without_probability() {
    let (status, body) = send(stub_app(1, None), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("id=\"label\">1</div>"));
    assert!(!body.contains("id=\"probability\""));
}

#[tokio::test]
async fn test_page_warns_when_model_unavailable() {
    let app = app_with(LoadResult::Failed(
        "Error loading model: model file not found: models/final_model.json".to_string(),
    ));
    let (status, body) = send(app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("class=\"warning\">Error loading model: model file not found"));
    assert!(!body.contains("id=\"label\""));
}

#[tokio::test]
async fn test_page_rejects_out_of_domain_input() {
    let (status, body) = send(stub_app(0, Some(0.5)), get("/?age=200")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Invalid input: age out of domain"));
    assert!(body.contains("value=\"200\""));
}

#[tokio::test]
async fn test_page_keeps_rejected_code_selected() {
    let (status, body) = send(stub_app(0, None), get("/?cp=7&age=55")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Invalid input: cp out of domain"));
    assert!(body.contains("<option value=\"7\" selected>7 (not allowed)</option>"));
}

#[tokio::test]
async fn test_page_reports_fields_in_default_order() {
    for _ in 0..8 {
        let (status, body) = send(stub_app(0, None), get("/?slope=9&thal=9&cp=9&chol=abc")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("Invalid input: chol out of domain"));
    }
}

#[tokio::test]
async fn test_page_ignores_unrelated_query_keys() {
    let (status, body) = send(stub_app(1, None), get("/?utm_source=mail&age=61")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("id=\"label\">1</div>"));
}

#[tokio::test]
async fn test_page_window_title_and_heading() {
    let (_, body) = send(stub_app(0, None), get("/")).await;
    assert!(body.contains("<title>Heart Disease Risk App</title>"));
    assert!(body.contains("<h1>Heart Disease Risk - Interactive Demo</h1>"));
}

#[tokio::test]
async fn test_page_prediction_failure_is_a_server_error() {
    let app = app_with(LoadResult::Loaded(Arc::new(BrokenClassifier)));
    let (status, body) = send(app, get("/")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("weights are corrupt"));
}

#[tokio::test]
async fn test_api_predict_end_to_end() {
    let (status, body) = send(stub_app(0, Some(0.12)), post_json("/api/predict", example_body())).await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["label"], 0);
    assert_eq!(json["probability"], 0.12);
    assert_eq!(json["probability_display"], "0.120");
    assert_eq!(json["record"].as_object().unwrap().len(), 13);
}

#[tokio::test]
async fn test_api_predict_follows_declared_order() {
    let mut order = Feature::ALL.to_vec();
    order.reverse();
    let app = app_with(LoadResult::Loaded(Arc::new(StubClassifier {
        label: 1,
        probability: None,
        feature_names: Some(order),
    })));

    let (status, body) = send(app, post_json("/api/predict", example_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""record":{"slope":1,"restecg":0,"#));
    assert!(body.contains(r#""probability":null"#));
}

#[tokio::test]
async fn test_api_predict_missing_field() {
    let mut body = example_body();
    body.as_object_mut().unwrap().remove("thal");

    let (status, body) = send(stub_app(0, None), post_json("/api/predict", body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("missing feature: thal"));
}

#[tokio::test]
async fn test_api_adapter_error_is_a_server_error() {
    let app = app_with(LoadResult::Loaded(Arc::new(StaleClassifier)));
    let (status, body) = send(app, post_json("/api/predict", example_body())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("missing feature: thal"));
}

#[tokio::test]
async fn test_api_predict_unknown_field() {
    let mut body = example_body();
    body.as_object_mut().unwrap().insert("bmi".to_string(), 22.into());

    let (status, body) = send(stub_app(0, None), post_json("/api/predict", body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("unknown feature: bmi"));
}

#[tokio::test]
async fn test_api_predict_model_unavailable() {
    let app = app_with(LoadResult::Failed("Error loading model: gone".to_string()));
    let (status, body) = send(app, post_json("/api/predict", example_body())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Error loading model: gone"));
}

#[tokio::test]
async fn test_api_features() {
    let (status, body) = send(stub_app(0, None), get("/api/features")).await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let features = json.as_array().unwrap();
    assert_eq!(features.len(), 13);
    assert_eq!(features[0]["name"], "age");
    assert_eq!(features[0]["domain"]["type"], "range");
    assert_eq!(features[5]["name"], "cp");
    assert_eq!(features[5]["domain"]["values"], serde_json::json!([1, 2, 3, 4]));
}

#[tokio::test]
async fn test_bundled_model_loads_and_predicts() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/final_model.json");
    let cache: &'static ModelCache = Box::leak(Box::new(ModelCache::new(path)));
    let app = build_app(AppState::new(AppConfig::default(), cache));

    let (status, body) = send(app.clone(), get("/api/model")).await;
    assert_eq!(status, StatusCode::OK);
    let info: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(info["available"], true);
    assert_eq!(info["declared_order"], true);
    assert_eq!(info["probability"], true);
    assert_eq!(info["feature_order"][1], "sex");

    let (status, body) = send(app, post_json("/api/predict", example_body())).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let p = json["probability"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&p));
    assert_eq!(json["label"], i64::from(p >= 0.5));
}
