use std::time::Duration;

use dispatch_lib::config::models::{ExtractorConfig, RetryConfig};
use dispatch_lib::extraction::client::HttpExtractionClient;
use dispatch_lib::extraction::types::{ArgValue, ArgumentSchema, ExtractionError};
use dispatch_lib::extraction::{ArgumentExtractor, FunctionSelector};
use dispatch_lib::registry::FunctionRegistry;
use serde_json::json;
use wiremock::matchers;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn add_schema() -> ArgumentSchema {
    let registry = FunctionRegistry::with_builtins();
    ArgumentSchema::for_function(registry.lookup("add").unwrap())
}

// ---------------------------------------------------------------------------
// Function selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_select_sends_correct_request() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/extract_functions"))
        .and(matchers::header("Content-Type", "application/json"))
        .and(matchers::body_json(json!({
            "text": "add 3 and 4",
            "top_k": 1,
            "threshold": 0.45
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["add"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpExtractionClient::new(&mock_server.uri()).unwrap();
    let names = client.select_functions("add 3 and 4", 1, 0.45).await.unwrap();
    assert_eq!(names, vec!["add"]);
}

#[tokio::test]
async fn test_select_trims_trailing_slash_from_base_url() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::path("/extract_functions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpExtractionClient::new(&format!("{}/", mock_server.uri())).unwrap();
    let names = client.select_functions("hello", 1, 0.45).await.unwrap();
    assert!(names.is_empty());
}

#[tokio::test]
async fn test_select_decodes_string_encoded_payload() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!("[\"multiply\", \"add\"]")),
        )
        .mount(&mock_server)
        .await;

    let client = HttpExtractionClient::new(&mock_server.uri()).unwrap();
    let names = client.select_functions("x", 2, 0.45).await.unwrap();
    assert_eq!(names, vec!["multiply", "add"]);
}

#[tokio::test]
async fn test_select_rejects_invalid_body() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"functions": ["add"]})))
        .mount(&mock_server)
        .await;

    let client = HttpExtractionClient::new(&mock_server.uri()).unwrap();
    let result = client.select_functions("x", 1, 0.45).await;
    assert!(matches!(result, Err(ExtractionError::Decode(_))));
}

#[tokio::test]
async fn test_select_handles_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = HttpExtractionClient::new(&mock_server.uri()).unwrap();
    let result = client.select_functions("x", 1, 0.45).await;
    assert_eq!(
        result,
        Err(ExtractionError::HttpStatus {
            status: 500,
            body: "Internal Server Error".to_string()
        })
    );
}

#[tokio::test]
async fn test_select_handles_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(["add"]))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&mock_server)
        .await;

    let client =
        HttpExtractionClient::with_timeout(&mock_server.uri(), Duration::from_millis(100))
            .unwrap();
    let result = client.select_functions("x", 1, 0.45).await;
    assert!(matches!(result, Err(ExtractionError::Timeout(_))));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Nothing listens on port 9 on the loopback interface.
    let client = HttpExtractionClient::new("http://127.0.0.1:9").unwrap();
    let result = client.select_functions("x", 1, 0.45).await;
    assert!(matches!(result, Err(ExtractionError::Transport(_))));
}

// ---------------------------------------------------------------------------
// Argument extraction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_extract_sends_scoped_schema() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/extract_arguments"))
        .and(matchers::body_json(json!({
            "text": "add 3 and 4",
            "functions_args_dict": {"add": {"a": null, "b": null}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"add": {"a": 3, "b": 4}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpExtractionClient::new(&mock_server.uri()).unwrap();
    let extracted = client
        .extract_arguments("add 3 and 4", &add_schema())
        .await
        .unwrap();
    let args = extracted.for_function("add").unwrap();
    assert_eq!(args.get("a"), Some(&ArgValue::Number(3.0)));
    assert_eq!(args.get("b"), Some(&ArgValue::Number(4.0)));
}

#[tokio::test]
async fn test_extract_rejects_array_body() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::path("/extract_arguments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([3, 4])))
        .mount(&mock_server)
        .await;

    let client = HttpExtractionClient::new(&mock_server.uri()).unwrap();
    let result = client.extract_arguments("add 3 and 4", &add_schema()).await;
    assert!(matches!(result, Err(ExtractionError::Decode(_))));
}

// ---------------------------------------------------------------------------
// Retry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_no_retry_by_default() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpExtractionClient::new(&mock_server.uri()).unwrap();
    let result = client.select_functions("x", 1, 0.45).await;
    assert!(matches!(
        result,
        Err(ExtractionError::HttpStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_retries_transient_status_up_to_limit() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = ExtractorConfig {
        base_url: mock_server.uri(),
        timeout_ms: 5_000,
        retry: RetryConfig {
            max_retries: 2,
            backoff_ms: 1,
        },
    };
    let client = HttpExtractionClient::from_config(&config).unwrap();
    let result = client.select_functions("x", 1, 0.45).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(422).set_body_string("bad request"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpExtractionClient::new(&mock_server.uri())
        .unwrap()
        .with_retry(RetryConfig {
            max_retries: 3,
            backoff_ms: 1,
        });
    let result = client.select_functions("x", 1, 0.45).await;
    assert!(matches!(
        result,
        Err(ExtractionError::HttpStatus { status: 422, .. })
    ));
}

#[tokio::test]
async fn test_retry_recovers_after_transient_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["divide"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpExtractionClient::new(&mock_server.uri())
        .unwrap()
        .with_retry(RetryConfig {
            max_retries: 1,
            backoff_ms: 1,
        });
    let names = client.select_functions("x", 1, 0.45).await.unwrap();
    assert_eq!(names, vec!["divide"]);
}
