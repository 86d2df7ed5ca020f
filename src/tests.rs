use httpmock::MockServer;
use serde_json::json;
use url::Url;

use crate::args::{RawOptions, ResourceArgs};
use crate::client::ApiClient;
use crate::error::{CliError, MissingOption};
use crate::resources::{BRANDS, CARS};
use crate::run_resource;

fn client(base: &str) -> ApiClient {
    ApiClient::new(Url::parse(base).expect("url")).expect("client")
}

fn args(action: &[&str], options: RawOptions) -> ResourceArgs {
    ResourceArgs {
        action: action.iter().map(ToString::to_string).collect(),
        options,
    }
}

async fn run(
    server_base: &str,
    action: &[&str],
    options: RawOptions,
) -> (String, Result<(), CliError>) {
    let mut out = Vec::new();
    let result = run_resource(
        &client(server_base),
        &BRANDS,
        args(action, options),
        &mut out,
    )
    .await;
    (String::from_utf8(out).expect("utf8"), result)
}

#[tokio::test]
async fn list_sends_stripped_sort_and_numbers() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/brands")
            .query_param("sort", "-name,+id")
            .query_param("page", "2")
            .query_param("limit", "10");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"id":"1","name":"Audi"}]"#);
    });

    let (out, result) = run(
        &server.base_url(),
        &[],
        RawOptions {
            sort: Some("[-name,+id]".into()),
            page: Some("2".into()),
            limit: Some("10".into()),
            ..RawOptions::default()
        },
    )
    .await;

    result.expect("list");
    mock.assert();
    assert!(out.contains("\"name\": \"Audi\""));
}

#[tokio::test]
async fn list_with_id_fetches_single_item_below_base_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/api/brands/42");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":"42"}"#);
    });

    let (out, result) = run(
        &server.url("/api"),
        &[],
        RawOptions {
            id: Some("42".into()),
            ..RawOptions::default()
        },
    )
    .await;

    result.expect("get");
    mock.assert();
    assert_eq!(out, "{\n  \"id\": \"42\"\n}\n");
}

#[tokio::test]
async fn create_posts_json_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/cars")
            .json_body(json!({"name": "A4", "brandId": "1"}));
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"id":"9","name":"A4","brandId":"1"}"#);
    });

    let mut out = Vec::new();
    run_resource(
        &client(&server.base_url()),
        &CARS,
        args(
            &["create"],
            RawOptions {
                body: Some(r#"{"name":"A4","brandId":"1"}"#.into()),
                ..RawOptions::default()
            },
        ),
        &mut out,
    )
    .await
    .expect("create");

    mock.assert();
    assert!(String::from_utf8(out).expect("utf8").contains("\"id\": \"9\""));
}

#[tokio::test]
async fn update_patches_item() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("PATCH")
            .path("/brands/7")
            .json_body(json!({"name": "x"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":"7","name":"x"}"#);
    });

    let (_, result) = run(
        &server.base_url(),
        &["update"],
        RawOptions {
            id: Some("7".into()),
            body: Some(r#"{"name":"x"}"#.into()),
            ..RawOptions::default()
        },
    )
    .await;

    result.expect("update");
    mock.assert();
}

#[tokio::test]
async fn delete_no_content_prints_ok() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("DELETE").path("/brands/7");
        then.status(204);
    });

    let (out, result) = run(
        &server.base_url(),
        &["delete"],
        RawOptions {
            id: Some("7".into()),
            ..RawOptions::default()
        },
    )
    .await;

    result.expect("delete");
    mock.assert();
    assert_eq!(out, "OK\n");
}

#[tokio::test]
async fn delete_with_body_prints_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("DELETE").path("/brands/7");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":"7"}"#);
    });

    let (out, result) = run(
        &server.base_url(),
        &["delete"],
        RawOptions {
            id: Some("7".into()),
            ..RawOptions::default()
        },
    )
    .await;

    result.expect("delete");
    mock.assert();
    assert_eq!(out, "{\n  \"id\": \"7\"\n}\n");
}

#[tokio::test]
async fn server_message_is_surfaced_on_failure() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/brands/404");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"statusCode":404,"message":"not found","error":"Not Found"}"#);
    });

    let (out, result) = run(
        &server.base_url(),
        &[],
        RawOptions {
            id: Some("404".into()),
            ..RawOptions::default()
        },
    )
    .await;

    mock.assert();
    assert!(out.is_empty());
    match result.expect_err("remote failure") {
        CliError::Remote { message } => assert_eq!(message, "not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn connection_failure_is_a_remote_error() {
    let (_, result) = run("http://127.0.0.1:1", &[], RawOptions::default()).await;
    let err = result.expect_err("connection refused");
    assert!(matches!(err, CliError::Remote { .. }));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn validation_errors_short_circuit_before_any_request() {
    let server = MockServer::start();
    let base = server.base_url();

    let (_, result) = run(&base, &["create", "update"], RawOptions::default()).await;
    assert!(matches!(result, Err(CliError::ArgumentValidation { .. })));

    let (_, result) = run(
        &base,
        &["create"],
        RawOptions {
            body: Some("{oops".into()),
            ..RawOptions::default()
        },
    )
    .await;
    assert!(matches!(result, Err(CliError::BodyParse(_))));

    let (_, result) = run(&base, &["delete"], RawOptions::default()).await;
    assert!(matches!(
        result,
        Err(CliError::Precondition(MissingOption::Id))
    ));
}
