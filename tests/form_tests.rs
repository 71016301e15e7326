mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};

use cipherform::form::fields::FieldSet;
use cipherform::form::render::prettify;
use cipherform::form::sinks::{MemoryNotifier, MemorySink};
use cipherform::form::{FieldSpec, FormDescriptor, FormEngine, ResultSink, SubmitOutcome};

// ── Prettify ────────────────────────────────────────────────────

#[test]
fn prettify_title_cases_underscored_keys() {
    assert_eq!(prettify("some_field"), "Some Field");
    assert_eq!(prettify("a_b_c"), "A B C");
    assert_eq!(prettify("public_key"), "Public Key");
}

#[test]
fn prettify_without_underscore_touches_only_the_first_character() {
    assert_eq!(prettify("status"), "Status");
    assert_eq!(prettify("widGET"), "WidGET");
}

// ── Field encoding ──────────────────────────────────────────────

#[test]
fn field_sets_encode_in_declaration_order() {
    let fields = FieldSet::new(vec![
        ("name".to_string(), "Alice".to_string()),
        ("age".to_string(), "30".to_string()),
    ]);
    assert_eq!(fields.encode(), "name=Alice&age=30");
}

#[test]
fn field_set_encoding_escapes_values() {
    let fields = FieldSet::new(vec![("q".to_string(), "a b&c=d".to_string())]);
    assert_eq!(fields.encode(), "q=a+b%26c%3Dd");
}

// ── Submission cycle ────────────────────────────────────────────

#[tokio::test]
async fn submit_renders_the_prettified_response() {
    let app = common::spawn_app().await;
    let notifier = Arc::new(MemoryNotifier::new());
    let sink = Arc::new(MemorySink::new());

    let mut engine = FormEngine::new(app.base_url(), notifier.clone());
    engine.register(
        FormDescriptor::new(
            "keygen",
            "/keygen",
            vec![FieldSpec::with_default("num_bits", "128")],
        ),
        sink.clone(),
    );

    let outcome = engine.submit("keygen").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Rendered);

    let text = sink.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Public Key: "));
    assert!(lines[1].starts_with("Private Key: "));
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn success_resets_fields_to_their_defaults() {
    let app = common::spawn_app().await;
    let notifier = Arc::new(MemoryNotifier::new());
    let sink = Arc::new(MemorySink::new());

    let mut engine = FormEngine::new(app.base_url(), notifier.clone());
    engine.register(
        FormDescriptor::new(
            "keygen",
            "/keygen",
            vec![FieldSpec::with_default("num_bits", "128")],
        ),
        sink.clone(),
    );

    engine.set_field("keygen", "num_bits", "64").unwrap();
    let outcome = engine.submit("keygen").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Rendered);

    assert_eq!(
        engine.field_values("keygen").unwrap(),
        vec![("num_bits".to_string(), "128".to_string())]
    );
}

#[tokio::test]
async fn error_responses_render_and_keep_the_fields() {
    let app = common::spawn_app().await;
    let notifier = Arc::new(MemoryNotifier::new());
    let sink = Arc::new(MemorySink::new());

    let mut engine = FormEngine::new(app.base_url(), notifier.clone());
    engine.register(
        FormDescriptor::new(
            "encrypt",
            "/encrypt",
            vec![
                FieldSpec::with_default("message", "hi"),
                FieldSpec::with_default("key", "badkey"),
            ],
        ),
        sink.clone(),
    );

    let outcome = engine.submit("encrypt").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Rendered);
    assert_eq!(sink.text(), "Error: `badkey` is not a valid key");

    // Non-success status leaves the fields as they were.
    assert_eq!(
        engine.field_values("encrypt").unwrap(),
        vec![
            ("message".to_string(), "hi".to_string()),
            ("key".to_string(), "badkey".to_string()),
        ]
    );
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn transport_failure_notifies_and_releases_the_form() {
    let notifier = Arc::new(MemoryNotifier::new());
    let sink = Arc::new(MemorySink::new());

    // Nothing listens on the discard port.
    let mut engine = FormEngine::new("http://127.0.0.1:9", notifier.clone());
    engine.register(FormDescriptor::new("keygen", "/keygen", vec![]), sink.clone());

    sink.replace("previous content");

    let outcome = engine.submit("keygen").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Notified);
    assert_eq!(sink.text(), "previous content");
    assert_eq!(notifier.messages().len(), 1);

    // The in-flight flag was released: the next submit runs a full cycle
    // again instead of reporting Busy.
    let outcome = engine.submit("keygen").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Notified);
    assert_eq!(notifier.messages().len(), 2);
}

#[tokio::test]
async fn undecodable_body_notifies_without_touching_the_sink() {
    let plain = Router::new().route("/plain", get(|| async { "not json" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, plain).await.unwrap();
    });

    let notifier = Arc::new(MemoryNotifier::new());
    let sink = Arc::new(MemorySink::new());

    let mut engine = FormEngine::new(format!("http://{addr}"), notifier.clone());
    engine.register(
        FormDescriptor::new(
            "plain",
            "/plain",
            vec![FieldSpec::with_default("q", "something")],
        ),
        sink.clone(),
    );
    engine.set_field("plain", "q", "changed").unwrap();

    let outcome = engine.submit("plain").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Notified);
    assert_eq!(sink.text(), "");
    assert_eq!(notifier.messages().len(), 1);

    // The status was a success, so the fields were already cleared before
    // the body decode failed.
    assert_eq!(
        engine.field_values("plain").unwrap(),
        vec![("q".to_string(), "something".to_string())]
    );
}

#[tokio::test]
async fn overlapping_submits_for_the_same_form_are_busy() {
    let slow = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(serde_json::json!({ "status": "ok" }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, slow).await.unwrap();
    });

    let notifier = Arc::new(MemoryNotifier::new());
    let sink = Arc::new(MemorySink::new());

    let mut engine = FormEngine::new(format!("http://{addr}"), notifier.clone());
    engine.register(FormDescriptor::new("slow", "/slow", vec![]), sink.clone());
    let engine = Arc::new(engine);

    let first = tokio::spawn({
        let engine = engine.clone();
        async move { engine.submit("slow").await.unwrap() }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let second = engine.submit("slow").await.unwrap();
    assert_eq!(second, SubmitOutcome::Busy);

    assert_eq!(first.await.unwrap(), SubmitOutcome::Rendered);
    assert_eq!(sink.text(), "Status: ok");
}

#[tokio::test]
async fn unknown_forms_are_an_error() {
    let notifier = Arc::new(MemoryNotifier::new());
    let engine = FormEngine::new("http://127.0.0.1:9", notifier);

    let err = engine.submit("nope").await.unwrap_err();
    assert!(err.message.contains("unknown form"));
}
