use reqwest::StatusCode;
use serde_json::{json, Value};

use shelfwatch_inventory::FlagSummary;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = shelfwatch_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// POST a batch and unwrap the string envelope into JSON.
async fn classify(server: &TestServer, body: Value) -> Value {
    let req = reqwest::Client::new()
        .post(format!("{}/productos", server.base_url))
        .json(&body);
    unwrap_envelope(req).await
}

async fn unwrap_envelope(req: reqwest::RequestBuilder) -> Value {
    let res = req.send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));

    let envelope: Value = res.json().await.unwrap();
    let inner = envelope["return"].as_str().expect("envelope carries a string");
    serde_json::from_str(inner).unwrap()
}

fn products() -> Value {
    json!([
        {"_id": "A1", "customerData": {"FechaVencimiento": "2024-01-10", "DiasRetiro": 5}, "mbData": {}},
        {"_id": "B2", "customerData": {"FechaVencimiento": "2024-01-03"}, "mbData": {}},
        {"_id": "C3", "customerData": {"FechaVencimiento": "2024-03-01", "DiasRetiro": 10}, "mbData": {}}
    ])
}

#[tokio::test]
async fn root_and_health_respond() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let info: Value = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(info["status"], "ok");
    assert_eq!(info["endpoint"], "/productos");
}

#[tokio::test]
async fn classifies_a_structured_batch() {
    let server = TestServer::spawn().await;
    let out = classify(&server, json!({"productosJson": products(), "hoyISO": "2024-01-06"})).await;

    assert_eq!(out["approaching"].as_array().unwrap().len(), 1);
    assert_eq!(out["approaching"][0]["_id"], "A1");
    assert_eq!(out["approaching"][0]["computed"]["status"], "CRITICAL");
    assert_eq!(out["approaching"][0]["computed"]["formattedWithdrawal"], "05-01-2024");

    assert_eq!(out["expired"].as_array().unwrap().len(), 1);
    assert_eq!(out["expired"][0]["_id"], "B2");
    assert_eq!(out["expired"][0]["computed"]["daysRemaining"], -3);

    let summary = FlagSummary::decode(out["flagSummary"].as_str().unwrap()).unwrap();
    assert_eq!(summary.to_text(), "id;flag\nA1;true\nB2;true\nC3;false");
}

#[tokio::test]
async fn json_text_and_table_payloads_match_structured_payload() {
    let server = TestServer::spawn().await;
    let expected = classify(&server, json!({"productosJson": products(), "hoyISO": "2024-01-06"})).await;

    let as_text = classify(
        &server,
        json!({"productosJson": products().to_string(), "hoyISO": "2024-01-06"}),
    )
    .await;
    assert_eq!(as_text, expected);

    let table = [
        "_id;customerData;mbData",
        r#"A1;"{""FechaVencimiento"":""2024-01-10"",""DiasRetiro"":5}";{}"#,
        r#"B2;"{""FechaVencimiento"":""2024-01-03""}";{}"#,
        r#"C3;{""FechaVencimiento"":""2024-03-01"",""DiasRetiro"":10};{}"#,
    ]
    .join("\n");
    let as_table = classify(&server, json!({"productosJson": table, "hoyISO": "2024-01-06"})).await;
    assert_eq!(as_table, expected);
}

#[tokio::test]
async fn failures_come_back_inside_the_envelope() {
    let server = TestServer::spawn().await;

    let out = classify(&server, json!({"productosJson": null, "hoyISO": "2024-01-06"})).await;
    assert_eq!(out["error"], "unrecognized_format");

    let out = classify(&server, json!({"productosJson": products(), "hoyISO": "someday"})).await;
    assert_eq!(out["error"], "invalid_reference_date");

    let out = classify(
        &server,
        json!({
            "productosJson": [{"_id": "X9", "customerData": {"FechaVencimiento": "2024-01-10", "DiasRetiro": 1.5}}],
            "hoyISO": "2024-01-06"
        }),
    )
    .await;
    assert_eq!(out["error"], "invalid_lead_time");
    assert!(out["message"].as_str().unwrap().contains("X9"));
    assert!(out.get("approaching").is_none());

    let out = classify(&server, json!({"productosJson": "{bad json", "hoyISO": "2024-01-06"})).await;
    assert_eq!(out["error"], "unrecognized_format");
}

#[tokio::test]
async fn unreadable_bodies_still_get_an_envelope() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let out = classify(&server, json!({"productosJson": [], "hoyISO": 20240106})).await;
    assert_eq!(out["error"], "invalid_reference_date");
    assert!(out["message"].as_str().unwrap().contains("20240106"));

    let out = unwrap_envelope(
        client
            .post(format!("{}/productos", server.base_url))
            .header("content-type", "application/json")
            .body("{not json"),
    )
    .await;
    assert_eq!(out["error"], "unrecognized_format");

    let out = unwrap_envelope(
        client
            .post(format!("{}/productos", server.base_url))
            .body("productosJson=[]"),
    )
    .await;
    assert_eq!(out["error"], "unrecognized_format");

    let out = classify(&server, json!(["not", "an", "object"])).await;
    assert_eq!(out["error"], "unrecognized_format");
}
