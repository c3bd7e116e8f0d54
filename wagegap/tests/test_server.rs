use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use wagegap::cleaning::clean;
use wagegap::domain::MissingPolicy;
use wagegap::server::{router, AppState};

const SAMPLE: &str = include_str!("fixtures/gss_sample.csv");

async fn spawn_dashboard(policy: MissingPolicy) -> SocketAddr {
    let table = clean(SAMPLE).expect("Failed to clean sample");
    let state = Arc::new(AppState::build(table, policy, false));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.ok();
    });
    addr
}

async fn get_json(url: &str) -> (u16, serde_json::Value) {
    let response = reqwest::get(url).await.expect("Request failed");
    let status = response.status().as_u16();
    let body = response.json().await.expect("Invalid JSON body");
    (status, body)
}

#[tokio::test]
async fn test_index_serves_page() {
    let addr = spawn_dashboard(MissingPolicy::Drop).await;
    let response = reqwest::get(format!("http://{addr}/")).await.expect("Request failed");
    assert_eq!(response.status().as_u16(), 200);

    let page = response.text().await.expect("No body");
    assert!(page.contains("Exploration of the Gender Wage Gap"));
    assert!(page.contains("plotly"));
    assert!(page.contains(r#"<select id="x-axis">"#));
}

#[tokio::test]
async fn test_options_lists_fields() {
    let addr = spawn_dashboard(MissingPolicy::Drop).await;
    let (status, body) = get_json(&format!("http://{addr}/api/options")).await;

    assert_eq!(status, 200);
    assert_eq!(body["x_fields"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["group_fields"], serde_json::json!(["sex", "region", "education"]));
    assert_eq!(body["defaults"]["x"], "male_breadwinner");
    assert_eq!(body["defaults"]["group"], "sex");
    assert_eq!(body["missing_as_category"], false);
}

#[tokio::test]
async fn test_static_figures_by_name() {
    let addr = spawn_dashboard(MissingPolicy::Drop).await;

    let (status, body) = get_json(&format!("http://{addr}/api/figures/summary")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"][0]["type"], "table");
    assert_eq!(body["data"][0]["cells"]["values"][0], serde_json::json!(["female", "male"]));

    let (status, body) = get_json(&format!("http://{addr}/api/figures/income-by-prestige")).await;
    assert_eq!(status, 200);
    assert_eq!(body["layout"]["grid"]["rows"], 3);
    assert_eq!(body["layout"]["paper_bgcolor"], "#111111");

    let (status, body) = get_json(&format!("http://{addr}/api/figures/histogram")).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Unknown figure: histogram");
}

#[tokio::test]
async fn test_interactive_defaults_and_selection() {
    let addr = spawn_dashboard(MissingPolicy::Drop).await;

    let (status, body) = get_json(&format!("http://{addr}/api/interactive")).await;
    assert_eq!(status, 200);
    assert_eq!(body["layout"]["barmode"], "group");
    assert_eq!(body["layout"]["xaxis"]["title"]["text"], "male_breadwinner");
    let total: u64 = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .flat_map(|trace| trace["y"].as_array().cloned().unwrap_or_default())
        .filter_map(|y| y.as_u64())
        .sum();
    assert_eq!(total, 6);

    let (status, body) = get_json(&format!("http://{addr}/api/interactive?x=men_overwork&group=region")).await;
    assert_eq!(status, 200);
    assert_eq!(body["layout"]["legend"]["title"]["text"], "region");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_interactive_rejects_unknown_field() {
    let addr = spawn_dashboard(MissingPolicy::Drop).await;

    let (status, body) = get_json(&format!("http://{addr}/api/interactive?x=income&group=sex")).await;
    assert_eq!(status, 400);
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("\"income\""), "{message}");
    assert!(message.contains("male_breadwinner"), "{message}");

    let (status, _) = get_json(&format!("http://{addr}/api/interactive?group=age")).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_missing_as_category_counts_every_row() {
    let addr = spawn_dashboard(MissingPolicy::Category).await;

    let (_, options) = get_json(&format!("http://{addr}/api/options")).await;
    assert_eq!(options["missing_as_category"], true);

    let (status, body) = get_json(&format!("http://{addr}/api/interactive")).await;
    assert_eq!(status, 200);
    let names: Vec<&str> =
        body["data"].as_array().expect("data array").iter().filter_map(|t| t["name"].as_str()).collect();
    assert_eq!(names, vec!["female", "male", "missing"]);
}
