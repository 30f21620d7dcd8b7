use crate::common::{TEST_TOPIC, TestApp, routes};

#[tokio::test]
async fn returns_configured_topic() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::TOPIC).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["title"], TEST_TOPIC);
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    assert!(res.body["paths"].get("/results/ranked").is_some());
    assert!(res.body["paths"].get("/topic").is_some());
}
