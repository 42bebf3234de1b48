use innosistemas_web::{
    AppConfig, AppState, InMemoryTeamRepository, create_router, repository::RepositoryState,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

async fn spawn_app() -> TestApp {
    let repo = Arc::new(InMemoryTeamRepository::seeded()) as RepositoryState;
    let router = create_router(AppState::new(repo, AppConfig::default()));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let response = client()
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_openapi_document_served_without_session() {
    let app = spawn_app().await;
    let response = client()
        .get(format!("{}/api/openapi.json", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let doc: serde_json::Value = response.json().await.unwrap();
    assert!(doc["paths"]["/cursos/{id}/equipos"].is_object());
}

#[tokio::test]
async fn test_login_round_trip() {
    let app = spawn_app().await;
    let client = client();

    // Anonymous: bounced to login with the return path.
    let response = client
        .get(format!("{}/dashboard", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 307);
    assert_eq!(
        response.headers()["location"].to_str().unwrap(),
        "/auth/login?next=%2Fdashboard"
    );

    // With a session the same page renders.
    let response = client
        .get(format!("{}/dashboard", app.address))
        .header("cookie", "auth_token=abc; user_info=%7B%22role%22%3A%22student%22%7D")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
