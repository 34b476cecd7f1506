use super::*;
use axum::{http::StatusCode as HttpStatus, routing::get, Json, Router};
use shared::error::ErrorCode;
use tokio::net::TcpListener;

async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

fn directory_router() -> Router {
    Router::new()
        .route(
            "/api/branches",
            get(|| async {
                Json(vec![
                    Branch::new(6, "OCHQ"),
                    Branch::new(1, "SSP BRANCH"),
                ])
            }),
        )
        .route(
            "/api/personnel",
            get(|| async {
                Json(vec![
                    Person::new(1, "3SG SIVA", "SSP BRANCH"),
                    Person::new(4, "LCP TAN", "OCHQ"),
                ])
            }),
        )
}

#[test]
fn rejects_non_http_server_url() {
    assert!(matches!(
        DirectoryClient::new("ws://127.0.0.1:5000"),
        Err(ClientError::InvalidServerUrl(_))
    ));
    assert!(matches!(
        DirectoryClient::new("127.0.0.1:5000"),
        Err(ClientError::InvalidServerUrl(_))
    ));
}

#[test]
fn server_url_keeps_path_prefix() {
    let client = DirectoryClient::new("https://roster.example.com/parade").expect("client");
    assert_eq!(client.server_url().as_str(), "https://roster.example.com/parade/");
}

#[tokio::test]
async fn fetches_branches_and_personnel() {
    let url = spawn_server(directory_router()).await;
    let client = DirectoryClient::new(&url).expect("client");

    let branches = client.branches().await.expect("branches");
    assert_eq!(branches[0].name, "OCHQ");

    let personnel = client.personnel().await.expect("personnel");
    assert_eq!(personnel.len(), 2);
    assert_eq!(personnel[1].branch, "OCHQ");
}

#[tokio::test]
async fn api_error_body_is_decoded() {
    let router = Router::new().route(
        "/api/branches",
        get(|| async {
            (
                HttpStatus::BAD_GATEWAY,
                Json(ApiError::new(ErrorCode::Upstream, "failed to fetch branches")),
            )
        }),
    );
    let url = spawn_server(router).await;
    let client = DirectoryClient::new(&url).expect("client");

    let err = client.branches().await.expect_err("should fail");
    match err {
        ClientError::Api { status, error } => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(error.code, ErrorCode::Upstream);
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn plain_error_body_is_kept() {
    let url = spawn_server(Router::new()).await;
    let client = DirectoryClient::new(&url).expect("client");

    let err = client.personnel().await.expect_err("should fail");
    assert!(matches!(
        err,
        ClientError::UnexpectedStatus { status, .. } if status == StatusCode::NOT_FOUND
    ));
}

#[tokio::test]
async fn session_load_collects_directory() {
    let url = spawn_server(directory_router()).await;
    let client = DirectoryClient::new(&url).expect("client");

    let mut session = RosterSession::load(&client).await;
    assert!(session.is_ready());
    assert_eq!(session.branches().len(), 2);

    session.select_branch("OCHQ");
    let names: Vec<_> = session
        .candidates()
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["LCP TAN"]);
}

#[tokio::test]
async fn session_load_reports_branch_failure() {
    let router = Router::new().route(
        "/api/branches",
        get(|| async { HttpStatus::INTERNAL_SERVER_ERROR }),
    );
    let url = spawn_server(router).await;
    let client = DirectoryClient::new(&url).expect("client");

    let session = RosterSession::load(&client).await;
    assert!(!session.is_ready());
    assert_eq!(session.error(), Some(BRANCHES_FETCH_FAILED));
}

#[tokio::test]
async fn session_load_reports_personnel_failure() {
    let router = Router::new().route(
        "/api/branches",
        get(|| async { Json(vec![Branch::new(1, "SSP BRANCH")]) }),
    );
    let url = spawn_server(router).await;
    let client = DirectoryClient::new(&url).expect("client");

    let session = RosterSession::load(&client).await;
    assert_eq!(session.error(), Some(PERSONNEL_FETCH_FAILED));
    assert!(session.branches().is_empty());
}

#[tokio::test]
async fn stalled_server_times_out() {
    let router = Router::new().route(
        "/api/branches",
        get(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            Json(Vec::<Branch>::new())
        }),
    );
    let url = spawn_server(router).await;
    let server_url = Url::parse(&format!("{url}/")).expect("url");
    let client = DirectoryClient::with_timeout(server_url, Duration::from_millis(100))
        .expect("client");

    let err = client.branches().await.expect_err("should time out");
    assert!(matches!(err, ClientError::Network(ref e) if e.is_timeout()));
}
