//! End-to-end tests for `HttpDrawingClient` against the real API router
//! served on a loopback port.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use scribble_api::config::ServerConfig;
use scribble_api::router::build_app_router;
use scribble_api::state::AppState;
use scribble_core::drawing::{CreateDrawing, Point, Stroke};
use scribble_core::types::DrawingId;
use scribble_studio::client::{ClientError, DrawingApi, HttpDrawingClient};
use scribble_studio::config::StudioConfig;
use scribble_studio::editor::CanvasEditor;

/// Serve the API on an ephemeral port and return a client for it.
async fn spawn_server() -> HttpDrawingClient {
    let pool = scribble_db::create_pool("sqlite::memory:").await.unwrap();
    scribble_db::run_migrations(&pool).await.unwrap();

    let config = ServerConfig::from_lookup(|_| None).unwrap();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpDrawingClient::new(&StudioConfig {
        api_url: format!("http://{addr}"),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn input(title: &str) -> CreateDrawing {
    CreateDrawing {
        title: title.into(),
        strokes: vec![Stroke {
            id: "s1".into(),
            points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            color: "#000000".into(),
            width: 2.0,
            timestamp: 0,
        }],
        author: None,
    }
}

#[tokio::test]
async fn create_get_list_delete_round_trip() {
    let client = spawn_server().await;

    let created = client.create(&input("Round trip")).await.unwrap();
    assert_eq!(created.title, "Round trip");
    assert_eq!(created.strokes, input("Round trip").strokes);

    let fetched = client.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let listed = client.list().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);

    client.delete(&created.id).await.unwrap();
    assert!(client.list().await.unwrap().is_empty());

    let err = client.delete(&created.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Drawing not found");
}

#[tokio::test]
async fn unknown_drawing_is_not_found() {
    let client = spawn_server().await;
    let err = client.get(&DrawingId::new_v4()).await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 404, .. });
}

#[tokio::test]
async fn invalid_drawing_reports_server_message() {
    let client = spawn_server().await;
    let err = client.create(&input("")).await.unwrap_err();
    assert_matches!(
        err,
        ClientError::Api { status: 400, ref message }
            if message == "Invalid request: title and strokes are required"
    );
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let client = HttpDrawingClient::new(&StudioConfig {
        api_url: "http://127.0.0.1:9".into(),
        timeout: Duration::from_secs(2),
    })
    .unwrap();
    assert_matches!(client.list().await, Err(ClientError::Request(_)));
}

#[tokio::test]
async fn editor_saves_through_http_client() {
    let client = spawn_server().await;
    let mut editor = CanvasEditor::new();
    editor.set_title("From the editor");
    editor.pointer_down(Point::new(10.0, 10.0));
    editor.pointer_move(Point::new(60.0, 40.0));
    editor.pointer_up();

    let saved = editor.save(&client, None).await.unwrap();
    assert_eq!(saved.author.as_deref(), Some("Anonymous"));
    assert_eq!(client.get(&saved.id).await.unwrap().title, "From the editor");
}
