use std::{collections::HashMap, path::PathBuf, sync::Arc};

use axum::{
    http::{Response, StatusCode},
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use uuid::Uuid;

use cards::cube::CubeLoader;
use draft::DraftSession;
use history::{BoosterHistory, MemoryStore};

mod booster;
mod cards;
mod draft;
mod handlers;
mod history;

/// Crate-wide result type. Errors are plain messages for the caller.
type Res<T> = Result<T, String>;

fn err<T, S: ToString>(message: S) -> Res<T> {
    Err(message.to_string())
}

#[derive(serde::Serialize)]
struct Resp {
    message: String,
    success: bool,
}

impl Resp {
    fn axum<S: ToString>(message: S, status: StatusCode) -> Response<String> {
        match serde_json::ser::to_string(&Self {
            message: message.to_string(),
            success: status == StatusCode::OK,
        }) {
            Ok(body) => {
                let mut resp = Response::new(body);
                *resp.status_mut() = status;
                resp
            }
            Err(e) => {
                let mut resp = Response::new(format!("Failed to JSON encode response: {e}"));
                *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                resp
            }
        }
    }

    fn ok<S: ToString>(message: S) -> Response<String> {
        Self::axum(message, StatusCode::OK)
    }

    fn e404<S: ToString>(message: S) -> Response<String> {
        Self::axum(message, StatusCode::NOT_FOUND)
    }

    fn e422<S: ToString>(message: S) -> Response<String> {
        Self::axum(message, StatusCode::UNPROCESSABLE_ENTITY)
    }
}

struct AppState {
    cube: CubeLoader,
    sessions: tokio::sync::Mutex<HashMap<Uuid, DraftSession>>,
    history: BoosterHistory,
}

#[tokio::main]
async fn main() {
    const USAGE: &str = "Usage: booster-server <static path> <cube csv path> <port>";

    let content = std::env::args().nth(1).expect(USAGE);
    let cube_path = std::env::args().nth(2).expect(USAGE);
    let port = std::env::args()
        .nth(3)
        .map(|s| s.parse::<u16>().expect(&format!("Invalid port number: {s}")))
        .expect(USAGE);

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let state = Arc::new(AppState {
        cube: CubeLoader::new(PathBuf::from(cube_path)),
        sessions: tokio::sync::Mutex::new(HashMap::new()),
        history: BoosterHistory::new(Box::new(MemoryStore::default())),
    });

    let cube = state.cube.load().await;
    if cube.is_empty() {
        tracing::warn!("Starting with an empty cube list; cube boosters will come up short.");
    } else {
        tracing::debug!("Succesfully populated cube list with {} cards.", cube.size());
    }

    let app = Router::new()
        .fallback_service(ServeDir::new(content).append_index_html_on_directories(true))
        .route("/api/booster", post(handlers::custom_booster))
        .route(
            "/api/booster/history",
            get(handlers::booster_history).delete(handlers::clear_booster_history),
        )
        .route(
            "/api/booster/history/:id",
            delete(handlers::delete_stored_booster),
        )
        .route("/api/draft", post(handlers::generate_draft))
        .route(
            "/api/draft/:id",
            get(handlers::get_draft).delete(handlers::reset_draft),
        )
        .route("/api/cube/stats", get(handlers::cube_stats))
        .route("/api/cube/search", get(handlers::search_cube))
        .route("/api/cube/reload", post(handlers::reload_cube))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect(&format!("Failed to open port {port}"));

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Closed due to error: {e}");
    }
}
