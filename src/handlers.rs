use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::Response,
    Json,
};
use rand::thread_rng;
use uuid::Uuid;

use crate::{
    booster::{generate_custom_booster, BoosterSettings},
    cards::{stats::CubeStatistics, CubeCard},
    draft::{packs, DraftSession},
    history::StoredBooster,
    AppState, Resp,
};

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub players: u32,
    pub boosters_per_player: u32,
}

#[derive(serde::Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

pub async fn custom_booster(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<BoosterSettings>,
) -> Json<StoredBooster> {
    let booster = generate_custom_booster(&settings, &mut thread_rng());
    Json(state.history.save(&settings, &booster))
}

pub async fn booster_history(State(state): State<Arc<AppState>>) -> Json<Vec<StoredBooster>> {
    Json(state.history.list())
}

pub async fn delete_stored_booster(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response<String> {
    state.history.delete(&id);
    Resp::ok("Stored booster deleted.")
}

pub async fn clear_booster_history(State(state): State<Arc<AppState>>) -> Response<String> {
    state.history.clear();
    Resp::ok("Custom booster history cleared.")
}

pub async fn generate_draft(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<DraftSession>, Response<String>> {
    let cube = state.cube.load().await;
    let session = packs::generate_all_boosters(
        &cube,
        request.players,
        request.boosters_per_player,
        &mut thread_rng(),
    )
    .map_err(Resp::e422)?;

    let response = Json(session.clone());
    state.sessions.lock().await.insert(session.id, session);
    Ok(response)
}

pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DraftSession>, Response<String>> {
    state
        .sessions
        .lock()
        .await
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Resp::e404(format!("No draft session with id {id}.")))
}

/// Discarding a session clears its used-card history. Resetting a session
/// that does not exist is fine.
pub async fn reset_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Response<String> {
    state.sessions.lock().await.remove(&id);
    Resp::ok("Draft session discarded.")
}

pub async fn cube_stats(State(state): State<Arc<AppState>>) -> Json<CubeStatistics> {
    let cube = state.cube.load().await;
    Json(CubeStatistics::compute(&cube))
}

pub async fn search_cube(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<CubeCard>> {
    let cube = state.cube.load().await;
    Json(cube.search(&params.q).into_iter().cloned().collect())
}

pub async fn reload_cube(State(state): State<Arc<AppState>>) -> Response<String> {
    let cube = state.cube.reload().await;
    Resp::ok(format!("Cube list reloaded with {} cards.", cube.size()))
}
