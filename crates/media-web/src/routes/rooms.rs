//! Room catalog routes.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// One row of the image menu.
#[derive(Clone, Serialize)]
pub struct RoomSummary {
    /// 1-based menu position.
    pub index: usize,
    /// Name as shown in the menu.
    pub name: String,
    /// Media folder key under the image root.
    pub folder: String,
}

/// List the catalog as JSON, in menu order.
pub async fn rooms_api(State(state): State<AppState>) -> Json<Vec<RoomSummary>> {
    let rooms = state
        .catalog
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, entry)| RoomSummary {
            index: idx + 1,
            name: entry.title(),
            folder: entry.folder.clone(),
        })
        .collect();
    Json(rooms)
}
