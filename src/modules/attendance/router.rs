use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::attend_class;

pub fn init_attendance_router() -> Router<AppState> {
    Router::new().route("/", post(attend_class))
}
