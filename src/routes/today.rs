use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::operations::sentences::DailySentence;
use crate::response::AppError;
use crate::services::daily;
use crate::state::AppState;

#[derive(Serialize)]
struct TodayResponse {
    success: bool,
    data: DailySentence,
}

pub async fn today_sentence(State(state): State<AppState>) -> Response {
    let Some(proxy) = state.db_proxy() else {
        return AppError::unavailable("服务不可用").into_response();
    };

    match daily::today(proxy.as_ref()).await {
        Ok(sentence) => Json(TodayResponse {
            success: true,
            data: sentence,
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to resolve today's sentence");
            AppError::internal("获取今日句子失败").into_response()
        }
    }
}
