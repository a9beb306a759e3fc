use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::operations::users::{User, UserProfile};
use crate::response::AppError;
use crate::services::identity::{self, IdentityError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    code: String,
    user_info: Option<UserProfile>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    success: bool,
    data: User,
    is_new_user: bool,
}

/// `userLogin`: exchange the opaque code, create or refresh the profile.
pub async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> Response {
    let Some(proxy) = state.db_proxy() else {
        return AppError::unavailable("服务不可用").into_response();
    };

    let exchanger = state.exchanger();
    match identity::login(
        proxy.as_ref(),
        exchanger.as_ref(),
        &payload.code,
        payload.user_info.as_ref(),
    )
    .await
    {
        Ok(outcome) => Json(LoginResponse {
            success: true,
            data: outcome.user,
            is_new_user: outcome.is_new_user,
        })
        .into_response(),
        Err(IdentityError::Auth(err)) => AppError::auth_failed(err.to_string()).into_response(),
        Err(IdentityError::Db(err)) => {
            tracing::error!(error = %err, "login failed");
            AppError::internal("登录失败，请重试").into_response()
        }
    }
}
