use axum::extract::{Extension, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::AmbientIdentity;
use crate::db::operations::collections::CollectionRecord;
use crate::response::AppError;
use crate::services::collections::{self, CollectionError, PageInfo, DEFAULT_PAGE_SIZE};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_page_size")]
    page_size: i64,
    #[serde(default)]
    keyword: String,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Serialize)]
struct ListResponse {
    success: bool,
    data: Vec<CollectionRecord>,
    pagination: PageInfo,
}

/// `getUserCollections`: paginated favorites for the ambient identity,
/// optionally filtered by keyword.
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<AmbientIdentity>,
    Query(query): Query<ListQuery>,
) -> Response {
    let Some(proxy) = state.db_proxy() else {
        return AppError::unavailable("服务不可用").into_response();
    };

    let keyword = Some(query.keyword.as_str()).filter(|k| !k.is_empty());

    match collections::list(
        proxy.as_ref(),
        &identity.openid,
        query.page,
        query.page_size,
        keyword,
    )
    .await
    {
        Ok(page) => Json(ListResponse {
            success: true,
            data: page.items,
            pagination: page.pagination,
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, openid = %identity.openid, "list collections failed");
            AppError::internal("获取收藏列表失败").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ManageRequest {
    #[serde(rename_all = "camelCase")]
    Add {
        sentence_id: String,
        sentence: serde_json::Value,
    },
    #[serde(rename_all = "camelCase")]
    Remove { sentence_id: String },
    #[serde(rename_all = "camelCase")]
    Check { sentence_id: String },
}

#[derive(Serialize)]
struct AddResponse {
    success: bool,
    data: CollectionRecord,
}

#[derive(Serialize)]
struct RemoveResponse {
    success: bool,
    removed: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckResponse {
    success: bool,
    is_collected: bool,
}

/// `manageCollection`: add / remove / check against the ambient identity.
pub async fn manage(
    State(state): State<AppState>,
    Extension(identity): Extension<AmbientIdentity>,
    Json(request): Json<ManageRequest>,
) -> Response {
    let Some(proxy) = state.db_proxy() else {
        return AppError::unavailable("服务不可用").into_response();
    };

    let sentence_id = match &request {
        ManageRequest::Add { sentence_id, .. }
        | ManageRequest::Remove { sentence_id }
        | ManageRequest::Check { sentence_id } => sentence_id.clone(),
    };
    if sentence_id.trim().is_empty() {
        return AppError::validation("句子ID不能为空").into_response();
    }

    match request {
        ManageRequest::Add { sentence, .. } => {
            match collections::add(proxy.as_ref(), &identity.openid, &sentence_id, &sentence).await
            {
                Ok(record) => Json(AddResponse {
                    success: true,
                    data: record,
                })
                .into_response(),
                Err(err) => collection_error(err, &identity.openid),
            }
        }
        ManageRequest::Remove { .. } => {
            match collections::remove(proxy.as_ref(), &identity.openid, &sentence_id).await {
                Ok(removed) => Json(RemoveResponse {
                    success: true,
                    removed,
                })
                .into_response(),
                Err(err) => collection_error(err, &identity.openid),
            }
        }
        ManageRequest::Check { .. } => {
            match collections::check(proxy.as_ref(), &identity.openid, &sentence_id).await {
                Ok(is_collected) => Json(CheckResponse {
                    success: true,
                    is_collected,
                })
                .into_response(),
                Err(err) => collection_error(err, &identity.openid),
            }
        }
    }
}

fn collection_error(err: CollectionError, openid: &str) -> Response {
    match err {
        CollectionError::AlreadyExists => {
            AppError::already_exists(err.to_string()).into_response()
        }
        CollectionError::NotFound => AppError::not_found(err.to_string()).into_response(),
        CollectionError::Db(err) => {
            tracing::error!(error = %err, openid, "collection operation failed");
            AppError::internal("收藏操作失败").into_response()
        }
    }
}
