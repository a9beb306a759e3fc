use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::operations::sentences::NewSentence;
use crate::response::AppError;
use crate::services::sentence_admin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AdminRequest {
    InitSentenceBank,
    TestConnection,
    AddSentence { sentence: NewSentence },
    GetSentenceStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitResponse {
    success: bool,
    message: String,
    added_ids: Vec<String>,
    total_sentences: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProbeResponse {
    success: bool,
    message: &'static str,
    test_id: String,
    existing_count: i64,
}

#[derive(Serialize)]
struct AddResponse {
    success: bool,
    message: &'static str,
    id: String,
}

#[derive(Serialize)]
struct StatsResponse {
    success: bool,
    data: sentence_admin::SentenceStats,
}

/// `manageSentences`: seeding and maintenance of the sentence pool.
pub async fn manage_sentences(
    State(state): State<AppState>,
    Json(request): Json<AdminRequest>,
) -> Response {
    let Some(proxy) = state.db_proxy() else {
        return AppError::unavailable("服务不可用").into_response();
    };

    match request {
        AdminRequest::InitSentenceBank => {
            match sentence_admin::init_sentence_bank(proxy.as_ref()).await {
                Ok(summary) => Json(InitResponse {
                    success: true,
                    message: format!("成功初始化 {} 条句子", summary.added_ids.len()),
                    added_ids: summary.added_ids,
                    total_sentences: summary.total_sentences,
                })
                .into_response(),
                Err(err) => admin_error(err, "init sentence bank failed"),
            }
        }
        AdminRequest::TestConnection => match sentence_admin::test_connection(proxy.as_ref()).await
        {
            Ok(report) => Json(ProbeResponse {
                success: true,
                message: "数据库连接正常",
                test_id: report.test_id,
                existing_count: report.existing_count,
            })
            .into_response(),
            Err(err) => admin_error(err, "connection probe failed"),
        },
        AdminRequest::AddSentence { sentence } => {
            if sentence.content.trim().is_empty() {
                return AppError::validation("句子内容不能为空").into_response();
            }
            match sentence_admin::add_sentence(proxy.as_ref(), &sentence).await {
                Ok(id) => Json(AddResponse {
                    success: true,
                    message: "句子添加成功",
                    id,
                })
                .into_response(),
                Err(err) => admin_error(err, "add sentence failed"),
            }
        }
        AdminRequest::GetSentenceStats => {
            match sentence_admin::sentence_stats(proxy.as_ref()).await {
                Ok(stats) => Json(StatsResponse {
                    success: true,
                    data: stats,
                })
                .into_response(),
                Err(err) => admin_error(err, "sentence stats failed"),
            }
        }
    }
}

fn admin_error(err: sqlx::Error, context: &'static str) -> Response {
    tracing::error!(error = %err, context, "sentence admin operation failed");
    AppError::internal("句子管理操作失败").into_response()
}
