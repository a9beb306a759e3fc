//! RPC wrapper over the backend functions. Responses arrive as
//! `{success, ...}` envelopes; a `success: false` body is an `ApiError::Rpc`
//! regardless of transport status, matching how the pages branch on the
//! flag rather than on the transport.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::OPEN_ID_HEADER;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("请先登录")]
    NotLoggedIn,
    #[error("{0}")]
    Rpc(String),
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDoc {
    pub word: String,
    #[serde(default)]
    pub phonetic: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub part_of_speech: String,
}

/// A sentence as the client sees it: today's record or a favorite snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceDoc {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub keywords: Vec<KeywordDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub sentence_id: String,
    pub sentence: SentenceDoc,
    pub collected_at: String,
    #[serde(default)]
    pub create_time: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Deserialize)]
pub struct CollectionsPage {
    pub collections: Vec<CollectionItem>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: serde_json::Value,
    pub is_new_user: bool,
}

#[allow(async_fn_in_trait)]
pub trait SentenceApi: Send + Sync {
    /// Ambient identity attached to subsequent calls. Implementations
    /// without per-call identity ignore it.
    fn set_identity(&self, _openid: Option<String>) {}

    async fn login(
        &self,
        code: &str,
        user_info: Option<&serde_json::Value>,
    ) -> Result<LoginResult, ApiError>;

    async fn get_today_sentence(&self) -> Result<SentenceDoc, ApiError>;

    async fn get_user_collections(
        &self,
        page: i64,
        page_size: i64,
        keyword: &str,
    ) -> Result<CollectionsPage, ApiError>;

    async fn add_collection(
        &self,
        sentence_id: &str,
        sentence: &SentenceDoc,
    ) -> Result<CollectionItem, ApiError>;

    async fn remove_collection(&self, sentence_id: &str) -> Result<u64, ApiError>;

    async fn check_collection(&self, sentence_id: &str) -> Result<bool, ApiError>;
}

/// HTTP implementation against the backend routes.
pub struct HttpSentenceApi {
    client: reqwest::Client,
    base_url: String,
    openid: RwLock<Option<String>>,
}

impl HttpSentenceApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            openid: RwLock::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn with_identity(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.openid.read().as_deref() {
            Some(openid) => builder.header(OPEN_ID_HEADER, openid),
            None => builder,
        }
    }

    async fn call(&self, builder: reqwest::RequestBuilder) -> Result<serde_json::Value, ApiError> {
        let body: serde_json::Value = builder.send().await?.json().await?;

        if body["success"].as_bool() == Some(true) {
            Ok(body)
        } else {
            let message = body["error"]
                .as_str()
                .unwrap_or("云函数调用失败")
                .to_string();
            Err(ApiError::Rpc(message))
        }
    }
}

impl SentenceApi for HttpSentenceApi {
    fn set_identity(&self, openid: Option<String>) {
        *self.openid.write() = openid;
    }

    async fn login(
        &self,
        code: &str,
        user_info: Option<&serde_json::Value>,
    ) -> Result<LoginResult, ApiError> {
        let mut payload = serde_json::json!({ "code": code });
        if let Some(user_info) = user_info {
            payload["userInfo"] = user_info.clone();
        }

        let body = self
            .call(self.client.post(self.url("/api/auth/login")).json(&payload))
            .await?;

        Ok(LoginResult {
            user: body["data"].clone(),
            is_new_user: body["isNewUser"].as_bool().unwrap_or(false),
        })
    }

    async fn get_today_sentence(&self) -> Result<SentenceDoc, ApiError> {
        let body = self
            .call(self.client.get(self.url("/api/sentence/today")))
            .await?;

        serde_json::from_value(body["data"].clone())
            .map_err(|err| ApiError::Rpc(format!("响应数据异常: {err}")))
    }

    async fn get_user_collections(
        &self,
        page: i64,
        page_size: i64,
        keyword: &str,
    ) -> Result<CollectionsPage, ApiError> {
        let builder = self
            .client
            .get(self.url("/api/collections"))
            .query(&[("page", page.to_string()), ("pageSize", page_size.to_string())])
            .query(&[("keyword", keyword)]);

        let body = self.call(self.with_identity(builder)).await?;

        let collections = serde_json::from_value(body["data"].clone())
            .map_err(|err| ApiError::Rpc(format!("响应数据异常: {err}")))?;
        let pagination = serde_json::from_value(body["pagination"].clone())
            .map_err(|err| ApiError::Rpc(format!("响应数据异常: {err}")))?;

        Ok(CollectionsPage {
            collections,
            pagination,
        })
    }

    async fn add_collection(
        &self,
        sentence_id: &str,
        sentence: &SentenceDoc,
    ) -> Result<CollectionItem, ApiError> {
        let payload = serde_json::json!({
            "action": "add",
            "sentenceId": sentence_id,
            "sentence": sentence,
        });

        let builder = self.client.post(self.url("/api/collections")).json(&payload);
        let body = self.call(self.with_identity(builder)).await?;

        serde_json::from_value(body["data"].clone())
            .map_err(|err| ApiError::Rpc(format!("响应数据异常: {err}")))
    }

    async fn remove_collection(&self, sentence_id: &str) -> Result<u64, ApiError> {
        let payload = serde_json::json!({
            "action": "remove",
            "sentenceId": sentence_id,
        });

        let builder = self.client.post(self.url("/api/collections")).json(&payload);
        let body = self.call(self.with_identity(builder)).await?;

        Ok(body["removed"].as_u64().unwrap_or(0))
    }

    async fn check_collection(&self, sentence_id: &str) -> Result<bool, ApiError> {
        let payload = serde_json::json!({
            "action": "check",
            "sentenceId": sentence_id,
        });

        let builder = self.client.post(self.url("/api/collections")).json(&payload);
        let body = self.call(self.with_identity(builder)).await?;

        Ok(body["isCollected"].as_bool().unwrap_or(false))
    }
}
