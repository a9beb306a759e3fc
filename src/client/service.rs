//! Login/session facade over the RPC wrapper: keeps the current user in
//! memory and in the `userInfo` cache key, and gates the favorite calls on
//! login state the way the original wrapper did.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::client::api::{
    ApiError, CollectionItem, CollectionsPage, LoginResult, SentenceApi, SentenceDoc,
};
use crate::client::storage::{LocalStore, KEY_USER_INFO};

pub struct CloudService<A: SentenceApi> {
    api: Arc<A>,
    store: LocalStore,
    current_user: RwLock<Option<serde_json::Value>>,
}

impl<A: SentenceApi> CloudService<A> {
    pub fn new(api: Arc<A>, store: LocalStore) -> Self {
        Self {
            api,
            store,
            current_user: RwLock::new(None),
        }
    }

    pub async fn login(&self, code: &str) -> Result<LoginResult, ApiError> {
        self.login_inner(code, None).await
    }

    pub async fn login_with_user_info(
        &self,
        code: &str,
        user_info: serde_json::Value,
    ) -> Result<LoginResult, ApiError> {
        self.login_inner(code, Some(user_info)).await
    }

    async fn login_inner(
        &self,
        code: &str,
        user_info: Option<serde_json::Value>,
    ) -> Result<LoginResult, ApiError> {
        let result = self.api.login(code, user_info.as_ref()).await?;

        self.store.set(KEY_USER_INFO, &result.user);
        if let Some(openid) = result.user["openid"].as_str() {
            self.api.set_identity(Some(openid.to_string()));
        }
        *self.current_user.write() = Some(result.user.clone());

        Ok(result)
    }

    /// True when a user is known, restoring it (and the ambient identity)
    /// from the cache if this process has not logged in yet.
    pub fn check_login_status(&self) -> bool {
        if self.current_user.read().is_some() {
            return true;
        }

        if let Some(user) = self.store.get::<serde_json::Value>(KEY_USER_INFO) {
            if let Some(openid) = user["openid"].as_str() {
                self.api.set_identity(Some(openid.to_string()));
            }
            *self.current_user.write() = Some(user);
            return true;
        }

        false
    }

    pub fn current_user(&self) -> Option<serde_json::Value> {
        if !self.check_login_status() {
            return None;
        }
        self.current_user.read().clone()
    }

    pub fn logout(&self) {
        *self.current_user.write() = None;
        self.store.remove(KEY_USER_INFO);
        self.api.set_identity(None);
    }

    pub async fn get_today_sentence(&self) -> Result<SentenceDoc, ApiError> {
        self.api.get_today_sentence().await
    }

    pub async fn get_user_collections(
        &self,
        page: i64,
        page_size: i64,
        keyword: &str,
    ) -> Result<CollectionsPage, ApiError> {
        if !self.check_login_status() {
            return Err(ApiError::NotLoggedIn);
        }
        self.api.get_user_collections(page, page_size, keyword).await
    }

    pub async fn add_collection(
        &self,
        sentence_id: &str,
        sentence: &SentenceDoc,
    ) -> Result<CollectionItem, ApiError> {
        if !self.check_login_status() {
            return Err(ApiError::NotLoggedIn);
        }
        self.api.add_collection(sentence_id, sentence).await
    }

    pub async fn remove_collection(&self, sentence_id: &str) -> Result<u64, ApiError> {
        if !self.check_login_status() {
            return Err(ApiError::NotLoggedIn);
        }
        self.api.remove_collection(sentence_id).await
    }

    /// Unlike the other favorite calls this never fails loudly: an unknown
    /// or logged-out state just reads as "not collected".
    pub async fn check_collection_status(&self, sentence_id: &str) -> bool {
        if !self.check_login_status() {
            return false;
        }
        self.api
            .check_collection(sentence_id)
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::CollectionsPage;

    struct LoginOnlyApi;

    impl SentenceApi for LoginOnlyApi {
        async fn login(
            &self,
            code: &str,
            _user_info: Option<&serde_json::Value>,
        ) -> Result<LoginResult, ApiError> {
            if code.is_empty() {
                return Err(ApiError::Rpc("登录凭证不能为空".to_string()));
            }
            Ok(LoginResult {
                user: serde_json::json!({"openid": "o-abc", "nickName": "英语学习者o-abc"}),
                is_new_user: true,
            })
        }

        async fn get_today_sentence(&self) -> Result<SentenceDoc, ApiError> {
            Err(ApiError::Rpc("unused".to_string()))
        }

        async fn get_user_collections(
            &self,
            _page: i64,
            _page_size: i64,
            _keyword: &str,
        ) -> Result<CollectionsPage, ApiError> {
            Err(ApiError::Rpc("unused".to_string()))
        }

        async fn add_collection(
            &self,
            _sentence_id: &str,
            _sentence: &SentenceDoc,
        ) -> Result<CollectionItem, ApiError> {
            Err(ApiError::Rpc("unused".to_string()))
        }

        async fn remove_collection(&self, _sentence_id: &str) -> Result<u64, ApiError> {
            Err(ApiError::Rpc("unused".to_string()))
        }

        async fn check_collection(&self, _sentence_id: &str) -> Result<bool, ApiError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn login_caches_the_user_until_logout() {
        let store = LocalStore::in_memory();
        let service = CloudService::new(Arc::new(LoginOnlyApi), store.clone());

        assert!(!service.check_login_status());

        let result = service.login("code-1").await.unwrap();
        assert!(result.is_new_user);
        assert!(service.check_login_status());
        assert_eq!(service.current_user().unwrap()["openid"], "o-abc");
        assert!(store.get::<serde_json::Value>(KEY_USER_INFO).is_some());

        service.logout();
        assert!(!service.check_login_status());
        assert!(store.get::<serde_json::Value>(KEY_USER_INFO).is_none());
    }

    #[tokio::test]
    async fn login_state_survives_a_new_service_over_the_same_store() {
        let store = LocalStore::in_memory();
        let first = CloudService::new(Arc::new(LoginOnlyApi), store.clone());
        first.login("code-1").await.unwrap();

        // A fresh process restores the user from the cache key.
        let second = CloudService::new(Arc::new(LoginOnlyApi), store);
        assert!(second.check_login_status());
        assert_eq!(second.current_user().unwrap()["openid"], "o-abc");
    }

    #[tokio::test]
    async fn favorite_calls_require_login() {
        let service =
            CloudService::new(Arc::new(LoginOnlyApi), LocalStore::in_memory());

        let result = service.get_user_collections(1, 20, "").await;
        assert!(matches!(result, Err(ApiError::NotLoggedIn)));
        assert!(!service.check_collection_status("s1").await);
    }
}
