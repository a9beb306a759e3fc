//! Page controllers: reconcile optimistic cache updates with server state.
//!
//! The cross-page "favorites changed" signal is an explicit shared cell
//! (`RefreshFlag`) handed to each controller, not an ambient global. On
//! page-show a set flag means: repaint from the cache snapshot, refetch in
//! the background, clear the flag. An unset flag refetches only when the
//! snapshot has gone stale.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

use crate::client::api::{ApiError, CollectionItem, SentenceApi, SentenceDoc};
use crate::client::audio::{AudioPlayer, SpeechBackend};
use crate::client::now_millis;
use crate::client::service::CloudService;
use crate::client::storage::{
    LocalStore, KEY_COLLECTIONS, KEY_COLLECTIONS_LOAD_TIME, KEY_TODAY_SENTENCE,
};

pub const PAGE_SIZE: i64 = 20;
/// Favorites snapshot freshness window on page-show.
pub const COLLECTIONS_FRESH_MS: i64 = 5 * 60 * 1000;
/// How old a cached snapshot may be and still serve as a network fallback.
pub const CACHE_MAX_AGE_MS: i64 = 60 * 60 * 1000;

/// Shared dirty flag: set after any favorite mutation so other pages
/// refetch on their next show.
#[derive(Clone, Default)]
pub struct RefreshFlag {
    needs_refresh: Arc<AtomicBool>,
}

impl RefreshFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_needs_refresh(&self) {
        self.needs_refresh.store(true, Ordering::SeqCst);
    }

    pub fn clear_refresh_flag(&self) {
        self.needs_refresh.store(false, Ordering::SeqCst);
    }

    pub fn should_refresh(&self) -> bool {
        self.needs_refresh.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Ready,
    Empty,
    Error,
}

pub enum CacheMutation<'a> {
    Add(&'a SentenceDoc),
    Remove,
}

/// Optimistic snapshot edit after a favorite mutation, so the favorites
/// page can repaint instantly before its background refetch lands.
pub fn update_cached_collections(store: &LocalStore, sentence_id: &str, mutation: CacheMutation<'_>) {
    let mut collections: Vec<CollectionItem> = store.get(KEY_COLLECTIONS).unwrap_or_default();

    match mutation {
        CacheMutation::Add(sentence) => {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            collections.insert(
                0,
                CollectionItem {
                    id: now_millis().to_string(),
                    sentence_id: sentence_id.to_string(),
                    sentence: sentence.clone(),
                    collected_at: now.clone(),
                    create_time: now,
                },
            );
        }
        CacheMutation::Remove => {
            collections.retain(|item| item.sentence_id != sentence_id && item.id != sentence_id);
        }
    }

    store.set(KEY_COLLECTIONS, &collections);
    store.set(KEY_COLLECTIONS_LOAD_TIME, &now_millis());
}

fn filter_collections(collections: &[CollectionItem], search: &str) -> Vec<CollectionItem> {
    if search.is_empty() {
        return collections.to_vec();
    }

    let needle = search.to_lowercase();
    collections
        .iter()
        .filter(|item| {
            let sentence = &item.sentence;
            sentence.content.to_lowercase().contains(&needle)
                || sentence.translation.to_lowercase().contains(&needle)
                || sentence.keywords.iter().any(|keyword| {
                    keyword.word.to_lowercase().contains(&needle)
                        || keyword.meaning.to_lowercase().contains(&needle)
                })
        })
        .cloned()
        .collect()
}

/// Favorites page: paginated list with search, pull-to-refresh, and
/// infinite scroll.
pub struct CollectionsController<A: SentenceApi> {
    service: Arc<CloudService<A>>,
    store: LocalStore,
    flag: RefreshFlag,
    pub state: PageState,
    pub collections: Vec<CollectionItem>,
    pub filtered: Vec<CollectionItem>,
    search_value: String,
    current_page: i64,
    pub has_more: bool,
    data_loaded: bool,
    last_load_time: i64,
    logged_in: bool,
}

impl<A: SentenceApi> CollectionsController<A> {
    pub fn new(service: Arc<CloudService<A>>, store: LocalStore, flag: RefreshFlag) -> Self {
        Self {
            service,
            store,
            flag,
            state: PageState::Loading,
            collections: Vec::new(),
            filtered: Vec::new(),
            search_value: String::new(),
            current_page: 1,
            has_more: true,
            data_loaded: false,
            last_load_time: 0,
            logged_in: false,
        }
    }

    pub async fn on_load(&mut self) {
        self.logged_in = self.service.check_login_status();
        self.load_collections(true, true).await;
    }

    pub async fn on_show(&mut self) {
        self.logged_in = self.service.check_login_status();
        if !self.logged_in {
            return;
        }

        if self.flag.should_refresh() {
            self.load_from_updated_cache();
            self.load_collections(true, false).await;
            self.flag.clear_refresh_flag();
        } else {
            let stale = !self.data_loaded
                || now_millis() - self.last_load_time > COLLECTIONS_FRESH_MS;
            if stale {
                self.load_collections(true, false).await;
            }
        }
    }

    pub async fn on_pull_down_refresh(&mut self) {
        self.load_collections(true, false).await;
    }

    pub async fn on_reach_bottom(&mut self) {
        if self.has_more && self.logged_in && self.state != PageState::Loading {
            self.load_collections(false, false).await;
        }
    }

    pub async fn on_search_input(&mut self, value: &str) {
        self.search_value = value.to_lowercase();

        if self.data_loaded && !self.collections.is_empty() {
            self.filtered = filter_collections(&self.collections, &self.search_value);
            self.state = if self.filtered.is_empty() {
                PageState::Empty
            } else {
                PageState::Ready
            };
        } else {
            self.load_collections(true, true).await;
        }
    }

    pub fn clear_search(&mut self) {
        self.search_value.clear();
        self.filtered = self.collections.clone();
        self.state = if self.collections.is_empty() {
            PageState::Empty
        } else {
            PageState::Ready
        };
    }

    pub async fn remove_item(&mut self, sentence_id: &str) -> Result<(), ApiError> {
        self.service.remove_collection(sentence_id).await?;

        self.collections
            .retain(|item| item.sentence_id != sentence_id && item.id != sentence_id);
        self.filtered
            .retain(|item| item.sentence_id != sentence_id && item.id != sentence_id);
        if self.collections.is_empty() {
            self.state = PageState::Empty;
        }

        self.store.set(KEY_COLLECTIONS, &self.collections);
        self.store.set(KEY_COLLECTIONS_LOAD_TIME, &now_millis());
        self.flag.set_needs_refresh();

        Ok(())
    }

    pub async fn load_collections(&mut self, is_refresh: bool, show_loading: bool) {
        if !self.logged_in {
            self.state = PageState::Empty;
            self.data_loaded = true;
            return;
        }

        if is_refresh {
            self.current_page = 1;
            self.has_more = true;
            if show_loading {
                self.state = PageState::Loading;
            }
        }

        match self
            .service
            .get_user_collections(self.current_page, PAGE_SIZE, &self.search_value)
            .await
        {
            Ok(result) => {
                self.has_more = result.pagination.has_more();
                self.current_page += 1;

                if is_refresh {
                    self.collections = result.collections;
                } else {
                    self.collections.extend(result.collections);
                }

                self.filtered = filter_collections(&self.collections, &self.search_value);
                self.state = if self.collections.is_empty() {
                    PageState::Empty
                } else {
                    PageState::Ready
                };
                self.data_loaded = true;
                self.last_load_time = now_millis();

                self.store.set(KEY_COLLECTIONS, &self.collections);
                self.store.set(KEY_COLLECTIONS_LOAD_TIME, &self.last_load_time);
            }
            Err(err) => {
                tracing::warn!(error = %err, "load collections failed");
                if is_refresh {
                    // Cache fallback lands in Ready or Empty on its own.
                    self.load_from_cache();
                } else {
                    self.state = PageState::Error;
                }
            }
        }
    }

    /// Repaint from whatever the optimistic mutation left in the cache.
    fn load_from_updated_cache(&mut self) -> bool {
        let Some(collections) = self.store.get::<Vec<CollectionItem>>(KEY_COLLECTIONS) else {
            return false;
        };
        let cache_time = self
            .store
            .get::<i64>(KEY_COLLECTIONS_LOAD_TIME)
            .unwrap_or_else(now_millis);

        self.filtered = filter_collections(&collections, &self.search_value);
        self.state = if collections.is_empty() {
            PageState::Empty
        } else {
            PageState::Ready
        };
        self.collections = collections;
        self.data_loaded = true;
        self.last_load_time = cache_time;
        true
    }

    /// Network fallback: only a non-empty snapshot younger than an hour
    /// counts.
    fn load_from_cache(&mut self) -> bool {
        let cached = self
            .store
            .get::<Vec<CollectionItem>>(KEY_COLLECTIONS)
            .unwrap_or_default();
        let cache_time = self.store.get::<i64>(KEY_COLLECTIONS_LOAD_TIME).unwrap_or(0);

        if !cached.is_empty() && now_millis() - cache_time < CACHE_MAX_AGE_MS {
            self.filtered = filter_collections(&cached, &self.search_value);
            self.collections = cached;
            self.state = PageState::Ready;
            self.data_loaded = true;
            self.last_load_time = cache_time;
            return true;
        }

        self.collections.clear();
        self.filtered.clear();
        self.state = PageState::Empty;
        self.data_loaded = true;
        false
    }
}

/// Home page: today's sentence, collect toggle, playback.
pub struct TodayController<A: SentenceApi> {
    service: Arc<CloudService<A>>,
    store: LocalStore,
    flag: RefreshFlag,
    pub state: PageState,
    pub sentence: Option<SentenceDoc>,
    pub is_collected: bool,
}

impl<A: SentenceApi> TodayController<A> {
    pub fn new(service: Arc<CloudService<A>>, store: LocalStore, flag: RefreshFlag) -> Self {
        Self {
            service,
            store,
            flag,
            state: PageState::Loading,
            sentence: None,
            is_collected: false,
        }
    }

    pub async fn on_load(&mut self) {
        self.load_today_sentence().await;
    }

    pub async fn on_show(&mut self) {
        if self.sentence.is_some() {
            self.check_collection_status().await;
        }
    }

    pub async fn load_today_sentence(&mut self) {
        match self.service.get_today_sentence().await {
            Ok(sentence) => {
                self.store.set(KEY_TODAY_SENTENCE, &sentence);
                self.sentence = Some(sentence);
                self.state = PageState::Ready;
                self.check_collection_status().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "today sentence fetch failed, using local fallback");
                self.sentence = Some(
                    self.store
                        .get::<SentenceDoc>(KEY_TODAY_SENTENCE)
                        .unwrap_or_else(builtin_fallback),
                );
                self.state = PageState::Ready;
            }
        }
    }

    pub async fn check_collection_status(&mut self) {
        let Some(id) = self.sentence.as_ref().map(|s| s.id.clone()) else {
            return;
        };
        if id.is_empty() {
            return;
        }

        self.is_collected = self.service.check_collection_status(&id).await;
    }

    /// Flips the favorite state; on success the shared flag tells the
    /// favorites page to refetch, and the cached snapshot is patched so it
    /// can repaint before that refetch completes.
    pub async fn toggle_collection(&mut self) -> Result<bool, ApiError> {
        let sentence = self
            .sentence
            .clone()
            .ok_or_else(|| ApiError::Rpc("数据加载中，请稍后再试".to_string()))?;
        if sentence.id.is_empty() {
            return Err(ApiError::Rpc("句子数据异常，请刷新页面".to_string()));
        }

        if self.is_collected {
            self.service.remove_collection(&sentence.id).await?;
            update_cached_collections(&self.store, &sentence.id, CacheMutation::Remove);
            self.is_collected = false;
        } else {
            self.service.add_collection(&sentence.id, &sentence).await?;
            update_cached_collections(&self.store, &sentence.id, CacheMutation::Add(&sentence));
            self.is_collected = true;
        }

        self.flag.set_needs_refresh();
        Ok(self.is_collected)
    }

    pub async fn play_audio<S: SpeechBackend>(&self, player: &AudioPlayer<S>) -> bool {
        match &self.sentence {
            Some(sentence) => player.play_sentence(&sentence.content).await,
            None => false,
        }
    }
}

fn builtin_fallback() -> SentenceDoc {
    SentenceDoc {
        id: "local".to_string(),
        content: "The early bird catches the worm.".to_string(),
        translation: "早起的鸟儿有虫吃。".to_string(),
        keywords: vec![
            crate::client::api::KeywordDoc {
                word: "early".to_string(),
                phonetic: "/ˈɜːrli/".to_string(),
                meaning: "早的，提前的".to_string(),
                part_of_speech: "adj.".to_string(),
            },
            crate::client::api::KeywordDoc {
                word: "catches".to_string(),
                phonetic: "/ˈkætʃɪz/".to_string(),
                meaning: "抓住，捕获".to_string(),
                part_of_speech: "v.".to_string(),
            },
        ],
        date: None,
        category: None,
        difficulty: None,
        source: None,
    }
}
