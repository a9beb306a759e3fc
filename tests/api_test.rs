use axum::http::StatusCode;
use serde_json::json;

use daily_sentence::seed::SEED_BANK;
use daily_sentence::services::daily::FALLBACK_SENTENCES;

mod common;

use common::{body_json, create_test_app, get, get_as, post_json, post_json_as};

fn snapshot(content: &str, translation: &str) -> serde_json::Value {
    json!({
        "content": content,
        "translation": translation,
        "keywords": [],
    })
}

#[tokio::test]
async fn health_reports_connected() {
    let app = create_test_app().await;

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn unknown_path_is_enveloped_404() {
    let app = create_test_app().await;

    let response = get(&app, "/nonexistent/path").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn today_sentence_is_idempotent_per_day() {
    let app = create_test_app().await;

    let first = body_json(get(&app, "/api/sentence/today").await).await;
    assert_eq!(first["success"], true);
    let content = first["data"]["content"].as_str().unwrap().to_string();

    // Empty pool: the sentence must come from the built-in fallback list.
    assert!(FALLBACK_SENTENCES
        .iter()
        .any(|entry| entry.content == content));

    let second = body_json(get(&app, "/api/sentence/today").await).await;
    assert_eq!(second["data"]["content"].as_str().unwrap(), content);
    assert_eq!(second["data"]["_id"], first["data"]["_id"]);
}

#[tokio::test]
async fn today_sentence_comes_from_seeded_pool() {
    let app = create_test_app().await;

    let init = body_json(
        post_json(&app, "/api/admin/sentences", &json!({"action": "initSentenceBank"})).await,
    )
    .await;
    assert_eq!(init["success"], true);
    assert_eq!(init["addedIds"].as_array().unwrap().len(), SEED_BANK.len());

    let today = body_json(get(&app, "/api/sentence/today").await).await;
    let content = today["data"]["content"].as_str().unwrap().to_string();
    assert!(SEED_BANK.iter().any(|entry| entry.content == content));

    // Still idempotent after seeding.
    let again = body_json(get(&app, "/api/sentence/today").await).await;
    assert_eq!(again["data"]["content"].as_str().unwrap(), content);
}

#[tokio::test]
async fn login_creates_then_recognizes_a_user() {
    let app = create_test_app().await;

    let first = body_json(post_json(&app, "/api/auth/login", &json!({"code": "abc"})).await).await;
    assert_eq!(first["success"], true);
    assert_eq!(first["isNewUser"], true);
    assert_eq!(first["data"]["totalCollections"], 0);
    assert_eq!(first["data"]["level"], "beginner");

    let openid = first["data"]["openid"].as_str().unwrap();
    let suffix = &openid[openid.len() - 6..];
    assert!(first["data"]["nickName"].as_str().unwrap().contains(suffix));

    let second = body_json(post_json(&app, "/api/auth/login", &json!({"code": "abc"})).await).await;
    assert_eq!(second["isNewUser"], false);
    assert_eq!(second["data"]["openid"].as_str().unwrap(), openid);
}

#[tokio::test]
async fn login_with_profile_overwrites_display_fields() {
    let app = create_test_app().await;

    post_json(&app, "/api/auth/login", &json!({"code": "abc"})).await;

    let updated = body_json(
        post_json(
            &app,
            "/api/auth/login",
            &json!({
                "code": "abc",
                "userInfo": {"nickName": "语感超人", "avatarUrl": "https://example.com/a.png"},
            }),
        )
        .await,
    )
    .await;

    assert_eq!(updated["isNewUser"], false);
    assert_eq!(updated["data"]["nickName"], "语感超人");
    assert_eq!(updated["data"]["avatarUrl"], "https://example.com/a.png");
}

#[tokio::test]
async fn empty_login_code_is_an_auth_error() {
    let app = create_test_app().await;

    let response = post_json(&app, "/api/auth/login", &json!({"code": ""})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn collections_require_ambient_identity() {
    let app = create_test_app().await;

    let response = get(&app, "/api/collections").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn add_then_check_then_remove() {
    let app = create_test_app().await;

    let added = body_json(
        post_json_as(
            &app,
            "/api/collections",
            "o-tester",
            &json!({
                "action": "add",
                "sentenceId": "s1",
                "sentence": snapshot("Hello world.", "你好，世界。"),
            }),
        )
        .await,
    )
    .await;
    assert_eq!(added["success"], true);
    assert_eq!(added["data"]["sentenceId"], "s1");

    let checked = body_json(
        post_json_as(
            &app,
            "/api/collections",
            "o-tester",
            &json!({"action": "check", "sentenceId": "s1"}),
        )
        .await,
    )
    .await;
    assert_eq!(checked["isCollected"], true);

    let removed = body_json(
        post_json_as(
            &app,
            "/api/collections",
            "o-tester",
            &json!({"action": "remove", "sentenceId": "s1"}),
        )
        .await,
    )
    .await;
    assert_eq!(removed["success"], true);
    assert_eq!(removed["removed"], 1);

    let after = body_json(
        post_json_as(
            &app,
            "/api/collections",
            "o-tester",
            &json!({"action": "check", "sentenceId": "s1"}),
        )
        .await,
    )
    .await;
    assert_eq!(after["isCollected"], false);
}

#[tokio::test]
async fn duplicate_add_conflicts_and_counts_once() {
    let app = create_test_app().await;

    // Log in first so the denormalized counter has a row to land on.
    let login = body_json(post_json(&app, "/api/auth/login", &json!({"code": "abc"})).await).await;
    let openid = login["data"]["openid"].as_str().unwrap().to_string();

    let payload = json!({
        "action": "add",
        "sentenceId": "s1",
        "sentence": snapshot("Hello world.", "你好，世界。"),
    });

    let first = post_json_as(&app, "/api/collections", &openid, &payload).await;
    assert_eq!(body_json(first).await["success"], true);

    let second = post_json_as(&app, "/api/collections", &openid, &payload).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "ALREADY_EXISTS");

    // Counter moved by exactly one.
    let relogin = body_json(post_json(&app, "/api/auth/login", &json!({"code": "abc"})).await).await;
    assert_eq!(relogin["data"]["totalCollections"], 1);
}

#[tokio::test]
async fn remove_missing_favorite_is_not_found() {
    let app = create_test_app().await;

    let response = post_json_as(
        &app,
        "/api/collections",
        "o-tester",
        &json!({"action": "remove", "sentenceId": "missing"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn list_paginates_newest_first() {
    let app = create_test_app().await;

    for i in 0..25 {
        let added = post_json_as(
            &app,
            "/api/collections",
            "o-tester",
            &json!({
                "action": "add",
                "sentenceId": format!("s{i:02}"),
                "sentence": snapshot(&format!("Sentence number {i}."), "句子。"),
            }),
        )
        .await;
        assert_eq!(body_json(added).await["success"], true);
    }

    let page1 = body_json(get_as(&app, "/api/collections?page=1&pageSize=20", "o-tester").await).await;
    assert_eq!(page1["success"], true);
    assert_eq!(page1["data"].as_array().unwrap().len(), 20);
    assert_eq!(page1["pagination"]["total"], 25);
    assert_eq!(page1["pagination"]["totalPages"], 2);

    let items = page1["data"].as_array().unwrap();
    for pair in items.windows(2) {
        let newer = pair[0]["collectedAt"].as_str().unwrap();
        let older = pair[1]["collectedAt"].as_str().unwrap();
        assert!(newer >= older);
    }

    let page2 = body_json(get_as(&app, "/api/collections?page=2&pageSize=20", "o-tester").await).await;
    assert_eq!(page2["data"].as_array().unwrap().len(), 5);
    assert_eq!(page2["pagination"]["totalPages"], 2);
}

#[tokio::test]
async fn keyword_search_matches_content_or_translation() {
    let app = create_test_app().await;

    for (id, content, translation) in [
        ("s1", "The Early bird catches the worm.", "早起的鸟儿有虫吃。"),
        ("s2", "Time is money.", "时间就是金钱。"),
        ("s3", "Practice makes perfect.", "early 熟能生巧。"),
    ] {
        post_json_as(
            &app,
            "/api/collections",
            "o-tester",
            &json!({
                "action": "add",
                "sentenceId": id,
                "sentence": snapshot(content, translation),
            }),
        )
        .await;
    }

    let found = body_json(get_as(&app, "/api/collections?keyword=early", "o-tester").await).await;
    assert_eq!(found["pagination"]["total"], 2);
    let ids: Vec<&str> = found["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["sentenceId"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"s1"));
    assert!(ids.contains(&"s3"));

    let none = body_json(get_as(&app, "/api/collections?keyword=nomatch", "o-tester").await).await;
    assert_eq!(none["pagination"]["total"], 0);
    assert_eq!(none["pagination"]["totalPages"], 0);
}

#[tokio::test]
async fn favorites_are_scoped_per_user() {
    let app = create_test_app().await;

    post_json_as(
        &app,
        "/api/collections",
        "o-alice",
        &json!({
            "action": "add",
            "sentenceId": "s1",
            "sentence": snapshot("Hello.", "你好。"),
        }),
    )
    .await;

    let other = body_json(
        post_json_as(
            &app,
            "/api/collections",
            "o-bob",
            &json!({"action": "check", "sentenceId": "s1"}),
        )
        .await,
    )
    .await;
    assert_eq!(other["isCollected"], false);

    let listed = body_json(get_as(&app, "/api/collections", "o-bob").await).await;
    assert_eq!(listed["pagination"]["total"], 0);
}

#[tokio::test]
async fn sentence_admin_round_trip() {
    let app = create_test_app().await;

    let probe = body_json(
        post_json(&app, "/api/admin/sentences", &json!({"action": "testConnection"})).await,
    )
    .await;
    assert_eq!(probe["success"], true);
    assert_eq!(probe["existingCount"], 0);

    let init = body_json(
        post_json(&app, "/api/admin/sentences", &json!({"action": "initSentenceBank"})).await,
    )
    .await;
    assert_eq!(init["success"], true);

    // Re-running the seed adds nothing.
    let again = body_json(
        post_json(&app, "/api/admin/sentences", &json!({"action": "initSentenceBank"})).await,
    )
    .await;
    assert_eq!(again["addedIds"].as_array().unwrap().len(), 0);

    let added = body_json(
        post_json(
            &app,
            "/api/admin/sentences",
            &json!({
                "action": "addSentence",
                "sentence": {"content": "Stay hungry, stay foolish.", "translation": "求知若饥，虚心若愚。"},
            }),
        )
        .await,
    )
    .await;
    assert_eq!(added["success"], true);

    let stats = body_json(
        post_json(&app, "/api/admin/sentences", &json!({"action": "getSentenceStats"})).await,
    )
    .await;
    // Seed bank + the probe row + the one-off insert.
    assert_eq!(
        stats["data"]["totalSentences"],
        (SEED_BANK.len() + 2) as i64
    );
    assert_eq!(
        stats["data"]["activeSentences"],
        (SEED_BANK.len() + 2) as i64
    );
}
