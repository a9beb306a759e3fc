//! Login: resolve the opaque platform code to a durable identity, then
//! create-or-update the user profile. No session issuance; callers carry
//! the ambient identity on every later request.

use thiserror::Error;

use crate::auth::{AuthError, CredentialExchanger};
use crate::db::operations::now_iso;
use crate::db::operations::users::{self, User, UserProfile};
use crate::db::DatabaseProxy;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub is_new_user: bool,
}

pub async fn login(
    proxy: &DatabaseProxy,
    exchanger: &dyn CredentialExchanger,
    code: &str,
    profile: Option<&UserProfile>,
) -> Result<LoginOutcome, IdentityError> {
    let identity = exchanger.exchange(code)?;

    match users::find_by_openid(proxy, &identity.openid).await? {
        Some(mut user) => {
            let last_login = users::update_login(proxy, &user.id, profile).await?;
            user.last_login_time = last_login;
            if let Some(profile) = profile {
                user.nick_name = profile.nick_name.clone();
                user.avatar_url = profile.avatar_url.clone();
                user.gender = profile.gender;
                user.city = profile.city.clone();
                user.province = profile.province.clone();
                user.country = profile.country.clone();
            }
            tracing::info!(openid = %user.openid, "returning user logged in");
            Ok(LoginOutcome {
                user,
                is_new_user: false,
            })
        }
        None => {
            let now = now_iso();
            let user = User {
                id: users::new_user_id(),
                openid: identity.openid.clone(),
                unionid: identity.unionid.clone(),
                nick_name: profile
                    .map(|p| p.nick_name.clone())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| default_nickname(&identity.openid)),
                avatar_url: profile.map(|p| p.avatar_url.clone()).unwrap_or_default(),
                gender: profile.map(|p| p.gender).unwrap_or(0),
                city: profile.map(|p| p.city.clone()).unwrap_or_default(),
                province: profile.map(|p| p.province.clone()).unwrap_or_default(),
                country: profile.map(|p| p.country.clone()).unwrap_or_default(),
                create_time: now.clone(),
                last_login_time: now,
                total_collections: 0,
                consecutive_days: 1,
                total_study_days: 1,
                level: "beginner".to_string(),
                points: 0,
            };
            users::insert(proxy, &user).await?;
            tracing::info!(openid = %user.openid, "new user registered");
            Ok(LoginOutcome {
                user,
                is_new_user: true,
            })
        }
    }
}

/// Templated default: the visible name embeds the tail of the openid so
/// fresh accounts are distinguishable.
fn default_nickname(openid: &str) -> String {
    let suffix = openid
        .get(openid.len().saturating_sub(6)..)
        .unwrap_or(openid);
    format!("英语学习者{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::HmacCredentialExchanger;
    use crate::db::DatabaseProxy;

    #[tokio::test]
    async fn first_login_creates_user_with_defaults() {
        let proxy = DatabaseProxy::connect("sqlite::memory:").await.unwrap();
        let exchanger = HmacCredentialExchanger::new("test-secret");

        let outcome = login(&proxy, &exchanger, "abc", None).await.unwrap();
        assert!(outcome.is_new_user);
        assert_eq!(outcome.user.total_collections, 0);
        assert_eq!(outcome.user.consecutive_days, 1);
        assert_eq!(outcome.user.total_study_days, 1);
        assert_eq!(outcome.user.level, "beginner");
        assert_eq!(outcome.user.points, 0);

        let suffix = &outcome.user.openid[outcome.user.openid.len() - 6..];
        assert!(outcome.user.nick_name.contains(suffix));
    }

    #[tokio::test]
    async fn second_login_is_not_new_and_touches_last_login() {
        let proxy = DatabaseProxy::connect("sqlite::memory:").await.unwrap();
        let exchanger = HmacCredentialExchanger::new("test-secret");

        let first = login(&proxy, &exchanger, "abc", None).await.unwrap();
        let second = login(&proxy, &exchanger, "abc", None).await.unwrap();

        assert!(!second.is_new_user);
        assert_eq!(second.user.id, first.user.id);
        assert!(second.user.last_login_time >= first.user.last_login_time);
    }

    #[tokio::test]
    async fn profile_overwrites_display_fields() {
        let proxy = DatabaseProxy::connect("sqlite::memory:").await.unwrap();
        let exchanger = HmacCredentialExchanger::new("test-secret");

        login(&proxy, &exchanger, "abc", None).await.unwrap();

        let profile = UserProfile {
            nick_name: "语感超人".to_string(),
            avatar_url: "https://example.com/a.png".to_string(),
            gender: 1,
            city: "Hangzhou".to_string(),
            province: "Zhejiang".to_string(),
            country: "China".to_string(),
        };
        let outcome = login(&proxy, &exchanger, "abc", Some(&profile))
            .await
            .unwrap();

        assert!(!outcome.is_new_user);
        assert_eq!(outcome.user.nick_name, "语感超人");
        assert_eq!(outcome.user.city, "Hangzhou");
    }

    #[tokio::test]
    async fn blank_code_is_an_auth_error() {
        let proxy = DatabaseProxy::connect("sqlite::memory:").await.unwrap();
        let exchanger = HmacCredentialExchanger::new("test-secret");

        let result = login(&proxy, &exchanger, "", None).await;
        assert!(matches!(result, Err(IdentityError::Auth(_))));
    }
}
