use crate::api::Gateway;
use crate::models::UserProfile;
use leptos::logging::{error, log};

pub(crate) const PROFILE_TABLE: &str = "users";
pub(crate) const PROFILE_BUCKET: &str = "image_url";
pub(crate) const PLACEHOLDER_AVATAR: &str = "/default-avatar.png";

/// Long enough for the first paint only; signed avatars are never cached.
pub(crate) const AVATAR_URL_TTL_SECS: u32 = 60;

/// A profile whose avatar can be put straight into an `<img src>`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ResolvedProfile {
    pub user_id: String,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub about_me: Option<String>,
    pub avatar_url: String,
}

impl ResolvedProfile {
    fn new(profile: UserProfile, avatar_url: String) -> Self {
        Self {
            user_id: profile.user_id,
            user_name: profile.user_name,
            email: profile.email,
            about_me: profile.about_me,
            avatar_url,
        }
    }

    /// The signed avatar URL, or `None` when only the placeholder is available.
    pub fn custom_avatar(&self) -> Option<&str> {
        (self.avatar_url != PLACEHOLDER_AVATAR).then_some(self.avatar_url.as_str())
    }
}

pub(crate) async fn resolve_profile<G: Gateway>(
    gateway: &G,
    user_id: Option<&str>,
) -> Option<ResolvedProfile> {
    let user_id = user_id.filter(|id| !id.trim().is_empty())?;

    let profile = match gateway
        .select_one::<UserProfile>(PROFILE_TABLE, "user_id", user_id)
        .await
    {
        Ok(Some(p)) => p,
        Ok(None) => {
            log!("User not found for ID: {user_id}");
            return None;
        }
        Err(e) => {
            error!("Error fetching user {user_id}: {e}");
            return None;
        }
    };

    let avatar_url = match profile.image_path() {
        None => PLACEHOLDER_AVATAR.to_string(),
        Some(path) => match gateway
            .create_signed_url(PROFILE_BUCKET, path, AVATAR_URL_TTL_SECS)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                error!("Error generating signed URL: {e}");
                PLACEHOLDER_AVATAR.to_string()
            }
        },
    };

    Some(ResolvedProfile::new(profile, avatar_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{Call, MockGateway};
    use serde_json::json;

    fn jane(image_url: serde_json::Value) -> serde_json::Value {
        json!({
            "user_id": "u1",
            "user_name": "Jane Doe",
            "email": "jdoe@example.com",
            "about_me": "Soups mostly.",
            "image_url": image_url,
        })
    }

    #[tokio::test]
    async fn test_no_user_id_issues_no_request() {
        let gw = MockGateway::new().with_rows(PROFILE_TABLE, vec![jane(json!(null))]);
        assert_eq!(resolve_profile(&gw, None).await, None);
        assert_eq!(resolve_profile(&gw, Some("  ")).await, None);
        assert!(gw.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_image_resolves_to_placeholder_without_signing() {
        let gw = MockGateway::new().with_rows(PROFILE_TABLE, vec![jane(json!(""))]);
        let p = resolve_profile(&gw, Some("u1")).await.expect("profile");
        assert_eq!(p.avatar_url, PLACEHOLDER_AVATAR);
        assert_eq!(p.custom_avatar(), None);
        assert_eq!(p.user_name.as_deref(), Some("Jane Doe"));
        assert!(!gw
            .calls()
            .iter()
            .any(|c| matches!(c, Call::SignedUrl { .. })));
    }

    #[tokio::test]
    async fn test_stored_image_is_exchanged_for_short_lived_url() {
        let gw = MockGateway::new()
            .with_rows(PROFILE_TABLE, vec![jane(json!("avatars/u1.png"))]);
        let p = resolve_profile(&gw, Some("u1")).await.expect("profile");
        assert_eq!(
            p.custom_avatar(),
            Some("https://mock.test/signed/image_url/avatars/u1.png?ttl=60")
        );
        assert_eq!(
            gw.calls(),
            vec![
                Call::SelectOne {
                    table: "users".into(),
                    column: "user_id".into(),
                    value: "u1".into(),
                },
                Call::SignedUrl {
                    bucket: "image_url".into(),
                    key: "avatars/u1.png".into(),
                    ttl_secs: 60,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_signing_failure_falls_back_to_placeholder() {
        let gw = MockGateway::new()
            .with_rows(PROFILE_TABLE, vec![jane(json!("avatars/u1.png"))])
            .failing_signed_url("Object not found");
        let p = resolve_profile(&gw, Some("u1")).await.expect("profile still resolves");
        assert_eq!(p.avatar_url, PLACEHOLDER_AVATAR);
        assert_eq!(p.email.as_deref(), Some("jdoe@example.com"));
    }

    #[tokio::test]
    async fn test_missing_row_or_read_failure_is_no_profile() {
        let gw = MockGateway::new().with_rows(PROFILE_TABLE, vec![jane(json!(null))]);
        assert_eq!(resolve_profile(&gw, Some("someone-else")).await, None);

        let gw = MockGateway::new().failing_reads(PROFILE_TABLE);
        assert_eq!(resolve_profile(&gw, Some("u1")).await, None);
    }
}
