//! Wire types for the profile and link endpoints.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Full public projection of an account: identity fields, the optional
/// profile headline, and the link list ordered newest first.
#[derive(ToSchema, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub profile: Option<ProfileView>,
    pub links: Vec<LinkView>,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct ProfileView {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(ToSchema, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub clicks: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Update payload for `PUT /api/profile/{username}/edit`. Absent fields are
/// left unchanged.
#[derive(ToSchema, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EditProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// The three operations multiplexed over `POST /api/profile/{username}`,
/// selected by body shape. `deny_unknown_fields` on each variant keeps the
/// untagged match unambiguous; a body matching none of them is a 400.
#[derive(ToSchema, Deserialize, Debug)]
#[serde(untagged)]
pub enum ProfileAction {
    TrackClick(TrackClickRequest),
    CreateLink(CreateLinkRequest),
    BulkCreate(BulkCreateRequest),
}

#[derive(ToSchema, Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TrackClickRequest {
    pub link_id: Uuid,
}

#[derive(ToSchema, Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateLinkRequest {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(ToSchema, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct BulkCreateRequest {
    pub links: Vec<NewLink>,
}

#[derive(ToSchema, Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_with_link_id_is_a_click() {
        let action: ProfileAction =
            serde_json::from_value(json!({ "linkId": Uuid::nil() })).unwrap();
        assert!(matches!(action, ProfileAction::TrackClick(_)));
    }

    #[test]
    fn body_with_title_and_url_is_a_create() {
        let action: ProfileAction = serde_json::from_value(json!({
            "title": "GitHub",
            "url": "https://github.com/kishan"
        }))
        .unwrap();
        match action {
            ProfileAction::CreateLink(request) => {
                assert_eq!(request.title, "GitHub");
                assert!(request.description.is_none());
            }
            other => panic!("expected CreateLink, got {other:?}"),
        }
    }

    #[test]
    fn body_with_links_array_is_a_bulk_create() {
        let action: ProfileAction = serde_json::from_value(json!({
            "links": [
                { "title": "GitHub", "url": "github.com/kishan" },
                { "title": "Blog", "url": "https://blog.example.com", "description": "posts" }
            ]
        }))
        .unwrap();
        match action {
            ProfileAction::BulkCreate(request) => assert_eq!(request.links.len(), 2),
            other => panic!("expected BulkCreate, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_body_matches_no_variant() {
        let result: Result<ProfileAction, _> =
            serde_json::from_value(json!({ "foo": "bar" }));
        assert!(result.is_err());

        // Extra fields alongside a valid variant are rejected too.
        let result: Result<ProfileAction, _> = serde_json::from_value(json!({
            "linkId": Uuid::nil(),
            "title": "also a title"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn user_view_serializes_camel_case() {
        let view = UserView {
            id: Uuid::nil(),
            username: "kishan".to_string(),
            email: "kishan@example.com".to_string(),
            first_name: Some("Kishan".to_string()),
            last_name: None,
            avatar: None,
            bio: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
            profile: Some(ProfileView {
                title: Some("Developer".to_string()),
                description: None,
            }),
            links: vec![LinkView {
                id: Uuid::nil(),
                title: "GitHub".to_string(),
                url: "https://github.com/kishan".to_string(),
                description: None,
                clicks: 3,
                created_at: OffsetDateTime::UNIX_EPOCH,
            }],
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["firstName"], "Kishan");
        assert_eq!(value["createdAt"], "1970-01-01T00:00:00Z");
        assert_eq!(value["links"][0]["clicks"], 3);
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
    }
}
