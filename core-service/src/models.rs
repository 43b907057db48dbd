//! Domain model for user profiles.
//!
//! Wire payloads use snake_case keys, which match the field names here, and
//! RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Avatar used when a profile has none of its own.
pub const DEFAULT_PROFILE_IMAGE: &str = "person.circle.fill";

/// A user profile and the activity records it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unparseable or missing ids on the wire get a fresh id.
    #[serde(default = "Uuid::new_v4", deserialize_with = "lenient_id")]
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub bio: String,
    #[serde(default = "default_profile_image")]
    pub profile_image_name: String,
    pub post_count: u32,
    pub follower_count: u32,
    pub following_count: u32,
    /// Local only; never sent or read on the wire.
    #[serde(skip)]
    pub activities: Vec<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One entry of a user's recent activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: Uuid,
    pub description: String,
    /// Relative label such as "2h ago".
    pub time_ago: String,
}

impl Activity {
    pub fn new(description: impl Into<String>, time_ago: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            time_ago: time_ago.into(),
        }
    }
}

impl User {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        bio: impl Into<String>,
        post_count: u32,
        follower_count: u32,
        following_count: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            username: username.into(),
            bio: bio.into(),
            profile_image_name: default_profile_image(),
            post_count,
            follower_count,
            following_count,
            activities: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_profile_image(mut self, name: impl Into<String>) -> Self {
        self.profile_image_name = name.into();
        self
    }

    pub fn with_activities(mut self, activities: Vec<Activity>) -> Self {
        self.activities = activities;
        self
    }

    /// Demo profile with a few recent activities.
    pub fn sample() -> Self {
        User::new(
            "John Doe",
            "@johndoe",
            "iOS Developer | SwiftUI Enthusiast | Coffee Lover",
            42,
            589,
            217,
        )
        .with_activities(vec![
            Activity::new("Posted a new photo", "2h ago"),
            Activity::new("Liked a post", "4h ago"),
            Activity::new("Commented on a thread", "1d ago"),
            Activity::new("Started following @swiftui_tips", "2d ago"),
        ])
    }
}

fn default_profile_image() -> String {
    DEFAULT_PROFILE_IMAGE.to_string()
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4))
}
