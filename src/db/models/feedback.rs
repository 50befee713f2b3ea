//! Feedback Model

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Feedback model matching the `feedback` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_object_id"
    )]
    pub id: Option<ObjectId>,
    /// Author user id (24-hex string), always taken from the token
    pub user_id: String,
    pub product_id: String,
    pub comment: String,
    pub rating: i32,
    #[serde(default)]
    pub created_at: i64,
}

/// Create feedback payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCreate {
    pub product_id: String,
    pub comment: String,
    pub rating: i32,
}
