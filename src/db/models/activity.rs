//! Activity Model
//!
//! Append-only audit records of mutating actions.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Entity kinds an activity can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Order,
    Product,
    Supplier,
    User,
}

/// Activity model matching the `activities` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_object_id"
    )]
    pub id: Option<ObjectId>,
    pub action: String,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub details: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// Manual activity entry payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCreate {
    pub action: String,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub details: String,
}
