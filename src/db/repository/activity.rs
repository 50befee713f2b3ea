//! Activity Repository
//!
//! Append-only: there is no update or delete surface for activities.

use bson::doc;
use futures::TryStreamExt;
use mongodb::Database;

use super::{BaseRepository, RepoResult};
use crate::db::models::Activity;

const ACTIVITY_COLLECTION: &str = "activities";

#[derive(Clone)]
pub struct ActivityRepository {
    base: BaseRepository,
}

impl ActivityRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn collection(&self) -> mongodb::Collection<Activity> {
        self.base.collection(ACTIVITY_COLLECTION)
    }

    /// Append an activity record, returning it with the generated id
    pub async fn append(&self, mut activity: Activity) -> RepoResult<Activity> {
        let result = self.collection().insert_one(&activity).await?;
        activity.id = result.inserted_id.as_object_id();
        Ok(activity)
    }

    /// Find one page of activities, newest first
    pub async fn find_page(&self, skip: u64, limit: i64) -> RepoResult<Vec<Activity>> {
        let activities = self
            .collection()
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(activities)
    }

    /// Count all activity records
    pub async fn count(&self) -> RepoResult<u64> {
        Ok(self.collection().count_documents(doc! {}).await?)
    }
}
