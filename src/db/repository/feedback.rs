//! Feedback Repository

use bson::doc;
use futures::TryStreamExt;
use mongodb::Database;

use super::{BaseRepository, RepoResult};
use crate::db::models::Feedback;

const FEEDBACK_COLLECTION: &str = "feedback";

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn collection(&self) -> mongodb::Collection<Feedback> {
        self.base.collection(FEEDBACK_COLLECTION)
    }

    /// Insert a new feedback entry, returning it with the generated id
    pub async fn create(&self, mut feedback: Feedback) -> RepoResult<Feedback> {
        let result = self.collection().insert_one(&feedback).await?;
        feedback.id = result.inserted_id.as_object_id();
        Ok(feedback)
    }

    /// All feedback for one product, newest first
    pub async fn find_by_product(&self, product_id: &str) -> RepoResult<Vec<Feedback>> {
        let feedback = self
            .collection()
            .find(doc! { "productId": product_id })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(feedback)
    }

    /// Find one page of all feedback, newest first
    pub async fn find_page(&self, skip: u64, limit: i64) -> RepoResult<Vec<Feedback>> {
        let feedback = self
            .collection()
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(feedback)
    }

    /// Count all feedback entries
    pub async fn count(&self) -> RepoResult<u64> {
        Ok(self.collection().count_documents(doc! {}).await?)
    }
}
