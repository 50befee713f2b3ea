//! Payment Repository

use bson::doc;
use futures::TryStreamExt;
use mongodb::Database;

use super::{BaseRepository, RepoResult};
use crate::db::models::Payment;

const PAYMENT_COLLECTION: &str = "payments";

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn collection(&self) -> mongodb::Collection<Payment> {
        self.base.collection(PAYMENT_COLLECTION)
    }

    /// Insert a new payment record, returning it with the generated id
    pub async fn create(&self, mut payment: Payment) -> RepoResult<Payment> {
        let result = self.collection().insert_one(&payment).await?;
        payment.id = result.inserted_id.as_object_id();
        Ok(payment)
    }

    /// Fetch all payment records
    pub async fn find_all(&self) -> RepoResult<Vec<Payment>> {
        let payments = self
            .collection()
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        Ok(payments)
    }
}
