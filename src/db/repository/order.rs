//! Order Repository

use bson::doc;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::options::ReturnDocument;

use super::{BaseRepository, RepoError, RepoResult, parse_object_id};
use crate::db::models::{Order, OrderStatus};
use crate::utils::time::now_millis;

const ORDER_COLLECTION: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn collection(&self) -> mongodb::Collection<Order> {
        self.base.collection(ORDER_COLLECTION)
    }

    /// Insert a new order, returning it with the generated id
    pub async fn create(&self, mut order: Order) -> RepoResult<Order> {
        let result = self.collection().insert_one(&order).await?;
        order.id = result.inserted_id.as_object_id();
        Ok(order)
    }

    /// Find one page of all orders, newest first
    pub async fn find_page(&self, skip: u64, limit: i64) -> RepoResult<Vec<Order>> {
        let orders = self
            .collection()
            .find(doc! {})
            .sort(doc! { "orderDate": -1 })
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(orders)
    }

    /// Count all orders
    pub async fn count(&self) -> RepoResult<u64> {
        Ok(self.collection().count_documents(doc! {}).await?)
    }

    /// Find one page of a customer's orders, newest first
    pub async fn find_page_for_customer(
        &self,
        customer_id: &str,
        skip: u64,
        limit: i64,
    ) -> RepoResult<Vec<Order>> {
        let orders = self
            .collection()
            .find(doc! { "customerId": customer_id })
            .sort(doc! { "orderDate": -1 })
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(orders)
    }

    /// Count a customer's orders
    pub async fn count_for_customer(&self, customer_id: &str) -> RepoResult<u64> {
        Ok(self
            .collection()
            .count_documents(doc! { "customerId": customer_id })
            .await?)
    }

    /// Find an order owned by a specific customer
    ///
    /// An order belonging to someone else is indistinguishable from a
    /// missing one.
    pub async fn find_by_id_for_customer(
        &self,
        id: &str,
        customer_id: &str,
    ) -> RepoResult<Option<Order>> {
        let oid = parse_object_id(id)?;
        let order = self
            .collection()
            .find_one(doc! { "_id": oid, "customerId": customer_id })
            .await?;
        Ok(order)
    }

    /// Update an order's status, returning the updated order
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let oid = parse_object_id(id)?;
        let order = self
            .collection()
            .find_one_and_update(
                doc! { "_id": oid },
                doc! { "$set": { "status": status.as_str(), "updatedAt": now_millis() } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        order.ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }

    /// Fetch all orders placed at or after the given timestamp (report)
    pub async fn find_since(&self, since_millis: i64) -> RepoResult<Vec<Order>> {
        let orders = self
            .collection()
            .find(doc! { "orderDate": { "$gte": since_millis } })
            .await?
            .try_collect()
            .await?;
        Ok(orders)
    }
}
