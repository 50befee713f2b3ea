//! Supplier Repository

use bson::doc;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::options::ReturnDocument;

use super::{BaseRepository, RepoError, RepoResult, parse_object_id};
use crate::db::models::{Supplier, SupplierCreate, SupplierUpdate};

const SUPPLIER_COLLECTION: &str = "suppliers";

#[derive(Clone)]
pub struct SupplierRepository {
    base: BaseRepository,
}

impl SupplierRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn collection(&self) -> mongodb::Collection<Supplier> {
        self.base.collection(SUPPLIER_COLLECTION)
    }

    /// Find one page of suppliers
    pub async fn find_page(&self, skip: u64, limit: i64) -> RepoResult<Vec<Supplier>> {
        let suppliers = self
            .collection()
            .find(doc! {})
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(suppliers)
    }

    /// Count all suppliers
    pub async fn count(&self) -> RepoResult<u64> {
        Ok(self.collection().count_documents(doc! {}).await?)
    }

    /// Find supplier by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Supplier>> {
        let oid = parse_object_id(id)?;
        let supplier = self.collection().find_one(doc! { "_id": oid }).await?;
        Ok(supplier)
    }

    /// Fetch all suppliers (report aggregation)
    pub async fn find_all(&self) -> RepoResult<Vec<Supplier>> {
        let suppliers = self
            .collection()
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        Ok(suppliers)
    }

    /// Create a new supplier
    pub async fn create(&self, data: SupplierCreate) -> RepoResult<Supplier> {
        let mut supplier = Supplier {
            id: None,
            name: data.name,
            contact_email: data.contact_email,
            contact_phone: data.contact_phone,
            address: data.address,
            product_count: None,
        };

        let result = self.collection().insert_one(&supplier).await?;
        supplier.id = result.inserted_id.as_object_id();
        Ok(supplier)
    }

    /// Update a supplier
    pub async fn update(&self, id: &str, data: SupplierUpdate) -> RepoResult<Supplier> {
        if data.is_empty() {
            return Err(RepoError::Validation(
                "No fields provided to update".to_string(),
            ));
        }

        let oid = parse_object_id(id)?;
        let mut set = bson::Document::new();
        if let Some(v) = data.name {
            set.insert("name", v);
        }
        if let Some(v) = data.contact_email {
            set.insert("contactEmail", v);
        }
        if let Some(v) = data.contact_phone {
            set.insert("contactPhone", v);
        }
        if let Some(v) = data.address {
            set.insert("address", v);
        }

        let supplier = self
            .collection()
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        supplier.ok_or_else(|| RepoError::NotFound(format!("Supplier {id} not found")))
    }

    /// Delete a supplier; the reference guard lives in the handler
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let oid = parse_object_id(id)?;
        let deleted = self
            .collection()
            .find_one_and_delete(doc! { "_id": oid })
            .await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Supplier {id} not found")));
        }
        Ok(())
    }
}
