//! Product Repository

use bson::doc;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::options::ReturnDocument;

use super::{BaseRepository, RepoError, RepoResult, parse_object_id};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::utils::time::now_millis;

const PRODUCT_COLLECTION: &str = "products";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn collection(&self) -> mongodb::Collection<Product> {
        self.base.collection(PRODUCT_COLLECTION)
    }

    /// Find one page of products in insertion order
    pub async fn find_page(&self, skip: u64, limit: i64) -> RepoResult<Vec<Product>> {
        let products = self
            .collection()
            .find(doc! {})
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(products)
    }

    /// Count all products
    pub async fn count(&self) -> RepoResult<u64> {
        Ok(self.collection().count_documents(doc! {}).await?)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let oid = parse_object_id(id)?;
        let product = self.collection().find_one(doc! { "_id": oid }).await?;
        Ok(product)
    }

    /// Fetch the whole catalog (report aggregation)
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products = self
            .collection()
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        Ok(products)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let mut product = Product {
            id: None,
            name: data.name,
            price: data.price,
            quantity: data.quantity,
            image_url: data.image_url,
            category: data.category,
            supplier_id: data.supplier_id,
            created_at: now_millis(),
            updated_at: None,
        };

        let result = self.collection().insert_one(&product).await?;
        product.id = result.inserted_id.as_object_id();
        Ok(product)
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
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
        if let Some(v) = data.price {
            set.insert("price", v);
        }
        if let Some(v) = data.quantity {
            set.insert("quantity", v);
        }
        if let Some(v) = data.image_url {
            set.insert("imageUrl", v);
        }
        if let Some(v) = data.category {
            set.insert("category", v);
        }
        if let Some(v) = data.supplier_id {
            set.insert("supplierId", v);
        }
        set.insert("updatedAt", now_millis());

        let product = self
            .collection()
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        product.ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
    }

    /// Decrement stock after an order line was placed
    pub async fn decrement_quantity(&self, id: &str, quantity: i64) -> RepoResult<()> {
        let oid = parse_object_id(id)?;
        self.collection()
            .update_one(doc! { "_id": oid }, doc! { "$inc": { "quantity": -quantity } })
            .await?;
        Ok(())
    }

    /// Count products referencing a supplier
    pub async fn count_by_supplier(&self, supplier_id: &str) -> RepoResult<u64> {
        Ok(self
            .collection()
            .count_documents(doc! { "supplierId": supplier_id })
            .await?)
    }
}
