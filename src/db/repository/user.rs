//! User Repository

use bson::oid::ObjectId;
use bson::{Bson, Document, doc};
use mongodb::Database;
use mongodb::options::ReturnDocument;

use super::{BaseRepository, RepoError, RepoResult, parse_object_id};
use crate::db::models::{CartItem, User, UserCreate};

const USER_COLLECTION: &str = "users";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

/// Profile patch with the password already hashed
#[derive(Debug, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub low_stock_threshold: Option<i64>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.low_stock_threshold.is_none()
    }
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn collection(&self) -> mongodb::Collection<User> {
        self.base.collection(USER_COLLECTION)
    }

    /// Find a user by unique email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = self.collection().find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    /// Find a user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let oid = parse_object_id(id)?;
        let user = self.collection().find_one(doc! { "_id": oid }).await?;
        Ok(user)
    }

    /// Insert a new user, returning its generated id
    pub async fn create(&self, data: UserCreate) -> RepoResult<ObjectId> {
        let result = self
            .base
            .collection::<UserCreate>(USER_COLLECTION)
            .insert_one(&data)
            .await?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| RepoError::Database("Insert returned a non-ObjectId id".to_string()))
    }

    /// Apply a profile patch and return the updated user
    pub async fn update_profile(&self, id: &str, patch: ProfilePatch) -> RepoResult<User> {
        if patch.is_empty() {
            return Err(RepoError::Validation(
                "No fields provided to update".to_string(),
            ));
        }

        let oid = parse_object_id(id)?;
        let mut set = Document::new();
        if let Some(v) = patch.name {
            set.insert("name", v);
        }
        if let Some(v) = patch.email {
            set.insert("email", v);
        }
        if let Some(v) = patch.password_hash {
            set.insert("password", v);
        }
        if let Some(v) = patch.low_stock_threshold {
            set.insert("lowStockThreshold", v);
        }

        let user = self
            .collection()
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        user.ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
    }

    /// Replace the stored cart
    pub async fn set_cart(&self, id: &str, items: &[CartItem]) -> RepoResult<Vec<CartItem>> {
        let oid = parse_object_id(id)?;
        let items_bson: Vec<Bson> = items
            .iter()
            .map(|i| {
                Bson::Document(doc! {
                    "productId": &i.product_id,
                    "quantity": i.quantity,
                    "price": i.price,
                })
            })
            .collect();

        let user = self
            .collection()
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": { "cartItems": items_bson } })
            .return_document(ReturnDocument::After)
            .await?;

        user.map(|u| u.cart_items)
            .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
    }

    /// Empty the stored cart (after a successful order)
    pub async fn clear_cart(&self, id: &str) -> RepoResult<()> {
        let oid = parse_object_id(id)?;
        self.collection()
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": { "cartItems": Vec::<Bson>::new() } },
            )
            .await?;
        Ok(())
    }

    /// Replace the favorites set
    pub async fn set_favorites(&self, id: &str, favorites: &[String]) -> RepoResult<Vec<String>> {
        let oid = parse_object_id(id)?;
        let user = self
            .collection()
            .find_one_and_update(
                doc! { "_id": oid },
                doc! { "$set": { "favorites": favorites.to_vec() } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        user.map(|u| u.favorites)
            .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
    }
}
