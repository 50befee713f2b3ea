//! Document models
//!
//! One module per collection. Each model carries its stored shape
//! (camelCase field names, `_id` rendered as a 24-hex string at the API
//! boundary) plus the create/update payload structs used by the handlers.

pub mod serde_helpers;

pub mod activity;
pub mod feedback;
pub mod order;
pub mod payment;
pub mod product;
pub mod supplier;
pub mod user;

pub use activity::{Activity, ActivityCreate, EntityType};
pub use feedback::{Feedback, FeedbackCreate};
pub use order::{Order, OrderItem, OrderItemInput, OrderStatus};
pub use payment::{Payment, PaymentCreate, PaymentMethod, PaymentStatus};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use supplier::{Supplier, SupplierCreate, SupplierUpdate};
pub use user::{CartItem, Role, User, UserCreate, UserProfileUpdate};
