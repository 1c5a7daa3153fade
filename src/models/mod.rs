pub mod order;
pub mod product;
pub mod user;

pub use order::{OrderCreate, OrderRecord, OrderStatusUpdate};
pub use product::{ProductCreate, ProductPatch, ProductRecord, ProductSearchQuery};
pub use user::{LoginRequest, RegisterRequest, Role, StoredUser, TokenResponse, UserRecord};
