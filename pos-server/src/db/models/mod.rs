//! Database Models
//!
//! SurrealDB 实体模型和请求/响应 DTO。
//! 时间戳统一为 `i64` Unix millis (UTC)，ID 统一为 `"table:id"` 字符串格式。

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod serde_helpers;
pub mod settings;
pub mod transaction;
pub mod user;

pub use category::{Category, CategoryCreate};
pub use dining_table::{DiningTable, DiningTableCreate, TableStatus};
pub use menu_item::{MenuItem, MenuItemCreate};
pub use order::{Order, OrderCreate, OrderLine, OrderLineInput, OrderStatus, OrderType};
pub use settings::{Settings, SettingsUpdate};
pub use transaction::{PaymentMethod, Transaction, TransactionCreate};
pub use user::{User, UserCreate, UserLogin};
