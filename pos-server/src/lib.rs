//! POS Server - 单店餐厅销售终端后端
//!
//! # 架构概述
//!
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储、仓储层、单号序列
//! - **报表** (`reports`): 时间窗口营收聚合引擎
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、服务器生命周期
//! ├── auth/          # JWT 认证、权限中间件
//! ├── db/            # 数据库层 (models / repository / sequence)
//! ├── reports/       # 报表窗口和聚合引擎
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、时间工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod reports;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在读取 [`Config`] 之前调用，否则 .env 中的配置不生效。
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(None, log_dir.as_deref());
}
