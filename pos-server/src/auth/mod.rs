//! 认证模块
//!
//! JWT 令牌签发/验证、密码哈希和认证中间件。

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
