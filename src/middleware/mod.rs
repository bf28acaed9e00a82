pub mod auth;
pub mod authorize;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use authorize::{ensure_admin, ensure_admin_or_correct_user, ensure_correct_user};
pub use response::{ApiResponse, ApiResult};
