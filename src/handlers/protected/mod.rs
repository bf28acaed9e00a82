// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`, so handlers can take
// `Extension<AuthUser>`. Admin and ownership checks are made per handler with
// the predicates in `middleware::authorize`.

pub mod questions;
pub mod standards;
pub mod subjects;
pub mod units;
pub mod users;
