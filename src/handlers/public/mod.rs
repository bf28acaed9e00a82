// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and liveness. Mounted outside the JWT middleware.

pub mod health;
pub mod login;

pub use health::health;
pub use login::login;
