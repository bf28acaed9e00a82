pub mod question;
pub mod standard;
pub mod subject;
pub mod unit;
pub mod user;

pub use question::{NewQuestion, Question};
pub use standard::{NewStandard, Standard};
pub use subject::{NewSubject, Subject};
pub use unit::{JsonObject, NewUnit, Unit, UnitDetail, UnitUpdate};
pub use user::{NewUser, User, UserUpdate};
