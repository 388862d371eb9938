pub mod record;
pub mod user;

pub use record::*;
pub use user::*;
