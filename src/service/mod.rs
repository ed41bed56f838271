//! UserService and the age calculation it applies on reads.

mod age;
mod user;
pub use age::{compute_age, Clock, FixedClock, SystemClock};
pub use user::UserService;
