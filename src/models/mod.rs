pub mod user;

pub use user::{AuthenticatedUser, DeletedUser};
