pub mod cache;
pub mod models;

pub use cache::ProfileCache;
pub use models::{Profile, UpdateProfileForm};
