pub mod models;
pub mod storage;
pub mod store;
pub mod sync;

pub use models::{LoginRequest, RegisterForm, SessionEvent, SessionState};
pub use storage::SessionFile;
pub use store::SessionStore;
pub use sync::{ProfileRefresher, SessionSync};
