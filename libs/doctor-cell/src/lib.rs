pub mod models;
pub mod roster;

pub use models::{DoctorForm, UpdateDoctorForm};
pub use roster::DoctorRoster;
