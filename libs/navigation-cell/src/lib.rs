pub mod router;

pub use router::{
    chrome_for, destination_for, redirect_for, Access, NavChrome, RouteGuard, ADMIN_HOME,
    DOCTOR_HOME, LANDING, LOGIN,
};
