use shared_models::identity::{Identity, Role};

pub const LANDING: &str = "/";
pub const LOGIN: &str = "/login";
pub const ADMIN_HOME: &str = "/admin";
pub const DOCTOR_HOME: &str = "/doctor";

/// Where a freshly authenticated principal belongs. Roles outside the three
/// known groups are never force-navigated.
pub fn destination_for(role: Role) -> Option<&'static str> {
    match role {
        Role::Admin => Some(ADMIN_HOME),
        Role::Doctor => Some(DOCTOR_HOME),
        Role::Patient | Role::User => Some(LANDING),
        Role::Unknown => None,
    }
}

/// Replace-navigation decision applied whenever the identity becomes
/// non-null. Only fires from the landing or login page; a logged-in user
/// browsing anywhere else is left alone.
pub fn redirect_for(identity: Option<&Identity>, location: &str) -> Option<&'static str> {
    let identity = identity?;
    if location != LANDING && location != LOGIN {
        return None;
    }
    destination_for(identity.role)
}

/// Navigation-chrome variant for the current principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavChrome {
    Guest,
    Patient,
    Doctor,
    Admin,
}

pub fn chrome_for(identity: Option<&Identity>) -> NavChrome {
    match identity.map(|i| i.role) {
        Some(Role::Admin) => NavChrome::Admin,
        Some(Role::Doctor) => NavChrome::Doctor,
        Some(Role::Patient) | Some(Role::User) => NavChrome::Patient,
        _ => NavChrome::Guest,
    }
}

/// Outcome of a guard evaluation for a protected route group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Grant,
    RedirectToLogin,
    RedirectToLanding,
}

/// Allow-list guard shared by every page in a nested route group; evaluated
/// once at the group boundary.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    allowed: Vec<Role>,
}

impl RouteGuard {
    pub fn allowing(roles: &[Role]) -> Self {
        Self {
            allowed: roles.to_vec(),
        }
    }

    pub fn patient_section() -> Self {
        Self::allowing(&[Role::User, Role::Patient])
    }

    pub fn doctor_section() -> Self {
        Self::allowing(&[Role::Doctor])
    }

    pub fn admin_section() -> Self {
        Self::allowing(&[Role::Admin])
    }

    pub fn evaluate(&self, identity: Option<&Identity>) -> Access {
        match identity {
            None => Access::RedirectToLogin,
            Some(identity) if self.allowed.contains(&identity.role) => Access::Grant,
            Some(_) => Access::RedirectToLanding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: "u-1".to_string(),
            name: "Test Person".to_string(),
            email: "test@example.com".to_string(),
            role,
            image: None,
        }
    }

    #[test]
    fn destinations_by_role() {
        assert_eq!(destination_for(Role::Admin), Some(ADMIN_HOME));
        assert_eq!(destination_for(Role::Doctor), Some(DOCTOR_HOME));
        assert_eq!(destination_for(Role::Patient), Some(LANDING));
        assert_eq!(destination_for(Role::User), Some(LANDING));
        assert_eq!(destination_for(Role::Unknown), None);
    }

    #[test]
    fn doctor_on_login_page_is_redirected() {
        let doctor = identity(Role::Doctor);
        assert_eq!(redirect_for(Some(&doctor), LOGIN), Some(DOCTOR_HOME));
        assert_eq!(redirect_for(Some(&doctor), LANDING), Some(DOCTOR_HOME));
    }

    #[test]
    fn no_redirect_away_from_arbitrary_pages() {
        let doctor = identity(Role::Doctor);
        assert_eq!(redirect_for(Some(&doctor), "/my-profile"), None);
        assert_eq!(redirect_for(Some(&doctor), "/about"), None);
    }

    #[test]
    fn guests_are_never_redirected() {
        assert_eq!(redirect_for(None, LOGIN), None);
        assert_eq!(redirect_for(None, LANDING), None);
    }

    #[test]
    fn guard_requires_login_first() {
        let guard = RouteGuard::patient_section();
        assert_eq!(guard.evaluate(None), Access::RedirectToLogin);
    }

    #[test]
    fn guard_matrix_over_roles() {
        let patient = identity(Role::Patient);
        let user = identity(Role::User);
        let doctor = identity(Role::Doctor);
        let admin = identity(Role::Admin);

        let patient_guard = RouteGuard::patient_section();
        assert_eq!(patient_guard.evaluate(Some(&patient)), Access::Grant);
        assert_eq!(patient_guard.evaluate(Some(&user)), Access::Grant);
        assert_eq!(patient_guard.evaluate(Some(&doctor)), Access::RedirectToLanding);

        let admin_guard = RouteGuard::admin_section();
        assert_eq!(admin_guard.evaluate(Some(&admin)), Access::Grant);
        assert_eq!(admin_guard.evaluate(Some(&patient)), Access::RedirectToLanding);

        let doctor_guard = RouteGuard::doctor_section();
        assert_eq!(doctor_guard.evaluate(Some(&doctor)), Access::Grant);
        assert_eq!(doctor_guard.evaluate(Some(&admin)), Access::RedirectToLanding);
    }

    #[test]
    fn chrome_follows_role() {
        assert_eq!(chrome_for(None), NavChrome::Guest);
        assert_eq!(chrome_for(Some(&identity(Role::User))), NavChrome::Patient);
        assert_eq!(chrome_for(Some(&identity(Role::Admin))), NavChrome::Admin);
        assert_eq!(chrome_for(Some(&identity(Role::Unknown))), NavChrome::Guest);
    }
}
