use crate::models::session::{Identity, Role};

/// Screens of the application, for client-side gating only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Events,
    CreateEvent,
    Profile,
    Recommendations,
    SavedEvents,
}

/// What to do when someone navigates to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    RedirectHome,
}

impl Route {
    /// Role a route is reserved for, if any
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::CreateEvent => Some(Role::Admin),
            Route::Profile | Route::Recommendations | Route::SavedEvents => Some(Role::Student),
            Route::Login | Route::Register | Route::Events => None,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    pub fn check(&self, user: Option<&Identity>) -> RouteDecision {
        match (user, self.is_public()) {
            (None, true) => RouteDecision::Allow,
            (None, false) => RouteDecision::RedirectToLogin,
            (Some(_), true) => RouteDecision::RedirectHome,
            (Some(user), false) => match self.required_role() {
                Some(role) if user.role != role => RouteDecision::RedirectHome,
                _ => RouteDecision::Allow,
            },
        }
    }
}
