//! Central route table.

use std::fmt;

use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Products,
    Animals,
    Cart,
    AdoptionForm { animal_id: i64 },
    Profile,
    OrderHistory,
    AdoptionRequests,
    Admin,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "home".to_string(),
            Route::Login => "login".to_string(),
            Route::Register => "register".to_string(),
            Route::Products => "products".to_string(),
            Route::Animals => "animals".to_string(),
            Route::Cart => "cart".to_string(),
            Route::AdoptionForm { animal_id } => format!("adoption_form/{animal_id}"),
            Route::Profile => "profile".to_string(),
            Route::OrderHistory => "order_history".to_string(),
            Route::AdoptionRequests => "adoption_requests".to_string(),
            Route::Admin => "admin".to_string(),
        }
    }

    /// Inverse of `path`. Leading and trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim_matches('/');
        if let Some(id) = path.strip_prefix("adoption_form/") {
            return id.parse().ok().map(|animal_id| Route::AdoptionForm { animal_id });
        }
        let route = match path {
            "" | "home" => Route::Home,
            "login" => Route::Login,
            "register" => Route::Register,
            "products" => Route::Products,
            "animals" => Route::Animals,
            "cart" => Route::Cart,
            "profile" => Route::Profile,
            "order_history" => Route::OrderHistory,
            "adoption_requests" => Route::AdoptionRequests,
            "admin" => Route::Admin,
            _ => return None,
        };
        Some(route)
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Cart
                | Route::AdoptionForm { .. }
                | Route::Profile
                | Route::OrderHistory
                | Route::AdoptionRequests
                | Route::Admin
        )
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Admin)
    }

    /// Where navigation to `self` actually lands for this session: login
    /// when a session is needed and missing, home for non-admins on admin
    /// routes.
    pub fn resolve(self, session: &SessionStore) -> Route {
        if self.requires_auth() && session.user_id().is_none() {
            return Route::Login;
        }
        if self.requires_admin() && !session.is_admin() {
            return Route::Home;
        }
        self
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
