//! Route gate: a pure decision over session state and the class of the
//! requested view. The rendering layer owns the actual navigation; this
//! module only answers whether a view is reachable and where to send the
//! visitor otherwise.

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/home";

/// Route classes the rendering layer asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Reachable only while anonymous (login, signup).
    PublicOnly,
    /// Reachable only while authenticated (catalog, profile, password).
    PrivateOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(&'static str),
}

/// The four-row gate policy. Anonymous visitors bounce off private views to
/// the login page; authenticated users bounce off the public-only pages to
/// home.
pub fn decide(is_auth: bool, class: RouteClass) -> Decision {
    match (is_auth, class) {
        (false, RouteClass::PublicOnly) => Decision::Allow,
        (false, RouteClass::PrivateOnly) => Decision::RedirectTo(LOGIN_PATH),
        (true, RouteClass::PublicOnly) => Decision::RedirectTo(HOME_PATH),
        (true, RouteClass::PrivateOnly) => Decision::Allow,
    }
}

/// Classify a known view path; `None` for `/` and anything unrouted.
pub fn classify(path: &str) -> Option<RouteClass> {
    match path {
        "/login" | "/signup" => Some(RouteClass::PublicOnly),
        "/home" | "/profile" | "/change-password" => Some(RouteClass::PrivateOnly),
        p if p.strip_prefix("/products/").is_some_and(|id| !id.is_empty()) => {
            Some(RouteClass::PrivateOnly)
        }
        _ => None,
    }
}

/// Gate a raw path. Known views go through [`decide`]; `/` and unknown
/// paths have nothing to render on either side, so both redirect: anonymous
/// to the login page, authenticated to home.
pub fn route(is_auth: bool, path: &str) -> Decision {
    match classify(path) {
        Some(class) => decide(is_auth, class),
        None => Decision::RedirectTo(if is_auth { HOME_PATH } else { LOGIN_PATH }),
    }
}
