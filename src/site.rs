use std::sync::Arc;

use crate::content::SiteContent;
use crate::session::{
    AuthError, CredentialVerifier, Credentials, Session, SessionGate, SessionStorage,
    can_access_admin,
};

pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
pub const ADMIN_HOME_PATH: &str = "/admin";

/// AdminSection
///
/// Screens nested under `/admin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminSection {
    Dashboard,
    Menu,
    Gallery,
    Blog,
    Unknown(String),
}

/// Page
///
/// Every view the site can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Menu,
    Gallery,
    Story,
    Blog,
    BlogPost(String),
    Contact,
    AdminLogin,
    Admin(AdminSection),
    NotFound,
}

/// Outcome
///
/// What navigating to a path produces once the session gate has had its say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(Page),
    Redirect(&'static str),
}

/// resolve
///
/// Maps a request path onto a page. Query strings, fragments and trailing
/// slashes are ignored; anything unmatched is `NotFound`.
pub fn resolve(path: &str) -> Page {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] | ["home"] => Page::Home,
        ["menu"] => Page::Menu,
        ["gallery"] => Page::Gallery,
        ["story"] => Page::Story,
        ["blog"] => Page::Blog,
        ["blog", slug] => Page::BlogPost(slug.to_string()),
        ["contact"] => Page::Contact,
        ["admin", "login"] => Page::AdminLogin,
        ["admin"] | ["admin", "dashboard"] => Page::Admin(AdminSection::Dashboard),
        ["admin", "menu"] => Page::Admin(AdminSection::Menu),
        ["admin", "gallery"] => Page::Admin(AdminSection::Gallery),
        ["admin", "blog"] => Page::Admin(AdminSection::Blog),
        ["admin", rest @ ..] => Page::Admin(AdminSection::Unknown(rest.join("/"))),
        _ => Page::NotFound,
    }
}

/// guard
///
/// Applies the admin gate. Admin pages redirect to the login screen unless
/// `can_access_admin` holds; the login screen bounces an admin straight to the
/// dashboard. Public pages always render.
pub fn guard(page: Page, session: &Session) -> Outcome {
    let admin = can_access_admin(session);
    match page {
        Page::Admin(_) if !admin => Outcome::Redirect(ADMIN_LOGIN_PATH),
        Page::Admin(AdminSection::Unknown(_)) => Outcome::Render(Page::NotFound),
        Page::AdminLogin if admin => Outcome::Redirect(ADMIN_HOME_PATH),
        page => Outcome::Render(page),
    }
}

/// SiteNavigator
///
/// The client-side router: owns the session gate and re-evaluates the guard on
/// every navigation. Unknown blog slugs render the not-found view.
pub struct SiteNavigator<V, S> {
    content: Arc<SiteContent>,
    gate: SessionGate<V, S>,
}

impl<V: CredentialVerifier, S: SessionStorage> SiteNavigator<V, S> {
    pub fn new(content: Arc<SiteContent>, gate: SessionGate<V, S>) -> Self {
        Self { content, gate }
    }

    pub fn navigate(&self, path: &str) -> Outcome {
        let page = match resolve(path) {
            Page::BlogPost(slug) if self.content.post_by_slug(&slug).is_none() => Page::NotFound,
            page => page,
        };
        guard(page, self.gate.session())
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<&Session, AuthError> {
        self.gate.login(credentials).await
    }

    pub fn logout(&mut self) {
        self.gate.logout();
    }

    pub fn session(&self) -> &Session {
        self.gate.session()
    }
}
