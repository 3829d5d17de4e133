//! Navigation collaborator interface.
//!
//! The pipeline never owns routing; auth failures and sign-out hand a
//! [`Route`] to an injected [`Navigator`]. `SignIn` is the only route the
//! core requires (unauthorized/forbidden outcomes and missing credentials
//! always redirect there instead of rendering an in-page error).

/// Targets the core can ask the host to navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
}

/// Route sink supplied by the host shell.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
