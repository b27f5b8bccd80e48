mod credential;
mod session;

pub use credential::CredentialContext;
pub use session::SESSION_COOKIE;
pub use session::Session;
pub use session::SessionManager;
