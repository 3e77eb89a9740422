//! Authentication client and OAuth provider descriptors.
mod api;
mod error;
mod oauth;

#[doc(inline)]
pub use api::{get_auth, Auth};

#[doc(inline)]
pub use error::{AuthError, AuthResult};

#[doc(inline)]
pub use oauth::{GoogleAuthProvider, OAuthProvider, OAuthProviderFactory, OAuthRequest, PkcePair};
