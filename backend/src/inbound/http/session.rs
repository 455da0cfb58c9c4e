//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cart belongs to whoever holds the session cookie. The cookie carries
//! an opaque [`CartSessionId`] minted on first use; handlers never accept a
//! session identity from the request body or query string.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{CartSessionId, Error};

pub(crate) const CART_SESSION_KEY: &str = "cart_session_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Fetch the cart identity stored in the cookie, if any.
    ///
    /// A stored value that fails validation is treated as absent.
    pub fn existing_cart_session(&self) -> Result<Option<CartSessionId>, Error> {
        let raw = self
            .0
            .get::<String>(CART_SESSION_KEY)
            .map_err(|error| {
                warn!(%error, "failed to read session cookie");
                Error::internal("Failed to read session")
            })?;
        Ok(raw.and_then(|value| match CartSessionId::new(value) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "discarding invalid cart session id");
                None
            }
        }))
    }

    /// Return the caller's cart identity, minting and persisting a fresh one
    /// when the cookie has none yet.
    pub fn cart_session_id(&self) -> Result<CartSessionId, Error> {
        if let Some(id) = self.existing_cart_session()? {
            return Ok(id);
        }
        let id = CartSessionId::random();
        self.0
            .insert(CART_SESSION_KEY, id.as_str())
            .map_err(|error| {
                warn!(%error, "failed to persist session cookie");
                Error::internal("Failed to persist session")
            })?;
        Ok(id)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
