use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::auth::token::TokenKeys;
use crate::error::AppError;
use crate::models::User;
use crate::store;

/// The authenticated user for the current request, resolved from the
/// `Authorization: Bearer <token>` header.
///
/// Extraction performs the full identity resolution: strict bearer-scheme
/// parsing, token verification against the process-wide keys, and a lookup of
/// the subject in the user store. The resolved record is redacted (no secret
/// material) and handed to the handler as an argument; nothing is attached to
/// shared request state and nothing is cached between requests.
///
/// A valid token whose subject no longer exists fails closed with 401 rather
/// than resolving to an absent identity.
#[derive(Debug)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let token = bearer_token(&req)
                .ok_or_else(|| AppError::Unauthorized("Not authorized, no token".into()))?;

            let keys = req
                .app_data::<web::Data<TokenKeys>>()
                .ok_or_else(|| AppError::Internal("Token keys not configured".into()))?;

            let claims = keys.verify(token).map_err(|e| {
                // The specific failure reason is for the server log only.
                log::warn!("token verification failed: {}", e);
                AppError::Unauthorized("Not authorized, token failed".into())
            })?;

            let pool = req
                .app_data::<web::Data<PgPool>>()
                .ok_or_else(|| AppError::Internal("Database pool not configured".into()))?;

            match store::users::find_by_id(pool.get_ref(), claims.sub).await? {
                Some(user) => Ok(CurrentUser(user)),
                None => {
                    // Valid token for a deleted account: fail closed.
                    log::warn!("token subject {} no longer exists", claims.sub);
                    Err(AppError::Unauthorized("Not authorized, token failed".into()).into())
                }
            }
        })
    }
}

/// Returns the token from an `Authorization` header of exactly the form
/// `Bearer <token>`; any other scheme or framing is treated as absent.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
