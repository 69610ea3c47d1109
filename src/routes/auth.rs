use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest, TokenKeys},
    error::AppError,
    store,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns the redacted user record together
/// with a freshly issued token.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    keys: web::Data<TokenKeys>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let user = store::users::create(
        &pool,
        &register_data.name,
        &register_data.email,
        &register_data.password,
    )
    .await?;

    let token = keys.issue(user.id)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}

/// Login user
///
/// Authenticates a user and returns a token. An unknown email and a wrong
/// password are indistinguishable to the caller.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    keys: web::Data<TokenKeys>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let creds = match store::users::find_by_email(&pool, &login_data.email).await? {
        Some(creds) => creds,
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
    };

    if !store::users::verify_secret(&creds, &login_data.password)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = keys.issue(creds.id)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        id: creds.id,
        name: creds.name,
        email: creds.email,
        token,
    }))
}
