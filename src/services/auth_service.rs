use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest, UserProfile},
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
    users::{hash_password, verify_password},
};

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<UserProfile>> {
    if !payload.email.contains('@') {
        return Err(AppError::BadRequest("invalid email address".to_string()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let user = User {
        id: Uuid::new_v4(),
        email: payload.email.clone(),
        password_hash: hash_password(&payload.password)?,
        first_name: payload.first_name,
        last_name: payload.last_name,
        company: payload.company,
        phone: payload.phone,
        role: "customer".to_string(),
        created_at: Utc::now(),
    };

    if !state.users.insert(user.clone())? {
        return Err(AppError::BadRequest("Email is already taken".to_string()));
    }

    audit::record(
        Some(user.id),
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "email": user.email })),
    );
    Ok(ApiResponse::success("User created", user.into(), None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let user = state
        .users
        .find_by_email(&email)
        .ok_or_else(|| AppError::BadRequest("Invalid email or password".to_string()))?;

    if !verify_password(&password, &user.password_hash) {
        return Err(AppError::BadRequest("Invalid email or password".to_string()));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role.clone(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    audit::record(Some(user.id), "user_login", Some("users"), None);

    let resp = LoginResponse {
        token: format!("Bearer {token}"),
        user: user.into(),
    };
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}
