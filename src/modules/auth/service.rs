use anyhow::anyhow;
use rollcall_auth::create_session_token;
use rollcall_config::JwtConfig;
use rollcall_core::{AppError, hash_password, verify_password};
use rollcall_db::{PgStore, RevocationStore};
use rollcall_models::{AuthResponse, LoginRequest, SignupRequest, User};
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use crate::{audit_event, security_event};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, phone, role, university_id, created_at";

#[derive(FromRow)]
pub struct UserWithPassword {
    #[sqlx(flatten)]
    pub user: User,
    pub password: String,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn signup(
        db: &PgPool,
        dto: SignupRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let role = dto.role();
        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (first_name, last_name, email, phone, role, university_id, password)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(role)
        .bind(&dto.university_id)
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                let field = match db_err.constraint() {
                    Some("users_university_id_key") => "university id",
                    Some("users_phone_key") => "phone number",
                    _ => "email",
                };
                return AppError::conflict(anyhow!("A user with this {} already exists", field));
            }
            AppError::database(e)
        })?;

        audit_event!("user.signup", "users", user.id = user.id, user.role = %user.role);

        let auth_token = create_session_token(user.id, user.role, jwt_config)?;

        Ok(AuthResponse { auth_token, user })
    }

    #[instrument(skip(db))]
    pub async fn find_user_by_email(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<UserWithPassword>, AppError> {
        sqlx::query_as::<_, UserWithPassword>(&format!(
            "SELECT {USER_COLUMNS}, password FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let Some(found) = Self::find_user_by_email(db, &dto.email).await? else {
            security_event!("auth.login_failed", reason = "unknown email", "Login failed");
            return Err(AppError::unauthorized("Invalid email or password"));
        };

        if !verify_password(&dto.password, &found.password)? {
            security_event!(
                "auth.login_failed",
                user.id = found.user.id,
                reason = "wrong password",
                "Login failed"
            );
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let auth_token = create_session_token(found.user.id, found.user.role, jwt_config)?;

        Ok(AuthResponse {
            auth_token,
            user: found.user,
        })
    }

    #[instrument(skip(store, token))]
    pub async fn logout(store: &PgStore, user_id: i64, token: &str) -> Result<(), AppError> {
        store.revoke(token).await?;
        audit_event!("user.logout", "revoked_tokens", user.id = user_id);
        Ok(())
    }
}
