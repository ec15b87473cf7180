use rollcall_config::{CorsConfig, JwtConfig};
use rollcall_db::{PgPool, PgStore};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub store: PgStore,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store: PgStore::new(db.clone()),
            db,
            jwt_config,
            cors_config,
        }
    }
}
