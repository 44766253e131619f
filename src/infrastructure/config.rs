use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Pool size; `None` keeps the driver default (one connection for SQLite)
    pub max_connections: Option<u32>,
    pub seed_demo: bool,
    pub profile: String,
}

impl Config {
    pub fn from_env() -> Self {
        let profile = env::var("PROFILE").unwrap_or_else(|_| "default".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            if profile == "default" {
                "sqlite://student_management.db?mode=rwc".to_string()
            } else {
                format!("sqlite://student_management_{}.db?mode=rwc", profile)
            }
        });

        Self {
            database_url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &u32| n > 0),
            seed_demo: env::var("SEED_DEMO").is_ok(),
            profile,
        }
    }
}
