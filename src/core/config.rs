use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Symmetric signing material and token policy for issued bearer tokens
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_key: String,
    pub issuer: String,
    pub audience: String,
    pub token_lifetime: Duration,
    pub jwt_leeway: Duration,
    pub bcrypt_cost: u32,
}

// Keeps the signing key out of logs
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("token_lifetime", &self.token_lifetime)
            .field("jwt_leeway", &self.jwt_leeway)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PaginationConfig {
    pub default_page_size: i64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            pagination: PaginationConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_URL: &'static str = "sqlite://garden_centres.db";
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_string());

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    const MIN_KEY_LENGTH: usize = 32; // HS256 needs at least 256 bits
    const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600; // 1 hour
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60;
    const DEFAULT_BCRYPT_COST: u32 = 10;

    pub fn from_env() -> Result<Self, String> {
        let jwt_key = env::var("JWT_KEY")
            .map_err(|_| "JWT_KEY environment variable is required".to_string())?;
        if jwt_key.len() < Self::MIN_KEY_LENGTH {
            return Err(format!(
                "JWT_KEY must be at least {} bytes long",
                Self::MIN_KEY_LENGTH
            ));
        }

        let issuer = env::var("JWT_ISSUER")
            .map_err(|_| "JWT_ISSUER environment variable is required".to_string())?;

        let audience = env::var("JWT_AUDIENCE")
            .map_err(|_| "JWT_AUDIENCE environment variable is required".to_string())?;

        let token_lifetime_secs = env::var("JWT_EXPIRY_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TOKEN_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_EXPIRY_SECS must be a valid number".to_string())?;

        let jwt_leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| Self::DEFAULT_BCRYPT_COST.to_string())
            .parse::<u32>()
            .map_err(|_| "BCRYPT_COST must be a valid number".to_string())?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err("BCRYPT_COST must be between 4 and 31".to_string());
        }

        Ok(Self {
            jwt_key,
            issuer,
            audience,
            token_lifetime: Duration::from_secs(token_lifetime_secs),
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
            bcrypt_cost,
        })
    }
}

impl PaginationConfig {
    pub fn from_env() -> Result<Self, String> {
        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|_| crate::shared::constants::DEFAULT_PAGE_SIZE.to_string())
            .parse::<i64>()
            .map_err(|_| "DEFAULT_PAGE_SIZE must be a valid number".to_string())?;

        if default_page_size < 1 {
            return Err("DEFAULT_PAGE_SIZE must be greater than 0".to_string());
        }

        Ok(Self { default_page_size })
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: crate::shared::constants::DEFAULT_PAGE_SIZE,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Garden Centres API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Region-scoped garden centre and location management".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
