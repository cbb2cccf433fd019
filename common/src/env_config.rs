use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Holds everything needed to initialize and run the process: database
/// connection, JWT signing options, bind address, worker count, CORS origin,
/// logging preference, and the payment provider credentials. Assembled once at
/// startup and passed into constructors; nothing reads the environment after
/// this point.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// Configuration for JWT (JSON Web Token) authentication.
    pub jwt_config: JwtConfig,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Payment provider credentials and defaults.
    pub payment: PaymentConfig,
}

#[derive(Clone, Debug)]
/// Credentials for the payment provider.
///
/// When `key_id` is empty the provider adapter runs in mock mode: orders are
/// minted locally and every signature verifies. Intended for development only.
pub struct PaymentConfig {
    /// API key id issued by the provider.
    pub key_id: String,
    /// Shared secret used for order auth and signature verification.
    pub key_secret: String,
    /// Base URL of the provider's order API.
    pub api_base_url: String,
    /// Currency charged for subscription orders.
    pub currency: String,
}

impl PaymentConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        PaymentConfig {
            key_id: env::var("PAYMENT_KEY_ID").unwrap_or_default(),
            key_secret: env::var("PAYMENT_KEY_SECRET").unwrap_or_default(),
            api_base_url: env::var("PAYMENT_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com/v1".to_string()),
            currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".to_string()),
        }
    }
}

#[derive(Clone, Debug)]
/// Configuration for JSON Web Token (JWT) authentication.
pub struct JwtConfig {
    /// The secret key used to sign and verify JWTs.
    pub secret: String,
    /// The validity window for issued tokens, in days.
    pub expiration_days: i64,
}

impl JwtConfig {
    /// Creates a new `JwtConfig` instance from environment variables.
    ///
    /// - `JWT_SECRET`: Required.
    /// - `JWT_EXPIRATION_DAYS`: Optional, defaults to 7.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset or `JWT_EXPIRATION_DAYS` is not a
    /// number.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        JwtConfig {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            expiration_days: env::var("JWT_EXPIRATION_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("JWT_EXPIRATION_DAYS must be a valid number"),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// Required:
    /// - `ENVIRONMENT`: "development" or "production"
    /// - `DATABASE_URL`: Connection string for the database
    /// - `JWT_SECRET`: Secret key for JWT signing (via `JwtConfig::from_env()`)
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `PAYMENT_KEY_ID` / `PAYMENT_KEY_SECRET`: provider credentials (mock
    ///   mode when absent)
    ///
    /// # Panics
    ///
    /// Panics if required environment variables are missing or numeric values
    /// cannot be parsed.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_config: JwtConfig::from_env(),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            payment: PaymentConfig::from_env(),
        })
    }
}
