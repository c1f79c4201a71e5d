//! Runtime configuration.
//!
//! Everything the service needs at startup comes from environment variables,
//! deserialized into [`Config`] with the `envy` crate. A `.env` file is
//! honored in development when present.

use serde::Deserialize;

/// Settings read from the environment.
///
/// | Variable         | Required | Meaning                                          |
/// |------------------|----------|--------------------------------------------------|
/// | `DATABASE_URL`   | yes      | PostgreSQL connection string                     |
/// | `SERVER_PORT`    | no       | HTTP listen port, defaults to 3000               |
/// | `IDP_JWT_SECRET` | yes      | Shared secret for identity-provider access tokens |
/// | `IDP_AUDIENCE`   | no       | Expected `aud` claim; unchecked when unset        |
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    pub idp_jwt_secret: String,

    pub idp_audience: Option<String>,
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Read configuration from the environment, loading `.env` first when
    /// one exists.
    ///
    /// Fails when a required variable is absent or a value does not parse
    /// (envy matches fields to variables by uppercasing the name, so
    /// `database_url` reads `DATABASE_URL`).
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }
}
