use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use secrecy::{ExposeSecret, SecretString};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::PgConnectOptions;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Config {
    pub application: Application,
    pub database: Database,
    pub jwt: Jwt,
    pub user_service: UserService,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Application {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub run_migration: bool,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
}

impl Application {
    pub fn get_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_uploads_dir() -> String {
    "./uploads".to_string()
}

#[derive(serde::Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    #[default]
    Postgres,
    Memory,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Jwt {
    pub secret: SecretString,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct UserService {
    pub base_url: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Database {
    pub username: String,
    pub password: SecretString,
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub database_name: String,
}

impl Database {
    pub fn without_db(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(self.password.expose_secret())
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        let base_path = std::env::current_dir()
            .map_err(|e| figment::Error::from(format!("Failed to read current directory: {e}")))?;
        let config_directory = base_path.join("configuration");

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(figment::Error::from)?;

        let environment_filename = format!("{}.yaml", environment.as_str());

        Self::figment(
            Figment::new()
                .merge(Yaml::file(config_directory.join("base.yaml")))
                .merge(Yaml::file(config_directory.join(environment_filename))),
        )
        .extract()
    }

    fn figment(files: Figment) -> Figment {
        files.merge(Env::raw().split("__"))
    }
}
