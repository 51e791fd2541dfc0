use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct PsqlSettings {
    pub ip: String,
    pub port: u16,
    pub db_name: Option<String>,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
    pub root_cert: Option<String>,
    pub log_statements: PsqlLogStatements,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsqlLogStatements {
    Enable,
    Disable,
}
