//! CLI subcommands.

use sha2::{Digest, Sha256};

use innkeeper_app::database::Db;

pub(crate) mod db;
pub(crate) mod grant;
pub(crate) mod hotel;
pub(crate) mod operator;
pub(crate) mod seed;

pub(crate) async fn connect(database_url: &str) -> Result<Db, String> {
    innkeeper_app::database::connect(database_url)
        .await
        .map(Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}

pub(crate) fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}
