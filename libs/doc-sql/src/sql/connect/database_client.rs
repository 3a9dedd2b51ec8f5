// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{env, str::FromStr};

use deadpool_postgres::{Client, Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::Config;
use tracing::debug;

use crate::{
    database_error::DatabaseError,
    env_const::{
        DOC_CHECK_CONNECTION_ON_STARTUP, DOC_CONNECTION_POOL_SIZE, DOC_POSTGRES_PASSWORD,
        DOC_POSTGRES_URL, DOC_POSTGRES_USER,
    },
};

const DEFAULT_POOL_SIZE: usize = 10;

/// A pool of connections to the document store.
pub struct DatabaseClient {
    pool: Pool,
}

impl DatabaseClient {
    // pool_size_override useful when we want to explicitly control the pool size (for example, to 1 in tools)
    pub async fn from_env(pool_size_override: Option<usize>) -> Result<Self, DatabaseError> {
        let url = env::var(DOC_POSTGRES_URL).map_err(|_| {
            DatabaseError::Config(format!("Env {DOC_POSTGRES_URL} must be provided"))
        })?;

        let user = env::var(DOC_POSTGRES_USER).ok();
        let password = env::var(DOC_POSTGRES_PASSWORD).ok();

        let pool_size = match pool_size_override {
            Some(pool_size) => pool_size,
            None => parse_env_value(DOC_CONNECTION_POOL_SIZE, env::var(DOC_CONNECTION_POOL_SIZE).ok())?
                .unwrap_or(DEFAULT_POOL_SIZE),
        };

        let check_connection = parse_env_value(
            DOC_CHECK_CONNECTION_ON_STARTUP,
            env::var(DOC_CHECK_CONNECTION_ON_STARTUP).ok(),
        )?
        .unwrap_or(true);

        Self::from_helper(pool_size, check_connection, &url, user, password).await
    }

    pub async fn from_db_url(url: &str) -> Result<Self, DatabaseError> {
        Self::from_helper(1, true, url, None, None).await
    }

    async fn from_helper(
        pool_size: usize,
        check_connection: bool,
        url: &str,
        user: Option<String>,
        password: Option<String>,
    ) -> Result<Self, DatabaseError> {
        let mut config = Config::from_str(url).map_err(|e| {
            DatabaseError::Delegate(e)
                .with_context("Failed to parse PostgreSQL connection string".into())
        })?;

        if let Some(user) = &user {
            config.user(user);
        }
        if let Some(password) = &password {
            config.password(password);
        }

        if config.get_user().is_none() {
            return Err(DatabaseError::Config(format!(
                "Database user must be specified as a part of {DOC_POSTGRES_URL} or through {DOC_POSTGRES_USER}"
            )));
        }

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let manager = Manager::from_config(config, tokio_postgres::NoTls, manager_config);

        let pool = Pool::builder(manager)
            .max_size(pool_size)
            .build()
            .map_err(|e| DatabaseError::Config(format!("Failed to create DB pool: {e}")))?;

        debug!(pool_size, "Created database pool");

        let db = Self { pool };

        if check_connection {
            let _ = db.get_client().await?;
        }

        Ok(db)
    }

    pub async fn get_client(&self) -> Result<Client, DatabaseError> {
        Ok(self.pool.get().await?)
    }
}

/// Parse an optional environment value, treating a present-but-malformed value as a configuration
/// error rather than silently falling back to the default.
fn parse_env_value<T: FromStr>(name: &str, value: Option<String>) -> Result<Option<T>, DatabaseError> {
    value
        .map(|value| {
            value.parse::<T>().map_err(|_| {
                DatabaseError::Config(format!("Invalid {name} value: {value}"))
            })
        })
        .transpose()
}
