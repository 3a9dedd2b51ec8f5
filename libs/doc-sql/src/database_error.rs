// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation: {0}")]
    Validation(String),

    /// The requested combination of query features can't be honored (for example, statistics
    /// over a raw JSON projection). Raised while building the query, before any SQL runs.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Query was cancelled")]
    Cancelled,

    #[error("Result has {0} entries; expected only zero or one")]
    NonUniqueResult(usize),

    #[error("Query returned no results")]
    NoResult,

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Delegate: {0}")]
    Delegate(#[from] tokio_postgres::Error),

    #[error("Pool: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("{0} {1}")]
    WithContext(String, #[source] Box<DatabaseError>),
}

impl DatabaseError {
    pub fn with_context(self, context: String) -> DatabaseError {
        DatabaseError::WithContext(context, Box::new(self))
    }

    /// Whether this error (or the error it wraps) is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        match self {
            DatabaseError::Cancelled => true,
            DatabaseError::WithContext(_, inner) => inner.is_cancelled(),
            _ => false,
        }
    }
}

pub trait WithContext {
    fn with_context(self, context: String) -> Self;
}

impl<T> WithContext for Result<T, DatabaseError> {
    fn with_context(self, context: String) -> Result<T, DatabaseError> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_seen_through_context() {
        let err = DatabaseError::Cancelled.with_context("Fetching people".into());
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "Fetching people Query was cancelled");

        assert!(!DatabaseError::NoResult.is_cancelled());
    }

    #[test]
    fn result_with_context() {
        let result: Result<(), DatabaseError> = Err(DatabaseError::NonUniqueResult(3));
        let err = result.with_context("Loading user".into()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Loading user Result has 3 entries; expected only zero or one"
        );
    }
}
