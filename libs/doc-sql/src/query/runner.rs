// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use tokio_postgres::GenericClient;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument};

use crate::{
    database_error::DatabaseError,
    sql::{SQLBuilder, SQLParam, connect::database_client::DatabaseClient},
};

use super::{
    cursor::pg::PgRowCursor,
    handler::{QueryResult, ResultHandler, cancellable},
    session::QuerySession,
    statement::Statement,
};

/// Executes statements against the document store and hands the streamed rows to their handlers.
pub struct QueryRunner {
    database_client: DatabaseClient,
}

impl QueryRunner {
    pub fn new(database_client: DatabaseClient) -> Self {
        Self { database_client }
    }

    /// Run a statement with the handler its select clause picks.
    pub async fn query(
        &self,
        statement: &Arc<Statement>,
        session: &QuerySession,
        cancellation: &CancellationToken,
    ) -> Result<QueryResult, DatabaseError> {
        let handler = statement.build_handler(session);
        self.fetch(&handler, session, cancellation).await
    }

    /// Run the handler's command on a pooled connection.
    pub async fn fetch<H: ResultHandler>(
        &self,
        handler: &H,
        session: &QuerySession,
        cancellation: &CancellationToken,
    ) -> Result<H::Output, DatabaseError> {
        let client = self.database_client.get_client().await?;
        fetch_with(&**client, handler, session, cancellation).await
    }
}

/// Run the handler's command on `client`, which may be a plain connection or a transaction.
#[instrument(name = "QueryRunner::fetch", skip_all)]
pub async fn fetch_with<H: ResultHandler>(
    client: &impl GenericClient,
    handler: &H,
    session: &QuerySession,
    cancellation: &CancellationToken,
) -> Result<H::Output, DatabaseError> {
    let (stmt, params) = build_sql(handler, session);

    debug!("Executing SQL query: {}", stmt);

    let rows = cancellable(cancellation, async {
        client
            .query_raw(stmt.as_str(), params.iter().map(|p| p.as_pg()))
            .await
            .map_err(|e| {
                error!("Failed to execute query: {e:?}");
                DatabaseError::Delegate(e).with_context("Document query failed".into())
            })
    })
    .await?;

    let mut cursor = PgRowCursor::new(rows);
    handler.handle_async(&mut cursor, session, cancellation).await
}

fn build_sql<H: ResultHandler>(
    handler: &H,
    session: &QuerySession,
) -> (String, Vec<Arc<dyn SQLParam>>) {
    let mut builder = SQLBuilder::new();
    handler.configure_command(&mut builder, session);
    builder.into_sql()
}
