// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::future::Future;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;

use crate::{database_error::DatabaseError, sql::SQLBuilder};

use super::{
    cursor::RowCursor,
    selector::{Document, DocumentSelector, StringValueSelector},
    session::QuerySession,
};

pub mod json_array;
pub mod list;
pub mod one_result;

use json_array::JsonArrayHandler;
use list::ListQueryHandler;
use one_result::OneResultHandler;

/// Consumes the rows of one executed statement.
///
/// The same handler both contributes the SQL (through [ResultHandler::configure_command]) and
/// interprets the rows that SQL produces, so the two can't disagree about column shape.
#[async_trait]
pub trait ResultHandler: Send + Sync {
    type Output: Send;

    fn configure_command(&self, builder: &mut SQLBuilder, session: &QuerySession);

    /// Consume the cursor, suspending on every row advance and every column drain.
    ///
    /// Cancellation is observed at each of those points and yields [DatabaseError::Cancelled];
    /// whatever was assembled so far is dropped.
    async fn handle_async(
        &self,
        cursor: &mut dyn RowCursor,
        session: &QuerySession,
        cancellation: &CancellationToken,
    ) -> Result<Self::Output, DatabaseError>;

    /// Blocking form of [ResultHandler::handle_async]. Runs the same algorithm to completion on
    /// the current thread.
    ///
    /// Refused with [DatabaseError::Unsupported] when called from within a tokio runtime: a
    /// database cursor is driven by a connection task on that runtime, which blocking here would
    /// starve. Use [ResultHandler::handle_async] there.
    fn handle(
        &self,
        cursor: &mut dyn RowCursor,
        session: &QuerySession,
    ) -> Result<Self::Output, DatabaseError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(DatabaseError::Unsupported(
                "Blocking result handling from within an async runtime, use handle_async".into(),
            ));
        }

        futures::executor::block_on(self.handle_async(cursor, session, &CancellationToken::new()))
    }
}

/// Run `work` unless (or until) the token is cancelled.
pub(crate) async fn cancellable<T>(
    cancellation: &CancellationToken,
    work: impl Future<Output = Result<T, DatabaseError>>,
) -> Result<T, DatabaseError> {
    tokio::select! {
        biased;
        _ = cancellation.cancelled() => Err(DatabaseError::Cancelled),
        result = work => result,
    }
}

/// Append the full text of a column of the current row to `out`. The column's stream is released
/// before returning, whatever the outcome.
pub(crate) async fn drain_text(
    cursor: &mut dyn RowCursor,
    column: usize,
    out: &mut String,
    cancellation: &CancellationToken,
) -> Result<(), DatabaseError> {
    let mut stream = cursor.text_stream(column)?;

    cancellable(cancellation, async {
        stream.read_to_string(out).await?;
        Ok::<_, DatabaseError>(())
    })
    .await
}

/// Every handler a select clause may build.
pub enum QueryHandler {
    JsonArray(JsonArrayHandler),
    OneText(OneResultHandler<&'static StringValueSelector>),
    ListText(ListQueryHandler<&'static StringValueSelector>),
    OneDocument(OneResultHandler<DocumentSelector>),
    ListDocument(ListQueryHandler<DocumentSelector>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// A JSON array assembled from raw row text
    Json(String),
    Text(Option<String>),
    Texts(Vec<Option<String>>),
    Document(Option<Document>),
    Documents(Vec<Document>),
}

#[async_trait]
impl ResultHandler for QueryHandler {
    type Output = QueryResult;

    fn configure_command(&self, builder: &mut SQLBuilder, session: &QuerySession) {
        match self {
            QueryHandler::JsonArray(handler) => handler.configure_command(builder, session),
            QueryHandler::OneText(handler) => handler.configure_command(builder, session),
            QueryHandler::ListText(handler) => handler.configure_command(builder, session),
            QueryHandler::OneDocument(handler) => handler.configure_command(builder, session),
            QueryHandler::ListDocument(handler) => handler.configure_command(builder, session),
        }
    }

    async fn handle_async(
        &self,
        cursor: &mut dyn RowCursor,
        session: &QuerySession,
        cancellation: &CancellationToken,
    ) -> Result<QueryResult, DatabaseError> {
        Ok(match self {
            QueryHandler::JsonArray(handler) => {
                QueryResult::Json(handler.handle_async(cursor, session, cancellation).await?)
            }
            QueryHandler::OneText(handler) => QueryResult::Text(
                handler
                    .handle_async(cursor, session, cancellation)
                    .await?
                    .flatten(),
            ),
            QueryHandler::ListText(handler) => {
                QueryResult::Texts(handler.handle_async(cursor, session, cancellation).await?)
            }
            QueryHandler::OneDocument(handler) => {
                QueryResult::Document(handler.handle_async(cursor, session, cancellation).await?)
            }
            QueryHandler::ListDocument(handler) => {
                QueryResult::Documents(handler.handle_async(cursor, session, cancellation).await?)
            }
        })
    }
}
