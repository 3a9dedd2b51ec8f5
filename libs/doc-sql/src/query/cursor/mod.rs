// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::database_error::DatabaseError;

pub mod in_memory;
pub mod pg;

/// A readable view over one column of the current row. The stream borrows the cursor, so it can't
/// outlive the row it was opened on.
pub type TextStream<'a> = Box<dyn AsyncRead + Send + Unpin + 'a>;

/// Forward-only access to the rows of a query result.
///
/// A cursor starts positioned before the first row; [RowCursor::advance] must return `true` before
/// any column of a row may be read.
#[async_trait]
pub trait RowCursor: Send {
    /// Move to the next row. Returns `false` once the rows are exhausted.
    async fn advance(&mut self) -> Result<bool, DatabaseError>;

    /// Open the text of a column of the current row as a stream.
    ///
    /// A NULL value is an error: document data columns are never NULL.
    fn text_stream(&mut self, column: usize) -> Result<TextStream<'_>, DatabaseError>;

    fn get_text(&self, column: usize) -> Result<Option<String>, DatabaseError>;

    fn get_i64(&self, column: usize) -> Result<Option<i64>, DatabaseError>;
}
