// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    database_error::DatabaseError,
    query::{cursor::RowCursor, selector::Selector, session::QuerySession, statement::Statement},
    sql::SQLBuilder,
};

use super::{ResultHandler, cancellable};

/// Reads at most one row.
///
/// With `can_be_null`, an empty result is `None` rather than [DatabaseError::NoResult]. Unless
/// `can_be_multiples` is set, the rest of the cursor is counted and more than one row fails with
/// [DatabaseError::NonUniqueResult].
pub struct OneResultHandler<S> {
    statement: Arc<Statement>,
    selector: S,
    can_be_null: bool,
    can_be_multiples: bool,
}

impl<S: Selector> OneResultHandler<S> {
    pub fn new(
        statement: Arc<Statement>,
        selector: S,
        can_be_null: bool,
        can_be_multiples: bool,
    ) -> Self {
        Self {
            statement,
            selector,
            can_be_null,
            can_be_multiples,
        }
    }

    pub fn can_be_null(&self) -> bool {
        self.can_be_null
    }

    pub fn can_be_multiples(&self) -> bool {
        self.can_be_multiples
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }
}

#[async_trait]
impl<S: Selector> ResultHandler for OneResultHandler<S> {
    type Output = Option<S::Output>;

    fn configure_command(&self, builder: &mut SQLBuilder, session: &QuerySession) {
        self.statement.configure(builder, session);
    }

    async fn handle_async(
        &self,
        cursor: &mut dyn RowCursor,
        _session: &QuerySession,
        cancellation: &CancellationToken,
    ) -> Result<Self::Output, DatabaseError> {
        if !cancellable(cancellation, cursor.advance()).await? {
            return if self.can_be_null {
                Ok(None)
            } else {
                Err(DatabaseError::NoResult)
            };
        }

        let value = self.selector.resolve(&*cursor)?;

        if !self.can_be_multiples {
            let mut count = 1;
            while cancellable(cancellation, cursor.advance()).await? {
                count += 1;
            }
            if count > 1 {
                return Err(DatabaseError::NonUniqueResult(count));
            }
        }

        Ok(Some(value))
    }
}
