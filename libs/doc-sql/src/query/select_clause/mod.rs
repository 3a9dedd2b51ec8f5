// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use crate::{
    database_error::DatabaseError,
    sql::{SQLBuilder, document_field::DocumentField},
};

use super::{
    element_type::ElementType, handler::QueryHandler, selector::AnySelector,
    session::QuerySession, statement::Statement, statistics::QueryStatistics,
};

pub mod document;
pub mod json;
pub mod scalar;

use document::DocumentSelectClause;
use json::JsonSelectClause;
use scalar::ScalarSelectClause;

/// How a statement projects its rows, and how those rows are read back.
pub trait SelectClause: Send + Sync {
    /// The type of value each row yields.
    fn selected_type(&self) -> ElementType;

    /// The table expression selected from.
    fn from_object(&self) -> &str;

    fn write_select_clause(&self, builder: &mut SQLBuilder);

    /// The columns each row carries, in order.
    fn select_fields(&self) -> Vec<&str>;

    fn build_selector(&self, session: &QuerySession) -> AnySelector;

    /// Pick the handler for `current_statement`. The handler configures its command through
    /// `top_statement`, which may wrap the current one.
    fn build_handler(
        &self,
        session: &QuerySession,
        top_statement: Arc<Statement>,
        current_statement: &Statement,
    ) -> QueryHandler;

    /// A clause that also records the total number of matching rows into `statistics`.
    fn use_statistics(
        &self,
        statistics: QueryStatistics,
    ) -> Result<AnySelectClause, DatabaseError>;

    /// The field a raw JSON projection of this clause writes as a `"value"` member. Only clauses
    /// selecting a single field rather than whole documents have one.
    fn value_field(&self) -> Option<&DocumentField> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnySelectClause {
    Document(DocumentSelectClause),
    Scalar(ScalarSelectClause),
    Json(JsonSelectClause),
}

impl AnySelectClause {
    fn as_select_clause(&self) -> &dyn SelectClause {
        match self {
            AnySelectClause::Document(clause) => clause,
            AnySelectClause::Scalar(clause) => clause,
            AnySelectClause::Json(clause) => clause,
        }
    }
}

impl SelectClause for AnySelectClause {
    fn selected_type(&self) -> ElementType {
        self.as_select_clause().selected_type()
    }

    fn from_object(&self) -> &str {
        self.as_select_clause().from_object()
    }

    fn write_select_clause(&self, builder: &mut SQLBuilder) {
        self.as_select_clause().write_select_clause(builder)
    }

    fn select_fields(&self) -> Vec<&str> {
        self.as_select_clause().select_fields()
    }

    fn build_selector(&self, session: &QuerySession) -> AnySelector {
        self.as_select_clause().build_selector(session)
    }

    fn build_handler(
        &self,
        session: &QuerySession,
        top_statement: Arc<Statement>,
        current_statement: &Statement,
    ) -> QueryHandler {
        self.as_select_clause()
            .build_handler(session, top_statement, current_statement)
    }

    fn use_statistics(
        &self,
        statistics: QueryStatistics,
    ) -> Result<AnySelectClause, DatabaseError> {
        self.as_select_clause().use_statistics(statistics)
    }

    fn value_field(&self) -> Option<&DocumentField> {
        self.as_select_clause().value_field()
    }
}

impl From<DocumentSelectClause> for AnySelectClause {
    fn from(clause: DocumentSelectClause) -> Self {
        AnySelectClause::Document(clause)
    }
}

impl From<ScalarSelectClause> for AnySelectClause {
    fn from(clause: ScalarSelectClause) -> Self {
        AnySelectClause::Scalar(clause)
    }
}

impl From<JsonSelectClause> for AnySelectClause {
    fn from(clause: JsonSelectClause) -> Self {
        AnySelectClause::Json(clause)
    }
}
