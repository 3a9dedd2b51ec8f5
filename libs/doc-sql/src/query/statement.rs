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
    sql::{
        ExpressionBuilder, SQLBuilder, SQLParam, document_field::DocumentField,
        document_table::DocumentTable, limit::Limit, offset::Offset, order::OrderBy,
        predicate::Predicate,
    },
};

use super::{
    element_type::ElementType,
    handler::QueryHandler,
    select_clause::{
        AnySelectClause, SelectClause, document::DocumentSelectClause, json::JsonSelectClause,
        scalar::ScalarSelectClause,
    },
    session::QuerySession,
    statistics::QueryStatistics,
};

/// A query against one document table.
///
/// The select clause decides what each row looks like; the rest (filter, ordering, paging) is the
/// same for every projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    table: DocumentTable,
    select_clause: AnySelectClause,
    predicate: Predicate,
    order_by: Option<OrderBy>,
    limit: Option<Limit>,
    offset: Option<Offset>,
}

impl Statement {
    /// Select whole documents of `document_type` from `table`.
    pub fn new(table: DocumentTable, document_type: impl Into<String>) -> Self {
        let select_clause = DocumentSelectClause::new(&table, document_type).into();

        Self {
            table,
            select_clause,
            predicate: Predicate::True,
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    /// Select a single field instead of whole documents.
    pub fn select_field(self, field: DocumentField, element_type: ElementType) -> Self {
        let select_clause = ScalarSelectClause::new(&self.table, field, element_type).into();
        Self {
            select_clause,
            ..self
        }
    }

    /// Return each row's raw JSON text, assembled into one JSON array (or a single value with a
    /// limit of one).
    pub fn into_json(self) -> Self {
        match self.select_clause {
            AnySelectClause::Json(_) => self,
            ref clause => {
                let select_clause = JsonSelectClause::new(clause).into();
                Self {
                    select_clause,
                    ..self
                }
            }
        }
    }

    pub fn with_select_clause(self, select_clause: impl Into<AnySelectClause>) -> Self {
        Self {
            select_clause: select_clause.into(),
            ..self
        }
    }

    pub fn with_predicate(self, predicate: Predicate) -> Self {
        Self { predicate, ..self }
    }

    pub fn with_order_by(self, order_by: OrderBy) -> Self {
        Self {
            order_by: Some(order_by),
            ..self
        }
    }

    pub fn with_limit(self, limit: Limit) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }

    pub fn with_offset(self, offset: Offset) -> Self {
        Self {
            offset: Some(offset),
            ..self
        }
    }

    /// Record the total number of matching rows (ignoring paging) into `statistics` while the rows
    /// are read. Fails for projections that can't carry the count.
    pub fn use_statistics(self, statistics: QueryStatistics) -> Result<Self, DatabaseError> {
        let select_clause = self.select_clause.use_statistics(statistics)?;
        Ok(Self {
            select_clause,
            ..self
        })
    }

    pub fn table(&self) -> &DocumentTable {
        &self.table
    }

    pub fn select_clause(&self) -> &AnySelectClause {
        &self.select_clause
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit.map(|limit| limit.0)
    }

    /// Write the complete SQL of this statement.
    pub fn configure(&self, builder: &mut SQLBuilder, session: &QuerySession) {
        self.select_clause.write_select_clause(builder);

        let predicate = self.scoped_predicate(session);
        if predicate != Predicate::True {
            builder.push_str(" where ");
            predicate.build(builder);
        }

        if let Some(order_by) = &self.order_by {
            builder.push_space();
            order_by.build(builder);
        }

        if let Some(limit) = &self.limit {
            builder.push_space();
            limit.build(builder);
        }

        if let Some(offset) = &self.offset {
            builder.push_space();
            offset.build(builder);
        }
    }

    pub fn to_sql(&self, session: &QuerySession) -> (String, Vec<Arc<dyn SQLParam>>) {
        let mut builder = SQLBuilder::new();
        self.configure(&mut builder, session);
        builder.into_sql()
    }

    /// The handler for the rows of this statement, as decided by its select clause.
    pub fn build_handler(self: &Arc<Self>, session: &QuerySession) -> QueryHandler {
        self.select_clause
            .build_handler(session, self.clone(), self.as_ref())
    }

    /// The statement's own predicate, narrowed to the session's tenant for multi-tenanted tables.
    fn scoped_predicate(&self, session: &QuerySession) -> Predicate {
        match session.tenant_id() {
            Some(tenant_id) if self.table.multi_tenanted => Predicate::and(
                self.predicate.clone(),
                Predicate::eq(
                    DocumentField::TenantId,
                    DocumentField::param(tenant_id.to_string()),
                ),
            ),
            _ => self.predicate.clone(),
        }
    }
}
