// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! This library is the result-projection layer for a document store on top of Postgres. Each
//! document lives in a table with (at least) an `id` column and a `data` column holding the
//! document's JSON.
//!
//! A query is described by a [Statement], which pairs a [SelectClause] (what to project) with the
//! usual filtering, ordering, and paging. A select clause both writes its part of the SQL and
//! decides which [ResultHandler] should consume the rows the database returns.
//!
//! The interesting variant is [JsonSelectClause]. It wraps any other clause and, instead of
//! hydrating documents, selects the raw `data` column. Its [JsonArrayHandler] then stitches the
//! rows' JSON text into a single JSON array, streaming each row's text straight into the output
//! without ever parsing or re-serializing a document.
//!
//! Handlers run in two modes: [ResultHandler::handle_async], which suspends on every cursor
//! advance and text drain (and observes cancellation there), and [ResultHandler::handle], which
//! blocks on the very same algorithm. Executing a statement against a live database is done through
//! [QueryRunner].

#[macro_use]
mod sql;
mod query;

pub mod database_error;
pub mod env_const;
pub mod logging;

pub use sql::{
    ExpressionBuilder, SQLBuilder, SQLParam, SQLParamContainer,
    connect::database_client::DatabaseClient,
    document_field::DocumentField,
    document_table::DocumentTable,
    limit::Limit,
    offset::Offset,
    order::{OrderBy, OrderByElement, Ordering},
    predicate::{CaseSensitivity, ParamEquality, Predicate},
    raw_json_text::RawJsonText,
};

pub use query::{
    cursor::{RowCursor, TextStream, in_memory::InMemoryCursor, pg::PgRowCursor},
    element_type::ElementType,
    handler::{
        QueryHandler, QueryResult, ResultHandler, json_array::JsonArrayHandler,
        list::ListQueryHandler, one_result::OneResultHandler,
    },
    runner::{QueryRunner, fetch_with},
    select_clause::{
        AnySelectClause, SelectClause,
        document::DocumentSelectClause,
        json::{DEFAULT_SELECTION_TEXT, JsonSelectClause},
        scalar::ScalarSelectClause,
    },
    selector::{
        AnySelector, Document, DocumentSelector, STRING_VALUE_SELECTOR, SelectedValue, Selector,
        StringValueSelector,
    },
    session::QuerySession,
    statement::Statement,
    statistics::QueryStatistics,
};
