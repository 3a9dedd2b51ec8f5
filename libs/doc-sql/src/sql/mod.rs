// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::any::Any;

use tokio_postgres::types::ToSql;

#[macro_use]
#[cfg(test)]
mod test_util;

pub mod connect;
pub(crate) mod document_field;
pub(crate) mod document_table;
pub(crate) mod expression_builder;
pub(crate) mod limit;
pub(crate) mod offset;
pub(crate) mod order;
pub(crate) mod predicate;
pub(crate) mod raw_json_text;
mod sql_builder;
mod sql_param_container;

pub use expression_builder::ExpressionBuilder;
pub use sql_builder::SQLBuilder;
pub use sql_param_container::SQLParamContainer;

/// A value that can be bound to a `$n` placeholder of a statement.
pub trait SQLParam: ToSql + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq(&self, other: &dyn SQLParam) -> bool;

    fn as_pg(&self) -> &(dyn ToSql + Sync);
}

impl<T: ToSql + Send + Sync + Any + PartialEq> SQLParam for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq(&self, other: &dyn SQLParam) -> bool {
        if let Some(other) = other.as_any().downcast_ref::<T>() {
            self == other
        } else {
            false
        }
    }

    fn as_pg(&self) -> &(dyn ToSql + Sync) {
        self
    }
}

impl PartialEq for dyn SQLParam {
    fn eq(&self, other: &Self) -> bool {
        SQLParam::eq(self, other)
    }
}
