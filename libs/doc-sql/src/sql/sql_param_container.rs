// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{fmt::Debug, sync::Arc};

use bytes::BytesMut;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

use super::SQLParam;

/// A bound value held by a query expression (for example the right-hand side of a predicate).
///
/// Expressions are cloned freely while statements are rebuilt, so the value sits behind an `Arc`.
/// The newtype exists to implement `ToSql` and `PartialEq`, which can't be done on
/// `Arc<dyn SQLParam>` directly.
#[derive(Clone)]
pub struct SQLParamContainer(Arc<dyn SQLParam>);

impl SQLParamContainer {
    pub fn new<T: SQLParam + 'static>(param: T) -> Self {
        Self(Arc::new(param))
    }

    /// The shared value, ready to push onto an [super::SQLBuilder].
    pub fn param(&self) -> Arc<dyn SQLParam> {
        Arc::clone(&self.0)
    }
}

impl From<String> for SQLParamContainer {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SQLParamContainer {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl From<i64> for SQLParamContainer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<bool> for SQLParamContainer {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl ToSql for SQLParamContainer {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        // Type checking is left to the wrapped value
        (*self.0).to_sql_checked(ty, out)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

impl PartialEq for SQLParamContainer {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl AsRef<dyn SQLParam> for SQLParamContainer {
    fn as_ref(&self) -> &(dyn SQLParam + 'static) {
        &*self.0
    }
}

impl Debug for SQLParamContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Param({:?})", &*self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_follows_the_value() {
        assert_eq!(SQLParamContainer::from("Al"), SQLParamContainer::from("Al".to_string()));
        assert_ne!(SQLParamContainer::from("Al"), SQLParamContainer::from("Bo"));
        assert_ne!(SQLParamContainer::from(1i64), SQLParamContainer::from("1"));
    }
}
