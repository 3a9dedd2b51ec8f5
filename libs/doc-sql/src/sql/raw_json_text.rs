// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tokio_postgres::types::{FromSql, Type};

use crate::database_error::DatabaseError;

/// The only binary `jsonb` format Postgres has shipped so far: a version byte followed by the
/// document's text.
const JSONB_VERSION: u8 = 1;

/// Borrowed text of a `json`/`jsonb` (or plain text) column, exactly as the server sent it.
///
/// Unlike `tokio_postgres::types::Json`, this never deserializes the value. A document column can
/// therefore be copied into a larger JSON response untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawJsonText<'a>(&'a str);

impl<'a> RawJsonText<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl<'a> FromSql<'a> for RawJsonText<'a> {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        let text = if *ty == Type::JSONB {
            match raw.split_first() {
                Some((&JSONB_VERSION, text)) => text,
                Some((version, _)) => {
                    return Err(DatabaseError::Validation(format!(
                        "Unsupported jsonb format version {version}"
                    ))
                    .into());
                }
                None => {
                    return Err(DatabaseError::Validation("Empty jsonb value".into()).into());
                }
            }
        } else {
            raw
        };

        Ok(RawJsonText(std::str::from_utf8(text)?))
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::JSON | Type::JSONB | Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME
        )
    }
}
