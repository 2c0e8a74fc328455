// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Only `SQLite` is supported. This module holds what cannot be expressed in
//! Diesel DSL: connection setup, migrations, PRAGMA handling, and
//! `last_insert_rowid()`. All domain queries and mutations live in the
//! `queries/` and `mutations/` modules.

pub mod sqlite;
