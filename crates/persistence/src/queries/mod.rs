// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `accounts` — Users and sessions
//! - `teams` — Teams, memberships, and parent links
//! - `events` — Calendar events, participants, results, and training logs

pub mod accounts;
pub mod events;
pub mod teams;
