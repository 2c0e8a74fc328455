// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: i64,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub created_at: String,
}

/// A stored login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    /// The team the session currently acts in.
    pub team_id: Option<i64>,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A stored team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamData {
    pub team_id: i64,
    pub name: String,
    pub invite_code: String,
    pub created_by: i64,
    pub created_at: String,
}

/// A team member joined with their account details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberData {
    pub user_id: i64,
    pub email: String,
    pub display_name: String,
    /// The role as stored, possibly a legacy synonym.
    pub role: String,
    pub status: String,
    pub joined_at: String,
}
