// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The event core's store traits, implemented over the `SQLite` connection.

use courtside::{
    CalendarStore, EventStore, MembershipRecord, MembershipStore, ParticipantStore, ResultStore,
    StoreError,
};
use courtside_domain::{
    CalendarEvent, EventId, EventWindow, MatchResult, NewCalendarEvent, NewMatchResult,
    NewParticipant, NewTrainingLog, Participant, ParticipationStatus, TeamId, TrainingLog, UserId,
};
use diesel::SqliteConnection;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use std::panic::{self, AssertUnwindSafe};
use tracing::error;

use crate::error::PersistenceError;
use crate::{Persistence, mutations, queries};

type Transactions = AnsiTransactionManager;

fn store_error(err: diesel::result::Error) -> StoreError {
    StoreError::from(PersistenceError::from(err))
}

impl MembershipStore for Persistence {
    fn find_membership(
        &mut self,
        user_id: UserId,
        team_id: TeamId,
    ) -> Result<Option<MembershipRecord>, StoreError> {
        Ok(queries::teams::find_membership(&mut self.conn, user_id, team_id)?)
    }

    fn find_team_players(&mut self, team_id: TeamId) -> Result<Vec<UserId>, StoreError> {
        Ok(queries::teams::find_team_players(&mut self.conn, team_id)?)
    }

    fn find_members_by_ids(
        &mut self,
        team_id: TeamId,
        user_ids: &[UserId],
    ) -> Result<Vec<MembershipRecord>, StoreError> {
        Ok(queries::teams::find_members_by_ids(
            &mut self.conn,
            team_id,
            user_ids,
        )?)
    }

    fn find_linked_children(&mut self, parent_id: UserId) -> Result<Vec<UserId>, StoreError> {
        Ok(queries::teams::find_linked_children(&mut self.conn, parent_id)?)
    }
}

impl EventStore for Persistence {
    fn insert_event(&mut self, event: &NewCalendarEvent) -> Result<CalendarEvent, StoreError> {
        Ok(mutations::events::insert_event(&mut self.conn, event)?)
    }

    fn find_event(
        &mut self,
        event_id: EventId,
        team_id: TeamId,
    ) -> Result<Option<CalendarEvent>, StoreError> {
        Ok(queries::events::find_event(&mut self.conn, event_id, team_id)?)
    }

    fn update_event(&mut self, event: &CalendarEvent) -> Result<CalendarEvent, StoreError> {
        Ok(mutations::events::update_event(&mut self.conn, event)?)
    }

    fn delete_event(&mut self, event_id: EventId, team_id: TeamId) -> Result<bool, StoreError> {
        Ok(mutations::events::delete_event(
            &mut self.conn,
            event_id,
            team_id,
        )?)
    }

    fn list_events(
        &mut self,
        team_id: TeamId,
        window: &EventWindow,
    ) -> Result<Vec<CalendarEvent>, StoreError> {
        Ok(queries::events::list_events(&mut self.conn, team_id, window)?)
    }
}

impl ParticipantStore for Persistence {
    fn replace_participants(
        &mut self,
        event_id: EventId,
        participants: &[NewParticipant],
    ) -> Result<(), StoreError> {
        Ok(mutations::events::replace_participants(
            &mut self.conn,
            event_id,
            participants,
        )?)
    }

    fn list_participants(
        &mut self,
        event_ids: &[EventId],
    ) -> Result<Vec<Participant>, StoreError> {
        Ok(queries::events::list_participants(&mut self.conn, event_ids)?)
    }

    fn set_participant_status(
        &mut self,
        event_id: EventId,
        user_id: UserId,
        status: ParticipationStatus,
    ) -> Result<bool, StoreError> {
        Ok(mutations::events::set_participant_status(
            &mut self.conn,
            event_id,
            user_id,
            status,
        )?)
    }
}

impl ResultStore for Persistence {
    fn find_match_result(&mut self, event_id: EventId) -> Result<Option<MatchResult>, StoreError> {
        Ok(queries::events::find_match_result(&mut self.conn, event_id)?)
    }

    fn insert_match_result(&mut self, result: &NewMatchResult) -> Result<MatchResult, StoreError> {
        Ok(mutations::events::insert_match_result(&mut self.conn, result)?)
    }

    fn upsert_training_log(&mut self, entry: &NewTrainingLog) -> Result<TrainingLog, StoreError> {
        Ok(mutations::events::upsert_training_log(&mut self.conn, entry)?)
    }
}

impl CalendarStore for Persistence {
    /// Runs `f` inside a database transaction.
    ///
    /// The transaction commits when `f` succeeds and rolls back otherwise,
    /// including when `f` panics.
    fn atomically<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>,
    {
        <Transactions as TransactionManager<SqliteConnection>>::begin_transaction(&mut self.conn)
            .map_err(|e| E::from(store_error(e)))?;

        let outcome: Result<T, E> = match panic::catch_unwind(AssertUnwindSafe(|| f(self))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                roll_back(&mut self.conn);
                panic::resume_unwind(payload);
            }
        };

        match outcome {
            Ok(value) => {
                if let Err(commit_err) =
                    <Transactions as TransactionManager<SqliteConnection>>::commit_transaction(
                        &mut self.conn,
                    )
                {
                    roll_back(&mut self.conn);
                    return Err(E::from(store_error(commit_err)));
                }
                Ok(value)
            }
            Err(err) => {
                roll_back(&mut self.conn);
                Err(err)
            }
        }
    }
}

fn roll_back(conn: &mut SqliteConnection) {
    if let Err(rollback_err) =
        <Transactions as TransactionManager<SqliteConnection>>::rollback_transaction(conn)
    {
        error!(error = %rollback_err, "Failed to roll back transaction");
    }
}
