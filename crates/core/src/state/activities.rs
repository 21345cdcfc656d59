//! # Activity Catalog
//!
//! Activity storage using SQLite. Each activity is a row in `activities`,
//! its participants are rows in `activity_participants`.
//!
//! Membership changes run under the connection lock as a single
//! check-and-write, and `UNIQUE (activity_name, email)` keeps a participant
//! from being stored twice even across processes.

use super::db::CatalogDb;
use crate::error::{CatalogError, CatalogResult};
use crate::models::Activity;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Manager for the activity catalog
pub struct ActivityManager {
    conn: Arc<Mutex<Connection>>,
}

impl ActivityManager {
    /// Create a new ActivityManager from a CatalogDb
    pub fn new(db: &CatalogDb) -> Self {
        Self {
            conn: db.connection(),
        }
    }

    fn lock(&self) -> CatalogResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| CatalogError::Lock(e.to_string()))
    }

    /// List every activity, ordered by name
    pub fn list_all(&self) -> CatalogResult<Vec<Activity>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT name, description, schedule, max_participants
            FROM activities
            ORDER BY name
            "#,
        )?;

        let mut activities = stmt
            .query_map([], Self::row_to_activity)?
            .collect::<Result<Vec<_>, _>>()?;

        let index: HashMap<String, usize> = activities
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name.clone(), i))
            .collect();

        let mut stmt = conn.prepare(
            "SELECT activity_name, email FROM activity_participants ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (activity_name, email) = row?;
            if let Some(&i) = index.get(&activity_name) {
                activities[i].participants.push(email);
            }
        }

        Ok(activities)
    }

    /// Load a single activity by name
    pub fn get(&self, name: &str) -> CatalogResult<Option<Activity>> {
        let conn = self.lock()?;
        Self::load(&conn, name)
    }

    /// Number of stored activities
    pub fn count(&self) -> CatalogResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert a new activity with its initial participants
    pub fn insert(&self, activity: &Activity) -> CatalogResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        Self::insert_with(&tx, activity)?;
        tx.commit()?;
        Ok(())
    }

    /// Sign `email` up for `name`
    pub fn add_participant(&self, name: &str, email: &str) -> CatalogResult<()> {
        let conn = self.lock()?;

        if !Self::exists(&conn, name)? {
            return Err(CatalogError::ActivityNotFound(name.to_string()));
        }

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO activity_participants (activity_name, email) VALUES (?1, ?2)",
            params![name, email],
        )?;

        if inserted == 0 {
            return Err(CatalogError::AlreadySignedUp {
                activity: name.to_string(),
                email: email.to_string(),
            });
        }

        tracing::debug!("Signed up '{}' for '{}'", email, name);
        Ok(())
    }

    /// Remove `email` from `name`
    pub fn remove_participant(&self, name: &str, email: &str) -> CatalogResult<()> {
        let conn = self.lock()?;

        if !Self::exists(&conn, name)? {
            return Err(CatalogError::ActivityNotFound(name.to_string()));
        }

        let removed = conn.execute(
            "DELETE FROM activity_participants WHERE activity_name = ?1 AND email = ?2",
            params![name, email],
        )?;

        if removed == 0 {
            return Err(CatalogError::NotSignedUp {
                activity: name.to_string(),
                email: email.to_string(),
            });
        }

        tracing::debug!("Removed '{}' from '{}'", email, name);
        Ok(())
    }

    /// Delete every activity and participant
    pub fn clear(&self) -> CatalogResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let removed = Self::clear_with(&tx)?;
        tx.commit()?;
        Ok(removed)
    }

    /// Replace the whole catalog with `activities` in one transaction
    pub fn clear_and_seed(&self, activities: &[Activity]) -> CatalogResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let removed = Self::clear_with(&tx)?;
        for activity in activities {
            Self::insert_with(&tx, activity)?;
        }

        tx.commit()?;

        tracing::info!(
            "Replaced {} activities with {} seeded activities",
            removed,
            activities.len()
        );
        Ok(activities.len())
    }

    /// Insert `activities` only when the catalog holds none, returns how many were inserted
    pub fn seed_if_empty(&self, activities: &[Activity]) -> CatalogResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let count: i64 = tx.query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))?;
        if count > 0 {
            tracing::debug!("Catalog already seeded ({} found)", count);
            return Ok(0);
        }

        for activity in activities {
            Self::insert_with(&tx, activity)?;
        }

        tx.commit()?;
        Ok(activities.len())
    }

    fn exists(conn: &Connection, name: &str) -> CatalogResult<bool> {
        let found = conn
            .query_row(
                "SELECT 1 FROM activities WHERE name = ?1",
                params![name],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn load(conn: &Connection, name: &str) -> CatalogResult<Option<Activity>> {
        let activity = conn
            .query_row(
                r#"
                SELECT name, description, schedule, max_participants
                FROM activities WHERE name = ?1
                "#,
                params![name],
                Self::row_to_activity,
            )
            .optional()?;

        let Some(mut activity) = activity else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT email FROM activity_participants WHERE activity_name = ?1 ORDER BY id",
        )?;
        activity.participants = stmt
            .query_map(params![name], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(Some(activity))
    }

    fn insert_with(conn: &Connection, activity: &Activity) -> CatalogResult<()> {
        conn.execute(
            r#"
            INSERT INTO activities (name, description, schedule, max_participants, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                activity.name,
                activity.description,
                activity.schedule,
                activity.max_participants,
                Utc::now().to_rfc3339(),
            ],
        )?;

        for email in &activity.participants {
            conn.execute(
                "INSERT OR IGNORE INTO activity_participants (activity_name, email) VALUES (?1, ?2)",
                params![activity.name, email],
            )?;
        }

        Ok(())
    }

    fn clear_with(conn: &Connection) -> CatalogResult<usize> {
        conn.execute("DELETE FROM activity_participants", [])?;
        let removed = conn.execute("DELETE FROM activities", [])?;
        Ok(removed)
    }

    fn row_to_activity(row: &rusqlite::Row) -> rusqlite::Result<Activity> {
        Ok(Activity {
            name: row.get(0)?,
            description: row.get(1)?,
            schedule: row.get(2)?,
            max_participants: row.get(3)?,
            participants: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn chess_club() -> Activity {
        Activity::new(
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
        )
        .with_participants(["michael@mergington.edu"])
    }

    fn manager_with_chess() -> ActivityManager {
        let db = CatalogDb::open_in_memory().unwrap();
        let manager = ActivityManager::new(&db);
        manager.insert(&chess_club()).unwrap();
        manager
    }

    #[test]
    fn test_get_and_list() {
        let manager = manager_with_chess();

        let activity = manager.get("Chess Club").unwrap().unwrap();
        assert_eq!(activity, chess_club());

        let all = manager.list_all().unwrap();
        assert_eq!(all, vec![chess_club()]);

        assert!(manager.get("Knitting").unwrap().is_none());
    }

    #[test]
    fn test_list_attaches_participants_to_their_activity() {
        let manager = manager_with_chess();
        manager
            .insert(&Activity::new("Art Club", "Painting", "Thursdays", 18))
            .unwrap();
        manager
            .insert(&Activity::new("Drama Club", "Acting", "Mondays", 20))
            .unwrap();

        manager.add_participant("Drama Club", "ava@mergington.edu").unwrap();
        manager.add_participant("Chess Club", "daniel@mergington.edu").unwrap();
        manager.add_participant("Drama Club", "mia@mergington.edu").unwrap();

        let all = manager.list_all().unwrap();
        let names: Vec<&str> = all.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Art Club", "Chess Club", "Drama Club"]);

        assert!(all[0].participants.is_empty());
        assert_eq!(
            all[1].participants,
            vec!["michael@mergington.edu", "daniel@mergington.edu"]
        );
        assert_eq!(
            all[2].participants,
            vec!["ava@mergington.edu", "mia@mergington.edu"]
        );
    }

    #[test]
    fn test_signup_appends_once() {
        let manager = manager_with_chess();

        manager.add_participant("Chess Club", "new@x.edu").unwrap();

        let activity = manager.get("Chess Club").unwrap().unwrap();
        assert_eq!(
            activity.participants,
            vec!["michael@mergington.edu", "new@x.edu"]
        );
    }

    #[test]
    fn test_duplicate_signup_is_rejected() {
        let manager = manager_with_chess();

        let err = manager
            .add_participant("Chess Club", "michael@mergington.edu")
            .unwrap_err();
        assert!(matches!(err, CatalogError::AlreadySignedUp { .. }));

        let activity = manager.get("Chess Club").unwrap().unwrap();
        assert_eq!(activity.participants, vec!["michael@mergington.edu"]);
    }

    #[test]
    fn test_remove_participant() {
        let manager = manager_with_chess();

        manager
            .remove_participant("Chess Club", "michael@mergington.edu")
            .unwrap();
        let activity = manager.get("Chess Club").unwrap().unwrap();
        assert!(activity.participants.is_empty());

        let err = manager
            .remove_participant("Chess Club", "michael@mergington.edu")
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotSignedUp { .. }));
    }

    #[test]
    fn test_unknown_activity_is_not_found() {
        let manager = manager_with_chess();

        assert!(matches!(
            manager.add_participant("Knitting", "a@x.edu"),
            Err(CatalogError::ActivityNotFound(_))
        ));
        assert!(matches!(
            manager.remove_participant("Knitting", "a@x.edu"),
            Err(CatalogError::ActivityNotFound(_))
        ));
    }

    #[test]
    fn test_capacity_is_advisory() {
        let db = CatalogDb::open_in_memory().unwrap();
        let manager = ActivityManager::new(&db);
        manager
            .insert(&Activity::new("Duo", "Two seats", "Mondays", 1))
            .unwrap();

        manager.add_participant("Duo", "a@x.edu").unwrap();
        manager.add_participant("Duo", "b@x.edu").unwrap();

        let activity = manager.get("Duo").unwrap().unwrap();
        assert_eq!(activity.participants.len(), 2);
    }

    #[test]
    fn test_concurrent_signup_has_single_winner() {
        let db = CatalogDb::open_in_memory().unwrap();
        ActivityManager::new(&db).insert(&chess_club()).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = ActivityManager::new(&db);
                thread::spawn(move || manager.add_participant("Chess Club", "race@x.edu").is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);

        let activity = ActivityManager::new(&db).get("Chess Club").unwrap().unwrap();
        let count = activity
            .participants
            .iter()
            .filter(|p| p.as_str() == "race@x.edu")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_clear_and_seed_replaces_catalog() {
        let manager = manager_with_chess();
        manager.add_participant("Chess Club", "extra@x.edu").unwrap();

        let art = Activity::new("Art Club", "Paint", "Thursdays", 18);
        let inserted = manager
            .clear_and_seed(&[chess_club(), art.clone()])
            .unwrap();
        assert_eq!(inserted, 2);

        let all = manager.list_all().unwrap();
        assert_eq!(all, vec![art, chess_club()]);
    }

    #[test]
    fn test_seed_if_empty_skips_populated_catalog() {
        let manager = manager_with_chess();

        let inserted = manager
            .seed_if_empty(&[Activity::new("Art Club", "Paint", "Thursdays", 18)])
            .unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(manager.count().unwrap(), 1);

        manager.clear().unwrap();
        assert_eq!(manager.count().unwrap(), 0);
    }
}
