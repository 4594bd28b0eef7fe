//! DuckDB-backed record storage.
//!
//! Batches are transactional: a failed insert rolls back its own batch and
//! leaves previously committed batches in place. Matching rows are delivered
//! through a callback so only one row is materialized at a time.

use std::path::Path;

use duckdb::types::Value;
use duckdb::{params, Connection};

use crate::query::{Criterion, Operator};
use crate::schema::{UserRecord, FIELDS};
use crate::{Error, Result};

/// Storage operations the pipeline needs from a record backend.
pub trait RecordStore {
    /// Insert all records in one transaction, or none of them.
    fn insert_batch(&self, users: &[UserRecord]) -> Result<()>;

    /// Apply `apply` to each record matching `criterion`, in storage order.
    /// Returns the number of records delivered.
    fn for_each_matching<F>(&self, criterion: &Criterion, apply: F) -> Result<u64>
    where
        F: FnMut(UserRecord) -> Result<()>;

    /// Delete every stored record.
    fn truncate(&self) -> Result<()>;
}

/// DuckDB-backed user store. The connection closes on drop.
pub struct UserStore {
    conn: Connection,
}

impl UserStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open a transient in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the users table if it does not exist.
    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id BIGINT PRIMARY KEY,
                name VARCHAR NOT NULL,
                email VARCHAR NOT NULL,
                age BIGINT DEFAULT 0
            )",
        )?;
        Ok(())
    }

    pub fn count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT count(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }

    fn insert_rows(&self, users: &[UserRecord]) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare("INSERT INTO users (id, name, email, age) VALUES (?, ?, ?, ?)")?;
        for user in users {
            stmt.execute(params![
                bind_value(&user.id),
                user.name,
                user.email,
                bind_value(&user.age),
            ])
            .map_err(map_insert_error)?;
        }
        Ok(())
    }
}

impl RecordStore for UserStore {
    fn insert_batch(&self, users: &[UserRecord]) -> Result<()> {
        if users.is_empty() {
            return Ok(());
        }

        self.conn.execute_batch("BEGIN TRANSACTION")?;
        match self.insert_rows(users) {
            Ok(()) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(())
            }
            Err(e) => {
                self.conn.execute_batch("ROLLBACK")?;
                Err(e)
            }
        }
    }

    fn for_each_matching<F>(&self, criterion: &Criterion, mut apply: F) -> Result<u64>
    where
        F: FnMut(UserRecord) -> Result<()>,
    {
        if !FIELDS.contains(&criterion.field.as_str()) {
            return Err(Error::MalformedExpression(format!(
                "unknown field '{}'",
                criterion.field
            )));
        }

        let sql = if criterion.operator == Operator::Between {
            format!(
                "SELECT id, name, email, age FROM users WHERE {} BETWEEN ? AND ?",
                criterion.field
            )
        } else {
            format!(
                "SELECT id, name, email, age FROM users WHERE {} {} ?",
                criterion.field,
                criterion.operator.sql()
            )
        };

        let bindings: Vec<Value> = criterion
            .arguments
            .iter()
            .map(|raw| bind_value(raw))
            .collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(duckdb::params_from_iter(bindings))?;

        let mut delivered = 0u64;
        while let Some(row) = rows.next()? {
            let record = UserRecord {
                id: row.get::<_, i64>(0)?.to_string(),
                name: row.get(1)?,
                email: row.get(2)?,
                age: row.get::<_, i64>(3)?.to_string(),
            };
            apply(record)?;
            delivered += 1;
        }
        Ok(delivered)
    }

    fn truncate(&self) -> Result<()> {
        self.conn.execute_batch("DELETE FROM users")?;
        Ok(())
    }
}

/// Bind integer-looking text as an integer so comparisons against BIGINT
/// columns compare numerically.
fn bind_value(raw: &str) -> Value {
    match raw.parse::<i64>() {
        Ok(n) => Value::BigInt(n),
        Err(_) => Value::Text(raw.to_string()),
    }
}

fn map_insert_error(e: duckdb::Error) -> Error {
    let text = e.to_string();
    if text.contains("Constraint Error") || text.contains("PRIMARY KEY") {
        Error::ConstraintViolation(text)
    } else {
        Error::DuckDb(e)
    }
}


#[cfg(test)]
pub(crate) use memory::MemoryStore;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::compile;

    fn store_with(users: &[UserRecord]) -> UserStore {
        let store = UserStore::open_in_memory().unwrap();
        store.init_schema().unwrap();
        store.insert_batch(users).unwrap();
        store
    }

    fn sample_users() -> Vec<UserRecord> {
        vec![
            UserRecord::new("1", "Ryan Simpson", "user1@mail.com", "20"),
            UserRecord::new("2", "Zoey Walker", "user2@mail.com", "30"),
            UserRecord::new("3", "Sarah Mercado", "user3@mail.com", "40"),
        ]
    }

    fn matching_ids(store: &UserStore, expression: &str) -> Vec<String> {
        let criterion = compile(expression).unwrap();
        let mut ids = Vec::new();
        store
            .for_each_matching(&criterion, |user| {
                ids.push(user.id);
                Ok(())
            })
            .unwrap();
        ids
    }

    #[test]
    fn test_insert_and_count() {
        let store = store_with(&sample_users());
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_duplicate_id_is_constraint_violation() {
        let store = store_with(&sample_users());
        let result = store.insert_batch(&[UserRecord::new("2", "X", "x@mail.com", "50")]);
        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
        // Earlier committed batch survives the rolled-back one.
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_failed_batch_rolls_back_whole_batch() {
        let store = store_with(&sample_users());
        let result = store.insert_batch(&[
            UserRecord::new("4", "New", "user4@mail.com", "22"),
            UserRecord::new("1", "Dup", "dup@mail.com", "23"),
        ]);
        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_numeric_comparisons() {
        let store = store_with(&sample_users());
        assert_eq!(matching_ids(&store, "age >= 30"), vec!["2", "3"]);
        assert_eq!(matching_ids(&store, "age < 30"), vec!["1"]);
        assert_eq!(matching_ids(&store, "age != 30"), vec!["1", "3"]);
        assert_eq!(matching_ids(&store, "age !< 30"), vec!["2", "3"]);
        assert_eq!(matching_ids(&store, "age !> 30"), vec!["1", "2"]);
    }

    #[test]
    fn test_between_is_inclusive() {
        let store = store_with(&sample_users());
        assert_eq!(matching_ids(&store, "age btw 20 30"), vec!["1", "2"]);
        assert_eq!(matching_ids(&store, "age btw 20 40"), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_text_field_match() {
        let store = store_with(&sample_users());
        assert_eq!(matching_ids(&store, "name = Zoey Walker"), Vec::<String>::new());
        assert_eq!(matching_ids(&store, "email = user2@mail.com"), vec!["2"]);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let store = store_with(&sample_users());
        let criterion = compile("height > 10").unwrap();
        let result = store.for_each_matching(&criterion, |_| Ok(()));
        assert!(matches!(result, Err(Error::MalformedExpression(_))));
    }

    #[test]
    fn test_truncate() {
        let store = store_with(&sample_users());
        store.truncate().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        store.insert_batch(&sample_users()).unwrap();
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let store = store_with(&[]);
        assert_eq!(store.count().unwrap(), 0);
    }
}
