//! SQLite-backed shared snapshot store.
//!
//! RULE: Only store.rs talks to the database.
//! The interactive process is the only writer; widget processes read.
//! Writes are best-effort (`write`), reads never fail (`read`). The
//! `try_*` variants surface errors for tests and tooling.

use crate::{
    attribute::Attribute,
    error::{PetError, PetResult},
    snapshot::{
        PetSnapshot, DEFAULT_ENERGY, DEFAULT_HAPPINESS, DEFAULT_HUNGER, DEFAULT_PET_NAME,
        KEY_ENERGY, KEY_HAPPINESS, KEY_HUNGER, KEY_PET_NAME, KEY_VARIANT,
    },
    types::SuiteId,
    variant::PetVariant,
};
use rusqlite::{params, types::Value, Connection, OptionalExtension};
use std::collections::HashMap;

pub const DEFAULT_SUITE: &str = "group.com.pixelpet.shared";

pub struct SnapshotStore {
    conn:  Option<Connection>, // None when the medium is unreachable
    path:  Option<String>,     // None for :memory:
    suite: SuiteId,
}

impl SnapshotStore {
    /// Open (or create) the shared database at `path` and apply migrations.
    pub fn open(path: &str, suite: &str) -> PetResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL lets widget readers proceed while the app writes.
        // Shared-memory and :memory: databases ignore it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.busy_timeout(std::time::Duration::from_millis(250))?;
        let store = Self {
            conn: Some(conn),
            path: Some(path.to_string()),
            suite: suite.to_string(),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Open, or degrade to a detached store if the medium is unreachable.
    pub fn open_or_detached(path: &str, suite: &str) -> Self {
        Self::open(path, suite).unwrap_or_else(|e| {
            log::warn!("shared store {path} unavailable ({e}); snapshots will be dropped");
            Self::detached(suite)
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory(suite: &str) -> PetResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Some(conn),
            path: None,
            suite: suite.to_string(),
        };
        store.migrate()?;
        Ok(store)
    }

    /// A store with no backing medium: writes are dropped, reads return the default.
    pub fn detached(suite: &str) -> Self {
        Self {
            conn: None,
            path: None,
            suite: suite.to_string(),
        }
    }

    /// Open a second connection to the same database.
    /// In-memory and detached stores reopen as fresh, isolated stores.
    pub fn reopen(&self) -> PetResult<Self> {
        match (&self.path, &self.conn) {
            (Some(p), _) => Self::open(p, &self.suite),
            (None, Some(_)) => Self::in_memory(&self.suite),
            (None, None) => Ok(Self::detached(&self.suite)),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PetResult<()> {
        self.conn()?
            .execute_batch(include_str!("../../migrations/001_shared_store.sql"))?;
        Ok(())
    }

    pub fn suite(&self) -> &str {
        &self.suite
    }

    pub fn is_attached(&self) -> bool {
        self.conn.is_some()
    }

    fn conn(&self) -> PetResult<&Connection> {
        self.conn.as_ref().ok_or_else(|| PetError::StoreDetached {
            suite: self.suite.clone(),
        })
    }

    // ── Write ──────────────────────────────────────────────────

    /// Overwrite every snapshot key in one transaction.
    pub fn try_write(&self, snapshot: &PetSnapshot) -> PetResult<()> {
        let conn = self.conn()?;
        let now = chrono::Utc::now().timestamp_millis();
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO shared_defaults (suite, key, value, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            let rows: [(&str, Value); 5] = [
                (KEY_PET_NAME,  Value::Text(snapshot.pet_name.clone())),
                (KEY_HUNGER,    Value::Real(snapshot.hunger.value())),
                (KEY_HAPPINESS, Value::Real(snapshot.happiness.value())),
                (KEY_ENERGY,    Value::Real(snapshot.energy.value())),
                (KEY_VARIANT,   Value::Text(snapshot.variant.tag().to_string())),
            ];
            for (key, value) in rows {
                stmt.execute(params![self.suite, key, value, now])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Best-effort write. Failures are logged and dropped; the next
    /// successful write supersedes the lost one. Returns whether it landed.
    pub fn write(&self, snapshot: &PetSnapshot) -> bool {
        match self.try_write(snapshot) {
            Ok(()) => {
                log::debug!(
                    "snapshot written: variant={} hunger={:.2} happiness={:.2} energy={:.2}",
                    snapshot.variant,
                    snapshot.hunger.value(),
                    snapshot.happiness.value(),
                    snapshot.energy.value()
                );
                true
            }
            Err(e) => {
                log::warn!("snapshot write dropped (suite {}): {e}", self.suite);
                false
            }
        }
    }

    // ── Read ───────────────────────────────────────────────────

    /// Read the last written snapshot, `None` if this suite has never been written.
    pub fn try_read(&self) -> PetResult<Option<PetSnapshot>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT key, value FROM shared_defaults WHERE suite = ?1",
        )?;
        let values: HashMap<String, Value> = stmt
            .query_map(params![self.suite], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<_, _>>()?;
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(decode_snapshot(&values)))
    }

    /// The stored snapshot if one exists and the medium is reachable.
    pub fn read_existing(&self) -> Option<PetSnapshot> {
        match self.try_read() {
            Ok(found) => found,
            Err(e) => {
                log::warn!("snapshot read failed (suite {}): {e}", self.suite);
                None
            }
        }
    }

    /// Never fails: falls back to the documented default snapshot.
    pub fn read(&self) -> PetSnapshot {
        self.read_existing().unwrap_or_default()
    }

    /// Raw value of one key, for diagnostics.
    pub fn read_key(&self, key: &str) -> PetResult<Option<Value>> {
        let value = self
            .conn()?
            .query_row(
                "SELECT value FROM shared_defaults WHERE suite = ?1 AND key = ?2",
                params![self.suite, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Overwrite one raw key. Used by tooling and tests to simulate
    /// data written by an older or foreign writer.
    pub fn write_key(&self, key: &str, value: Value) -> PetResult<()> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO shared_defaults (suite, key, value, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![self.suite, key, value, chrono::Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }

    /// Remove every key in this suite.
    pub fn clear(&self) -> PetResult<()> {
        self.conn()?.execute(
            "DELETE FROM shared_defaults WHERE suite = ?1",
            params![self.suite],
        )?;
        Ok(())
    }
}

// ── Decoding ───────────────────────────────────────────────────

fn decode_snapshot(values: &HashMap<String, Value>) -> PetSnapshot {
    PetSnapshot {
        pet_name: values
            .get(KEY_PET_NAME)
            .and_then(decode_text)
            .unwrap_or_else(|| DEFAULT_PET_NAME.to_string()),
        variant: values
            .get(KEY_VARIANT)
            .and_then(decode_text)
            .map(|tag| PetVariant::from_tag(&tag))
            .unwrap_or_default(),
        hunger:    decode_attribute(values.get(KEY_HUNGER), DEFAULT_HUNGER),
        happiness: decode_attribute(values.get(KEY_HAPPINESS), DEFAULT_HAPPINESS),
        energy:    decode_attribute(values.get(KEY_ENERGY), DEFAULT_ENERGY),
    }
}

fn decode_text(value: &Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s.clone()),
        _ => None,
    }
}

fn decode_attribute(value: Option<&Value>, default: f64) -> Attribute {
    let raw = match value {
        Some(Value::Real(f)) => Some(*f),
        Some(Value::Integer(i)) => Some(*i as f64),
        Some(Value::Text(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Attribute::new(raw.unwrap_or(default))
}
