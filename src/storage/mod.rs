use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

/// A durable named slot holding one string value.
pub trait SlotStore {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }

        let conn = Connection::open(path).with_context(|| format!("open {}", path.display()))?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory db")?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(
                r#"
CREATE TABLE IF NOT EXISTS slots (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL,
  updated_at INTEGER NOT NULL
);
"#,
            )
            .context("init schema")?;
        Ok(())
    }
}

impl SlotStore for Storage {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM slots WHERE key=?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("read slot {key}"))
    }

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let now_unix = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        self.conn
            .execute(
                r#"
INSERT INTO slots(key, value, updated_at)
VALUES(?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET
  value=excluded.value,
  updated_at=excluded.updated_at
"#,
                params![key, value, now_unix],
            )
            .with_context(|| format!("write slot {key}"))?;
        Ok(())
    }
}

/// Process-local slots, gone on exit.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    slots: HashMap<String, String>,
    fail_writes: bool,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, as a full or read-only disk would.
    #[cfg(test)]
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    #[cfg(test)]
    pub fn insert(&mut self, key: &str, value: &str) {
        self.slots.insert(key.to_string(), value.to_string());
    }
}

impl SlotStore for MemorySlots {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_writes {
            anyhow::bail!("write slot {key}: storage unavailable");
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: SlotStore + ?Sized> SlotStore for Box<S> {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).write(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_upsert() {
        let mut s = Storage::open_in_memory().unwrap();
        assert_eq!(s.read("k").unwrap(), None);

        s.write("k", "one").unwrap();
        assert_eq!(s.read("k").unwrap().as_deref(), Some("one"));

        s.write("k", "two").unwrap();
        assert_eq!(s.read("k").unwrap().as_deref(), Some("two"));
        assert_eq!(s.read("other").unwrap(), None);
    }

    #[test]
    fn test_memory_fail_writes() {
        let mut m = MemorySlots::new();
        m.write("k", "v").unwrap();
        m.set_fail_writes(true);
        assert!(m.write("k", "w").is_err());
        assert_eq!(m.read("k").unwrap().as_deref(), Some("v"));
    }
}
