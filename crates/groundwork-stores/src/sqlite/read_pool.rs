//! Pool of read-only connections, handed out round-robin.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use groundwork_core::config::defaults::MAX_READ_POOL_SIZE;
use groundwork_core::errors::GroundResult;
use rusqlite::{Connection, OpenFlags};

use super::to_storage_err;

pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    /// Open `pool_size` read-only connections (clamped to `1..=8`).
    pub fn open(path: &Path, pool_size: usize, busy_timeout_ms: u32) -> GroundResult<Self> {
        let size = pool_size.clamp(1, MAX_READ_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(to_storage_err)?;
            apply_read_pragmas(&conn, busy_timeout_ms)?;
            connections.push(Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Run `f` with the next connection in the rotation.
    pub fn with_conn<F, T>(&self, f: F) -> GroundResult<T>
    where
        F: FnOnce(&Connection) -> GroundResult<T>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let guard = self.connections[idx]
            .lock()
            .map_err(|e| to_storage_err(format!("read pool lock poisoned: {e}")))?;
        f(&guard)
    }

    pub fn size(&self) -> usize {
        self.connections.len()
    }
}

fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u32) -> GroundResult<()> {
    conn.busy_timeout(Duration::from_millis(u64::from(busy_timeout_ms)))
        .map_err(to_storage_err)?;
    conn.execute_batch(
        "
        PRAGMA query_only = ON;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(to_storage_err)
}
