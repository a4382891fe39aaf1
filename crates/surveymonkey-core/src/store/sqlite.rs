use std::path::Path;
#[cfg(unix)]
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{Result, SurveyError};
use crate::models::Survey;

use super::SurveyStore;

const SCHEMA_SQL: &str = r"
    PRAGMA journal_mode = WAL;
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS surveys (
        survey_code TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        is_public INTEGER NOT NULL DEFAULT 0,
        document_json TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

#[derive(Clone)]
pub struct SqliteSurveyStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteSurveyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSurveyStore").finish_non_exhaustive()
    }
}

impl SqliteSurveyStore {
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| SurveyError::mutex_poisoned("sqlite"))?;
        f(&conn)
    }

    fn with_tx<T>(&self, f: impl FnOnce(&rusqlite::Transaction<'_>) -> Result<T>) -> Result<T> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| SurveyError::mutex_poisoned("sqlite"))?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        drop(conn);
        Ok(value)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        #[cfg(unix)]
        harden_sqlite_permissions(path)?;
        tracing::debug!(path = %path.display(), "opened survey store");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(Connection::open_in_memory()?)),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(SCHEMA_SQL)?;
            Ok(())
        })
    }
}

fn upsert(conn: &Connection, survey: &Survey) -> Result<()> {
    let document = serde_json::to_string(survey)?;
    conn.execute(
        r"
        INSERT INTO surveys(survey_code, title, is_public, document_json, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(survey_code) DO UPDATE SET
          title = excluded.title,
          is_public = excluded.is_public,
          document_json = excluded.document_json,
          updated_at = excluded.updated_at
        ",
        params![
            survey.survey_code(),
            survey.title(),
            survey.is_public(),
            document,
            survey.created_at().to_rfc3339(),
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn load(conn: &Connection, code: &str) -> Result<Option<Survey>> {
    let document = conn
        .query_row(
            "SELECT document_json FROM surveys WHERE survey_code = ?1",
            params![code],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    document
        .map(|raw| serde_json::from_str::<Survey>(&raw).map_err(SurveyError::from))
        .transpose()
}

impl SurveyStore for SqliteSurveyStore {
    fn save(&self, survey: &Survey) -> Result<()> {
        self.with_conn(|conn| upsert(conn, survey))
    }

    fn insert_new(&self, survey: &Survey) -> Result<()> {
        self.with_tx(|tx| {
            let exists = tx
                .query_row(
                    "SELECT 1 FROM surveys WHERE survey_code = ?1",
                    params![survey.survey_code()],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if exists {
                return Err(SurveyError::Conflict(format!(
                    "survey code already in use: {}",
                    survey.survey_code()
                )));
            }
            upsert(tx, survey)
        })
    }

    fn find_by_code(&self, code: &str) -> Result<Option<Survey>> {
        self.with_conn(|conn| load(conn, code))
    }

    fn delete(&self, code: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM surveys WHERE survey_code = ?1", params![code])?;
            Ok(removed > 0)
        })
    }

    fn find_all(&self) -> Result<Vec<Survey>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT document_json FROM surveys ORDER BY rowid ASC")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

            let mut out = Vec::new();
            for row in rows {
                out.push(serde_json::from_str::<Survey>(&row?)?);
            }
            Ok(out)
        })
    }

    fn count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM surveys", [], |row| {
                row.get::<_, i64>(0)
            })?;
            usize::try_from(count)
                .map_err(|_| SurveyError::Internal(format!("invalid survey count: {count}")))
        })
    }

    fn modify(
        &self,
        code: &str,
        apply: &mut dyn FnMut(&mut Survey) -> Result<()>,
    ) -> Result<Option<Survey>> {
        self.with_tx(|tx| {
            let Some(mut survey) = load(tx, code)? else {
                return Ok(None);
            };
            apply(&mut survey)?;
            upsert(tx, &survey)?;
            Ok(Some(survey))
        })
    }

    fn close(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE); PRAGMA optimize;")?;
            Ok(())
        })
    }
}

#[cfg(unix)]
fn harden_sqlite_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    for suffix in ["", "-wal", "-shm"] {
        let mut os = path.as_os_str().to_os_string();
        os.push(suffix);
        let candidate = PathBuf::from(os);
        if candidate.exists() {
            std::fs::set_permissions(candidate, std::fs::Permissions::from_mode(0o600))?;
        }
    }
    Ok(())
}
