//! SQLite-backed template catalog store
//!
//! Owns the single connection for a run; the connection is released when
//! the store is dropped, on every exit path. Each mutation commits
//! immediately (autocommit), so an aborted run keeps the rows already
//! inserted.

mod schema;
mod types;

pub use types::*;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

/// The template catalog backed by SQLite
pub struct TemplateStore {
    conn: Connection,
}

impl TemplateStore {
    /// Open or create the catalog at the given path
    ///
    /// The schema is created on first use; an existing catalog is left
    /// untouched.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory catalog (tests)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Look up a category id by exact name
    fn find_category(&self, name: &str) -> Result<Option<i64>, StoreError> {
        self.conn
            .query_row(
                "SELECT tpl_categories_id FROM sls_tpl_categories WHERE category = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::from)
    }

    /// Fetch the category id for a name, inserting the category on first
    /// reference
    ///
    /// Matching is exact and case-sensitive. A writer that creates the same
    /// name between the lookup and the insert trips the UNIQUE constraint;
    /// the conflict is resolved by re-reading the existing row.
    pub fn resolve_category(&self, name: &str) -> Result<i64, StoreError> {
        if name.is_empty() {
            return Err(StoreError::EmptyCategoryName);
        }

        if let Some(id) = self.find_category(name)? {
            return Ok(id);
        }

        match self.conn.execute(
            "INSERT INTO sls_tpl_categories (category) VALUES (?1)",
            params![name],
        ) {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                self.find_category(name)?
                    .ok_or(StoreError::CategoryVanished)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Insert one template record, returning its rowid
    pub fn insert_template(&self, record: &TemplateRecord) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO sls_tpls (
                fk_category_id, apex_domain, protocol, domain,
                url_path, alive, twofa_required, high_value, notes, description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                record.category_id,
                record.apex_domain,
                record.protocol,
                record.domain,
                record.url_path,
                record.alive,
                record.twofa_required,
                record.high_value,
                record.notes,
                record.description,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Categories with per-category template counts, alphabetical
    pub fn category_summaries(&self) -> Result<Vec<CategorySummary>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT c.tpl_categories_id, c.category,
                    (SELECT COUNT(*) FROM sls_tpls
                     WHERE fk_category_id = c.tpl_categories_id) AS count
             FROM sls_tpl_categories c
             ORDER BY c.category",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(CategorySummary {
                id: row.get(0)?,
                name: row.get(1)?,
                template_count: row.get::<_, i64>(2)? as usize,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    /// Catalog-wide metrics
    pub fn metrics(&self) -> Result<CatalogMetrics, StoreError> {
        Ok(CatalogMetrics {
            total_templates: self.count("SELECT COUNT(*) FROM sls_tpls")?,
            alive: self.count("SELECT COUNT(*) FROM sls_tpls WHERE alive = 1")?,
            high_value: self.count("SELECT COUNT(*) FROM sls_tpls WHERE high_value = 1")?,
            twofa_required: self.count("SELECT COUNT(*) FROM sls_tpls WHERE twofa_required = 1")?,
            total_categories: self.count("SELECT COUNT(*) FROM sls_tpl_categories")?,
        })
    }

    fn count(&self, sql: &str) -> Result<usize, StoreError> {
        let n: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Run arbitrary SQL against the catalog (test setup only)
    #[cfg(test)]
    pub(crate) fn execute_raw(&self, sql: &str) -> Result<(), StoreError> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}

/// Errors from the catalog store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot open catalog database {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("category name must not be empty")]
    EmptyCategoryName,

    #[error("category row disappeared after insert conflict")]
    CategoryVanished,

    #[error(transparent)]
    Sql(#[from] rusqlite::Error),
}
