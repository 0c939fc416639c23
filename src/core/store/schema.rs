//! Catalog schema initialization

use super::{StoreError, TemplateStore};

impl TemplateStore {
    /// Initialize the catalog schema
    ///
    /// The UNIQUE constraint on category names is what lets the resolver
    /// treat an insert conflict as "re-read and return the existing id".
    pub(super) fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            -- Category lookup table
            CREATE TABLE IF NOT EXISTS sls_tpl_categories (
                tpl_categories_id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL UNIQUE
            );

            -- Template records
            CREATE TABLE IF NOT EXISTS sls_tpls (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                fk_category_id INTEGER NOT NULL
                    REFERENCES sls_tpl_categories(tpl_categories_id),
                apex_domain TEXT NOT NULL,
                protocol TEXT NOT NULL,
                domain TEXT NOT NULL,
                url_path TEXT NOT NULL,
                alive INTEGER NOT NULL,
                twofa_required INTEGER NOT NULL,
                high_value INTEGER NOT NULL,
                notes TEXT NOT NULL,
                description TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_tpls_category ON sls_tpls(fk_category_id);
            CREATE INDEX IF NOT EXISTS idx_tpls_domain ON sls_tpls(domain);
            "#,
        )?;
        Ok(())
    }
}
