//! Catalog type definitions

/// One row destined for the sls_tpls table
#[derive(Debug, Clone)]
pub struct TemplateRecord {
    pub category_id: i64,
    pub apex_domain: String,
    pub protocol: String,
    pub domain: String,
    pub url_path: String,
    pub alive: bool,
    pub twofa_required: bool,
    pub high_value: bool,
    pub notes: String,
    pub description: String,
}

/// A category row with its template usage count
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    pub template_count: usize,
}

/// Catalog-wide counts, mirroring the dashboard metrics the catalog feeds
#[derive(Debug, Default)]
pub struct CatalogMetrics {
    pub total_templates: usize,
    pub alive: usize,
    pub high_value: usize,
    pub twofa_required: usize,
    pub total_categories: usize,
}
