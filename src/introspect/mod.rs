//! Database introspection
//!
//! This module provides functionality for extracting view metadata from a
//! database catalog. The catalog queries themselves sit behind
//! [`CatalogSource`]; each supported driver has its own feature-gated submodule.

use tracing::{debug, info, trace};

use crate::prelude::{Schema, ViewliftError};
use crate::schema::{Column, View};

/// Filters to apply during introspection
#[derive(Debug, Default, Clone)]
pub struct ViewFilter {
    /// Only include these views (if Some)
    pub include: Option<Vec<String>>,
    /// Exclude these views
    pub exclude: Option<Vec<String>>,
}

impl ViewFilter {
    /// Check if a view should be included
    pub fn should_include(&self, view_name: &str) -> bool {
        // Check include list
        if let Some(include) = &self.include {
            if !include.iter().any(|v| v == view_name) {
                return false;
            }
        }

        // Check exclude list
        if let Some(exclude) = &self.exclude {
            if exclude.iter().any(|v| v == view_name) {
                return false;
            }
        }

        true
    }
}

/// Trait for database introspection implementations
pub trait Introspector {
    /// Introspect all views of a database and return their metadata
    fn introspect(&mut self, database: &str, filter: &ViewFilter) -> Result<Schema, ViewliftError>;
}

/// Read-only metadata queries against a database catalog
pub trait CatalogSource {
    /// Names of all views in the database
    fn views(&mut self, database: &str) -> Result<Vec<String>, ViewliftError>;

    /// Columns of one view
    fn columns(&mut self, database: &str, view: &str) -> Result<Vec<Column>, ViewliftError>;
}

/// Introspector built on any [`CatalogSource`]
///
/// Views come back sorted by name (byte order) and columns by ordinal
/// position, whatever order the catalog returned them in.
pub struct CatalogIntrospector<S> {
    source: S,
}

impl<S: CatalogSource> CatalogIntrospector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: CatalogSource> Introspector for CatalogIntrospector<S> {
    fn introspect(&mut self, database: &str, filter: &ViewFilter) -> Result<Schema, ViewliftError> {
        info!(database = ?database, "Starting view introspection");

        let all_view_names = self.source.views(database)?;
        debug!(count = ?all_view_names.len(), "Found all views");

        let mut view_names: Vec<String> = all_view_names
            .into_iter()
            .filter(|name| filter.should_include(name))
            .collect();
        view_names.sort();
        view_names.dedup();
        debug!(count = ?view_names.len(), "Views after filtering");

        let mut views = Vec::with_capacity(view_names.len());
        for view_name in view_names {
            debug!(view = ?view_name, "Introspecting view");

            let mut columns = self.source.columns(database, &view_name)?;
            columns.sort_by_key(|col| col.ordinal);
            trace!(view = ?view_name, columns = ?columns.len(), "Found columns");

            let view = View {
                name: view_name,
                columns,
            };
            view.check_ordinals()?;
            views.push(view);
        }

        info!(database = ?database, views = ?views.len(), "View introspection complete");

        Ok(Schema {
            database: database.to_string(),
            views,
        })
    }
}

// Feature-gated database implementations
#[cfg(feature = "mysql")]
mod mysql;

#[cfg(feature = "mysql")]
pub use self::mysql::{MySqlCatalog, MySqlIntrospector};

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// In-memory catalog returning views in insertion order
    #[derive(Default)]
    pub(crate) struct StubCatalog {
        pub views: Vec<(String, Vec<Column>)>,
        pub fail_columns_for: Option<String>,
        pub queried: Vec<String>,
    }

    impl StubCatalog {
        pub fn with_view(mut self, name: &str, columns: Vec<Column>) -> Self {
            self.views.push((name.to_string(), columns));
            self
        }
    }

    impl CatalogSource for StubCatalog {
        fn views(&mut self, _database: &str) -> Result<Vec<String>, ViewliftError> {
            Ok(self.views.iter().map(|(name, _)| name.clone()).collect())
        }

        fn columns(&mut self, database: &str, view: &str) -> Result<Vec<Column>, ViewliftError> {
            self.queried.push(view.to_string());
            if self.fail_columns_for.as_deref() == Some(view) {
                return Err(ViewliftError::Introspection {
                    database: database.to_string(),
                    message: "access denied".to_string(),
                });
            }
            let by_name: BTreeMap<_, _> = self.views.iter().cloned().collect();
            Ok(by_name.get(view).cloned().unwrap_or_default())
        }
    }

    pub(crate) fn column(ordinal: u32, name: &str, data_type: &str, nullable: bool) -> Column {
        Column {
            ordinal,
            name: name.to_string(),
            data_type: data_type.to_string(),
            column_type: data_type.to_string(),
            is_nullable: nullable,
        }
    }

    #[test]
    fn test_filter_include() {
        let filter = ViewFilter {
            include: Some(vec!["a".to_string()]),
            exclude: None,
        };
        assert!(filter.should_include("a"));
        assert!(!filter.should_include("b"));
    }

    #[test]
    fn test_filter_exclude() {
        let filter = ViewFilter {
            include: None,
            exclude: Some(vec!["b".to_string()]),
        };
        assert!(filter.should_include("a"));
        assert!(!filter.should_include("b"));
    }

    #[test]
    fn test_views_sorted_by_name() {
        let catalog = StubCatalog::default()
            .with_view("zeta", vec![column(1, "id", "int", false)])
            .with_view("Alpha", vec![column(1, "id", "int", false)])
            .with_view("alpha", vec![column(1, "id", "int", false)]);

        let schema = CatalogIntrospector::new(catalog)
            .introspect("shop", &ViewFilter::default())
            .unwrap();

        let names: Vec<_> = schema.views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "alpha", "zeta"]);
        assert_eq!(schema.database, "shop");
    }

    #[test]
    fn test_columns_sorted_by_ordinal() {
        let catalog = StubCatalog::default().with_view(
            "v",
            vec![
                column(3, "c", "int", false),
                column(1, "a", "int", false),
                column(2, "b", "int", false),
            ],
        );

        let schema = CatalogIntrospector::new(catalog)
            .introspect("db", &ViewFilter::default())
            .unwrap();

        let names: Vec<_> = schema.views[0].columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_filtered_views_not_queried() {
        let catalog = StubCatalog::default()
            .with_view("keep", vec![column(1, "id", "int", false)])
            .with_view("skip", vec![column(1, "id", "int", false)]);
        let filter = ViewFilter {
            include: None,
            exclude: Some(vec!["skip".to_string()]),
        };

        let mut introspector = CatalogIntrospector::new(catalog);
        let schema = introspector.introspect("db", &filter).unwrap();

        assert_eq!(schema.views.len(), 1);
        assert_eq!(introspector.source.queried, ["keep"]);
    }

    #[test]
    fn test_ordinal_gap_is_error() {
        let catalog = StubCatalog::default().with_view(
            "v",
            vec![column(1, "a", "int", false), column(3, "c", "int", false)],
        );

        let result = CatalogIntrospector::new(catalog).introspect("db", &ViewFilter::default());

        assert!(matches!(result, Err(ViewliftError::InvalidSchema { .. })));
    }

    #[test]
    fn test_query_failure_propagates() {
        let mut catalog = StubCatalog::default()
            .with_view("a", vec![column(1, "id", "int", false)])
            .with_view("b", vec![column(1, "id", "int", false)]);
        catalog.fail_columns_for = Some("a".to_string());

        let mut introspector = CatalogIntrospector::new(catalog);
        let err = introspector
            .introspect("db", &ViewFilter::default())
            .unwrap_err();

        assert!(err.to_string().contains("access denied"));
        // Fail fast: nothing after the failing view is queried
        assert_eq!(introspector.source.queried, ["a"]);
    }
}
