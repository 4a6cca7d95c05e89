use craftuary_db::entities::theme;
use sea_orm::{ColumnTrait, Condition};

/// Sentinel meaning "no filter" on the technology/category axes.
const ALL: &str = "All";

/// Optional conjunctive filters over the theme catalog.
///
/// Built once from query parameters, then applied either as a SQL predicate
/// (`condition`) or in memory against the sample set (`matches`). Both paths
/// restrict on exactly the same axes.
#[derive(Debug, Default, Clone)]
pub struct CatalogFilter {
    pub technology: Option<String>,
    pub category: Option<String>,
    pub free_only: bool,
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Normalize raw query parameters: the `"All"` sentinel and blank search
    /// terms are dropped here, so downstream code never sees them.
    pub fn new(
        technology: Option<String>,
        category: Option<String>,
        is_free: Option<String>,
        search: Option<String>,
    ) -> Self {
        Self {
            technology: technology.filter(|t| t != ALL),
            category: category.filter(|c| c != ALL),
            free_only: is_free.as_deref() == Some("true"),
            search: search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    /// SQL predicate for the present filters. Every filter value is passed as
    /// a bound parameter; caller input never lands in the statement text.
    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all();

        if let Some(technology) = &self.technology {
            cond = cond.add(theme::Column::Technology.eq(technology));
        }
        if let Some(category) = &self.category {
            cond = cond.add(theme::Column::Category.eq(category));
        }
        if self.free_only {
            cond = cond.add(theme::Column::IsFree.eq(true));
        }
        if let Some(term) = &self.search {
            cond = cond.add(
                Condition::any()
                    .add(theme::Column::Name.contains(term.as_str()))
                    .add(theme::Column::Description.contains(term.as_str())),
            );
        }

        cond
    }

    /// The same predicate applied in memory, used when the sample set stands
    /// in for the store. Search is case-insensitive here, matching how the
    /// legacy fallback behaved.
    pub fn matches(&self, t: &theme::Model) -> bool {
        if let Some(technology) = &self.technology {
            if &t.technology != technology {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &t.category != category {
                return false;
            }
        }
        if self.free_only && !t.is_free {
            return false;
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            if !t.name.to_lowercase().contains(&term)
                && !t.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn filter(
        technology: Option<&str>,
        category: Option<&str>,
        is_free: Option<&str>,
        search: Option<&str>,
    ) -> CatalogFilter {
        CatalogFilter::new(
            technology.map(String::from),
            category.map(String::from),
            is_free.map(String::from),
            search.map(String::from),
        )
    }

    #[test]
    fn test_all_sentinel_means_no_filter() {
        let f = filter(Some("All"), Some("All"), None, None);
        assert!(f.technology.is_none());
        assert!(f.category.is_none());
        assert!(!f.free_only);
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let f = filter(None, None, None, Some("   "));
        assert!(f.search.is_none());
    }

    #[test]
    fn test_is_free_only_exact_true() {
        assert!(filter(None, None, Some("true"), None).free_only);
        assert!(!filter(None, None, Some("false"), None).free_only);
        assert!(!filter(None, None, Some("1"), None).free_only);
    }

    #[test]
    fn test_filter_values_are_bound_parameters() {
        let malicious = "React'; DROP TABLE themes; --";
        let f = filter(Some(malicious), None, None, Some(malicious));

        let stmt = theme::Entity::find()
            .filter(f.condition())
            .build(DbBackend::Postgres);

        // The statement text holds placeholders only; the payload travels in
        // the bound values.
        assert!(!stmt.sql.contains("DROP TABLE"));
        assert!(stmt.sql.contains("$1"));
        let values = stmt.values.expect("filters should bind values");
        assert!(!values.0.is_empty());
    }

    #[test]
    fn test_condition_includes_each_axis() {
        let f = filter(Some("React"), Some("Business"), Some("true"), Some("blog"));
        let stmt = theme::Entity::find()
            .filter(f.condition())
            .build(DbBackend::Postgres);

        assert!(stmt.sql.contains("technology"));
        assert!(stmt.sql.contains("category"));
        assert!(stmt.sql.contains("is_free"));
        assert!(stmt.sql.contains("LIKE"));
    }

    #[test]
    fn test_matches_technology_and_category() {
        let themes = mock::sample_catalog();

        let f = filter(Some("React"), None, None, None);
        assert!(themes.iter().filter(|t| f.matches(t)).all(|t| t.technology == "React"));

        let f = filter(None, Some("Blog"), None, None);
        assert!(themes.iter().filter(|t| f.matches(t)).all(|t| t.category == "Blog"));
    }

    #[test]
    fn test_matches_search_is_case_insensitive() {
        let themes = mock::sample_catalog();
        let f = filter(None, None, None, Some("PORTFOLIO"));
        let hits: Vec<_> = themes.iter().filter(|t| f.matches(t)).collect();
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|t| {
            t.name.to_lowercase().contains("portfolio")
                || t.description.to_lowercase().contains("portfolio")
        }));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let f = CatalogFilter::default();
        assert!(mock::sample_catalog().iter().all(|t| f.matches(t)));
    }
}
