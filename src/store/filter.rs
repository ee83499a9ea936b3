//! # Document Filters
//!
//! Field predicates used to address documents in a collection.

use serde_json::Value;

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equals
    Eq,

    /// Value in list
    In,
}

/// A single field predicate
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    pub field: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl FilterExpr {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Eq, value.into())
    }

    /// Create an "in list" filter
    pub fn in_list(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(field, FilterOperator::In, Value::Array(values))
    }

    /// Check if a document matches this filter.
    ///
    /// A missing field never matches.
    pub fn matches(&self, doc: &Value) -> bool {
        let Some(field_value) = doc.get(&self.field) else {
            return false;
        };

        match self.operator {
            FilterOperator::Eq => field_value == &self.value,
            FilterOperator::In => self
                .value
                .as_array()
                .is_some_and(|values| values.contains(field_value)),
        }
    }
}

/// A set of filters combined with AND logic.
///
/// The empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub exprs: Vec<FilterExpr>,
}

impl Filter {
    /// Match every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Match documents whose `field` equals `value`
    pub fn by(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(FilterExpr::eq(field, value))
    }

    pub fn and(mut self, expr: FilterExpr) -> Self {
        self.exprs.push(expr);
        self
    }

    /// Check if a document matches all filters
    pub fn matches(&self, doc: &Value) -> bool {
        self.exprs.iter().all(|expr| expr.matches(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_filter() {
        let filter = FilterExpr::eq("isbn", "978-0452284246");

        assert!(filter.matches(&json!({"isbn": "978-0452284246"})));
        assert!(!filter.matches(&json!({"isbn": "978-0345391803"})));
        assert!(!filter.matches(&json!({"title": "1984"})));
    }

    #[test]
    fn test_in_filter() {
        let filter = FilterExpr::in_list("id", vec![json!("a"), json!("b")]);

        assert!(filter.matches(&json!({"id": "a"})));
        assert!(!filter.matches(&json!({"id": "c"})));
    }

    #[test]
    fn test_filter_conjunction() {
        let filter = Filter::by("author", "a1").and(FilterExpr::eq("language", "English"));

        assert!(filter.matches(&json!({"author": "a1", "language": "English"})));
        assert!(!filter.matches(&json!({"author": "a1", "language": "French"})));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::all().matches(&json!({"anything": 1})));
    }
}
