//! Generators for collection endpoint responses.

use serde_json::{Value, json};

/// Builds the envelope pages a collection endpoint would return for a result
/// set of `total` items, with sequential identifiers starting at 1.
///
/// # Example
/// ```ignore
/// let pages = CollectionPageGenerator::new(25).with_max(10);
/// assert_eq!(pages.page(2)["collection"].as_array().unwrap().len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct CollectionPageGenerator {
    total: u64,
    max: u64,
    class: Option<String>,
    report_pages: bool,
}

impl CollectionPageGenerator {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            max: 0,
            class: None,
            report_pages: true,
        }
    }

    /// Page size; 0 returns everything on page 0.
    pub fn with_max(mut self, max: u64) -> Self {
        self.max = max;
        self
    }

    /// Server class name stamped on every item.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Omit `totalPages` from the envelope, as some endpoints do.
    pub fn without_page_count(mut self) -> Self {
        self.report_pages = false;
        self
    }

    pub fn total_pages(&self) -> u64 {
        match self.max {
            0 => u64::from(self.total > 0),
            max => self.total.div_ceil(max),
        }
    }

    /// Envelope for zero-based page `page`.
    pub fn page(&self, page: u64) -> Value {
        let (start, end) = match self.max {
            0 if page == 0 => (0, self.total),
            0 => (self.total, self.total),
            max => {
                let start = (page * max).min(self.total);
                (start, (start + max).min(self.total))
            }
        };

        let collection: Vec<Value> = (start..end).map(|i| self.item(i + 1)).collect();
        let mut envelope = json!({
            "collection": collection,
            "offset": start,
            "perPage": self.max,
            "size": self.total,
        });
        if self.report_pages {
            envelope["totalPages"] = json!(self.total_pages());
        }
        envelope
    }

    fn item(&self, id: u64) -> Value {
        let mut item = json!({"id": id, "name": format!("item-{}", id)});
        if let Some(class) = &self.class {
            item["class"] = json!(class);
        }
        item
    }
}

/// Proptest strategies for query parameter values.
pub mod proptest_strategies {
    use proptest::prelude::*;
    use serde_json::Value;

    /// A scalar parameter value (never null).
    pub fn scalar_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-zA-Z0-9_]{1,12}".prop_map(Value::from),
        ]
    }

    /// A list of identifiers, as sent for multi-valued filters.
    pub fn id_list() -> impl Strategy<Value = Vec<u64>> {
        prop::collection::vec(1u64..1_000_000, 0..20)
    }
}
