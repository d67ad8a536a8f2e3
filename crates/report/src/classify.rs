// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Record classification and partitioning.
//!
//! Every benchmark name is classified into an action category by an ordered
//! rule table (first match wins) and into an operation family by its name
//! structure. Records sharing a (family, category) pair form one [`Series`].
//!
//! Names produced by the queue harness look like `[LinkedList - poll]`:
//! the family is `LinkedList` and the category is `poll`.

use crate::error::{ReportError, Result};
use crate::record::DerivedRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Category assigned to records no rule matches.
pub const UNCLASSIFIED: &str = "unclassified";

/// One row of the classification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Substring searched for in the record name, matched literally.
    pub pattern: String,
    /// Category assigned on match.
    pub category: String,
}

impl Rule {
    /// Create a new rule.
    pub fn new(pattern: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            category: category.into(),
        }
    }

    /// The queue harness actions: `poll`, then `offer`.
    pub fn defaults() -> Vec<Rule> {
        vec![Rule::new("poll", "poll"), Rule::new("offer", "offer")]
    }
}

/// Result of classifying a single name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category<'a> {
    /// Matched a rule.
    Action(&'a str),
    /// No rule matched.
    Unclassified,
}

impl<'a> Category<'a> {
    /// Category label.
    pub fn as_str(&self) -> &'a str {
        match self {
            Category::Action(name) => name,
            Category::Unclassified => UNCLASSIFIED,
        }
    }
}

/// Validated, ordered classification table.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Validate a rule table.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidRule`] if a pattern or category is empty.
    /// An empty pattern would match every name.
    pub fn new(rules: &[Rule]) -> Result<Self> {
        for rule in rules {
            let reason = if rule.pattern.is_empty() {
                "empty pattern"
            } else if rule.category.is_empty() {
                "empty category"
            } else {
                continue;
            };
            return Err(ReportError::InvalidRule {
                pattern: rule.pattern.clone(),
                reason: reason.to_string(),
            });
        }

        Ok(Self {
            rules: rules.to_vec(),
        })
    }

    /// Classify a name. The first rule whose pattern occurs in `name` wins.
    pub fn classify(&self, name: &str) -> Category<'_> {
        self.rules
            .iter()
            .find(|rule| name.contains(rule.pattern.as_str()))
            .map(|rule| Category::Action(rule.category.as_str()))
            .unwrap_or(Category::Unclassified)
    }

    /// Distinct categories in rule order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for Rule { category, .. } in &self.rules {
            if !seen.contains(&category.as_str()) {
                seen.push(category.as_str());
            }
        }
        seen
    }
}

/// Extract the operation family from a benchmark name.
///
/// Drops the first character and keeps everything before the first `-`,
/// trimmed. A name without `-` yields the whole remainder.
pub fn operation_family(name: &str) -> String {
    let mut chars = name.chars();
    chars.next();
    let rest = chars.as_str();
    rest.split('-').next().unwrap_or(rest).trim().to_string()
}

/// Records of one (family, category) pair, ordered by ops ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Operation family label.
    pub family: String,
    /// Action category label.
    pub category: String,
    /// Member records.
    pub records: Vec<DerivedRecord>,
}

impl Series {
    /// First record with the given op count.
    pub fn at_ops(&self, ops: u64) -> Option<&DerivedRecord> {
        self.records.iter().find(|r| r.ops == ops)
    }
}

/// Records split into series plus the ones no rule matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Series in order of first appearance.
    pub series: Vec<Series>,
    /// Records excluded from every category chart.
    pub unclassified: Vec<DerivedRecord>,
}

impl Partition {
    /// Series belonging to `category`, in order of first appearance.
    pub fn for_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Series> + 'a {
        self.series.iter().filter(move |s| s.category == category)
    }

    /// Number of classified records across all series.
    pub fn classified_len(&self) -> usize {
        self.series.iter().map(|s| s.records.len()).sum()
    }
}

/// Partition records into series keyed by (family, category).
pub fn partition(records: &[DerivedRecord], classifier: &Classifier) -> Partition {
    let mut result = Partition::default();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for record in records {
        let category = match classifier.classify(&record.name) {
            Category::Action(category) => category,
            Category::Unclassified => {
                warn!(name = %record.name, "Record matches no action category");
                result.unclassified.push(record.clone());
                continue;
            }
        };

        let family = operation_family(&record.name);
        let key = (family, category.to_string());
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            result.series.push(Series {
                family: key.0,
                category: key.1,
                records: Vec::new(),
            });
            result.series.len() - 1
        });
        result.series[slot].records.push(record.clone());
    }

    for series in &mut result.series {
        series.records.sort_by_key(|r| r.ops);
    }

    result
}
