//! # Categories
//!
//! Display-ready category list derived from the normalized questions.
//!
//! Recomputed on every load. Counts are keyed by display name, so two slugs sharing a
//! display name would merge into one entry whose id is the first slug in declaration order.
use std::{cmp::Ordering, collections::HashMap};

use serde::{Deserialize, Serialize};

use crate::questions::{DEFAULT_ICON, Domain, QuestionRecord, slugify};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub count: usize,
}

impl CategoryDescriptor {
    /// `1 question`, `12 questions`
    pub fn count_label(&self) -> String {
        let noun = if self.count > 1 { "questions" } else { "question" };
        format!("{} {noun}", self.count)
    }
}

pub fn display_name(slug: &str) -> &str {
    match Domain::from_slug(slug) {
        Some(domain) => domain.display_name(),
        None => slug,
    }
}

fn icon(name: &str) -> &'static str {
    Domain::from_display_name(name).map_or(DEFAULT_ICON, Domain::icon)
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn aggregate(questions: &[QuestionRecord]) -> Vec<CategoryDescriptor> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for question in questions {
        *counts.entry(display_name(&question.domain)).or_insert(0) += 1;
    }

    let mut categories: Vec<CategoryDescriptor> = counts
        .into_iter()
        .map(|(name, count)| CategoryDescriptor {
            id: Domain::from_display_name(name)
                .map_or_else(|| slugify(name), |domain| domain.slug().to_string()),
            name: name.to_string(),
            icon: icon(name).to_string(),
            count,
        })
        .collect();

    categories.sort_by(|a, b| compare_names(&a.name, &b.name));

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;

    fn record(domain: &str) -> QuestionRecord {
        QuestionRecord {
            domain: domain.to_string(),
            question: "Q".to_string(),
            answer: "A".to_string(),
            difficulty: None,
        }
    }

    #[test]
    fn test_single_closure_row() {
        let csv = "Category,Question,Answer\n\
                   Front-end,What is a closure?,A function bundled with its lexical scope.\n";

        let categories = aggregate(&normalize(csv));
        assert_eq!(
            categories,
            vec![CategoryDescriptor {
                id: "webdev".to_string(),
                name: "Web Development".to_string(),
                icon: "🌐".to_string(),
                count: 1,
            }]
        );
    }

    #[test]
    fn test_sorted_by_name_and_counts_sum() {
        let records = vec![
            record("webdev"),
            record("security"),
            record("database"),
            record("webdev"),
            record("datascience"),
        ];

        let categories = aggregate(&records);
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Data Science & AI", "Database", "Security", "Web Development"]
        );

        let total: usize = categories.iter().map(|c| c.count).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_unmapped_slug_uses_raw_name() {
        let categories = aggregate(&[record("cloud-computing"), record("cloud-computing")]);

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, "cloud-computing");
        assert_eq!(categories[0].name, "cloud-computing");
        assert_eq!(categories[0].icon, DEFAULT_ICON);
        assert_eq!(categories[0].count, 2);
    }

    #[test]
    fn test_sort_ignores_case() {
        let categories = aggregate(&[record("zeta"), record("alpha"), record("security")]);
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Security", "zeta"]);
    }

    #[test]
    fn test_count_label() {
        let mut category = aggregate(&[record("devops")]).remove(0);
        assert_eq!(category.count_label(), "1 question");

        category.count = 3;
        assert_eq!(category.count_label(), "3 questions");
    }

    #[test]
    fn test_empty() {
        assert!(aggregate(&[]).is_empty());
    }
}
