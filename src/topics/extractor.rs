/// Topic extraction cascade coordinator
use super::rules::{DashSeparatedRule, LineLeadingRule, SectionRule, SpaceSeparatedRule, TopicRule};
use super::TopicEntry;
use tracing::debug;

/// Runs the timestamp cascade, then the section cascade.
///
/// Within a cascade the first rule that returns any entries is used on its
/// own; results from different rules are never merged. The section cascade
/// runs only when no timestamp rule matched.
pub struct TopicExtractor {
    timestamp_rules: Vec<Box<dyn TopicRule>>,
    section_rules: Vec<Box<dyn TopicRule>>,
}

impl TopicExtractor {
    /// Extractor with the standard rule order
    pub fn new() -> Self {
        Self::with_rules(
            vec![
                Box::new(DashSeparatedRule),
                Box::new(SpaceSeparatedRule),
                Box::new(LineLeadingRule),
            ],
            vec![
                Box::new(SectionRule::list_items()),
                Box::new(SectionRule::chapter_headings()),
            ],
        )
    }

    /// Extractor with custom cascades
    pub fn with_rules(timestamp_rules: Vec<Box<dyn TopicRule>>, section_rules: Vec<Box<dyn TopicRule>>) -> Self {
        Self {
            timestamp_rules,
            section_rules,
        }
    }

    /// Extract topics from a description. Returns an empty list when nothing matches.
    pub fn extract(&self, description: &str) -> Vec<TopicEntry> {
        if let Some(entries) = run_cascade(&self.timestamp_rules, description) {
            return entries;
        }

        run_cascade(&self.section_rules, description).unwrap_or_default()
    }
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn run_cascade(rules: &[Box<dyn TopicRule>], description: &str) -> Option<Vec<TopicEntry>> {
    rules.iter().find_map(|rule| {
        let entries = rule.try_match(description);
        if entries.is_empty() {
            return None;
        }
        debug!("🔍 Topic rule '{}' matched {} entries", rule.name(), entries.len());
        Some(entries)
    })
}
