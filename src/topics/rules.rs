/// Pattern rules used by the topic extraction cascade
///
/// Each rule looks at the whole description and returns every topic it can
/// read in one format. The extractor decides which rule wins.
use once_cell::sync::Lazy;
use regex::Regex;

use super::TopicEntry;

/// `D:DD` or `D:DD:DD` with one or two leading digits
const TIMECODE: &str = r"\d{1,2}:\d{2}(?::\d{2})?";

static DASH_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"({})\s*[-–—]\s*", TIMECODE)).unwrap());

static SPACE_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"({})\s+", TIMECODE)).unwrap());

static LINE_LEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?m)^({})\s*[:\-–—]?\s*(.+)$", TIMECODE)).unwrap());

/// A timecode starting exactly here; ends the topic text before it
static TIMECODE_AHEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}").unwrap());

static TIMECODE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"^[ \t]*{}", TIMECODE)).unwrap());

static DASHED_TIMECODE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^[ \t]*{}\s*[-–—]", TIMECODE)).unwrap());

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(?:\d+\.\s*|[-•*]\s*)(.+)$").unwrap());

static CHAPTER_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^(?:chapter \d+|section \d+)\s*[:\-–—]?\s*(.+)$").unwrap());

/// A single extraction rule in a cascade
pub trait TopicRule: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// All topics this rule reads from `description`, in order of appearance.
    /// Empty when the rule does not apply.
    fn try_match(&self, description: &str) -> Vec<TopicEntry>;
}

/// `0:00 - Intro` style: timecode, dash, topic.
///
/// Applies only when dashes are the separator convention. Consecutive lines
/// that start with a timecode form a block; if a block mixes dashed and
/// undashed lines, the description is left to the whitespace rule so the block
/// is read in one consistent format. A stray timecode line outside the chapter
/// block (`10:00 AM premiere tomorrow`) does not count.
pub struct DashSeparatedRule;

impl TopicRule for DashSeparatedRule {
    fn name(&self) -> &'static str {
        "dash-separated"
    }

    fn try_match(&self, description: &str) -> Vec<TopicEntry> {
        if mixes_separators(description) {
            return Vec::new();
        }

        scan_timecoded(&DASH_HEAD, description)
    }
}

/// `0:00 Intro` style: timecode, whitespace, topic.
/// A dash or colon left at the front of the topic is dropped.
pub struct SpaceSeparatedRule;

impl TopicRule for SpaceSeparatedRule {
    fn name(&self) -> &'static str {
        "space-separated"
    }

    fn try_match(&self, description: &str) -> Vec<TopicEntry> {
        scan_timecoded(&SPACE_HEAD, description)
            .into_iter()
            .filter_map(|entry| {
                let topic = entry
                    .topic
                    .trim_start_matches(|c: char| matches!(c, '-' | '–' | '—' | ':'));
                TopicEntry::new(entry.timestamp, topic)
            })
            .collect()
    }
}

/// Timecode at the start of a line with an optional `:`/dash separator;
/// the topic is the rest of the line.
pub struct LineLeadingRule;

impl TopicRule for LineLeadingRule {
    fn name(&self) -> &'static str {
        "line-leading"
    }

    fn try_match(&self, description: &str) -> Vec<TopicEntry> {
        LINE_LEADING
            .captures_iter(description)
            .filter_map(|caps| {
                let timestamp = caps.get(1)?.as_str();
                let topic = caps.get(2)?.as_str();
                TopicEntry::new(timestamp, topic)
            })
            .collect()
    }
}

/// List-style lines labelled `Section N` by their position among the matches.
///
/// The label counts every matched line, including ones dropped for being too
/// short, and ignores any number written in the text itself.
pub struct SectionRule {
    name: &'static str,
    pattern: &'static Regex,
}

impl SectionRule {
    /// `1. Topic`, `- Topic`, `• Topic`, `* Topic`
    pub fn list_items() -> Self {
        Self {
            name: "list-item",
            pattern: &LIST_ITEM,
        }
    }

    /// `Chapter 3: Topic`, `Section 2 - Topic`
    pub fn chapter_headings() -> Self {
        Self {
            name: "chapter-heading",
            pattern: &CHAPTER_HEADING,
        }
    }
}

impl TopicRule for SectionRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn try_match(&self, description: &str) -> Vec<TopicEntry> {
        self.pattern
            .captures_iter(description)
            .enumerate()
            .filter_map(|(i, caps)| {
                let topic = caps.get(1)?.as_str();
                TopicEntry::new(TopicEntry::section_label(i + 1), topic)
            })
            .collect()
    }
}

/// True when a run of consecutive timecode-led lines has both dashed and undashed lines
fn mixes_separators(description: &str) -> bool {
    let (mut dashed, mut undashed) = (false, false);

    for line in description.lines() {
        if !TIMECODE_LINE.is_match(line) {
            if dashed && undashed {
                return true;
            }
            (dashed, undashed) = (false, false);
        } else if DASHED_TIMECODE_LINE.is_match(line) {
            dashed = true;
        } else {
            undashed = true;
        }
    }

    dashed && undashed
}

/// Find every `head` match and read the topic that follows it.
///
/// The topic runs until the next newline, the next timecode, or the end of
/// the text, and always takes at least one character.
fn scan_timecoded(head: &Regex, text: &str) -> Vec<TopicEntry> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while let Some(caps) = head.captures_at(text, pos) {
        let (Some(whole), Some(timestamp)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let start = whole.end();
        let end = topic_end(text, start);

        if let Some(entry) = TopicEntry::new(timestamp.as_str(), &text[start..end]) {
            entries.push(entry);
        }

        pos = end;
    }

    entries
}

fn topic_end(text: &str, start: usize) -> usize {
    let mut chars = text[start..].char_indices();

    match chars.next() {
        None | Some((_, '\n')) => return start,
        Some(_) => {}
    }

    for (offset, c) in chars {
        let pos = start + offset;
        if c == '\n' || TIMECODE_AHEAD.is_match(&text[pos..]) {
            return pos;
        }
    }

    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[TopicEntry]) -> Vec<(&str, &str)> {
        entries
            .iter()
            .map(|e| (e.timestamp.as_str(), e.topic.as_str()))
            .collect()
    }

    #[test]
    fn test_dash_rule_reads_dashed_descriptions() {
        let description = "Timestamps\n0:00 - Intro\n1:30 – Setup\n1:02:03 — Wrap up";
        let entries = DashSeparatedRule.try_match(description);
        assert_eq!(
            pairs(&entries),
            vec![("0:00", "Intro"), ("1:30", "Setup"), ("1:02:03", "Wrap up")]
        );
    }

    #[test]
    fn test_dash_rule_steps_aside_for_mixed_separators() {
        let description = "0:00 Intro\n1:30 - Setup\n3:45 Deep Dive";
        assert!(DashSeparatedRule.try_match(description).is_empty());
    }

    #[test]
    fn test_dash_rule_ignores_stray_timecode_line_outside_block() {
        let description = "Chapters\n0:00 - Intro\n2:15 - Main topic\n9:40 - Outro\n\n\
                           Live chat replay\n10:00 AM premiere tomorrow";
        let entries = DashSeparatedRule.try_match(description);
        assert_eq!(
            pairs(&entries),
            vec![("0:00", "Intro"), ("2:15", "Main topic"), ("9:40", "Outro")]
        );
    }

    #[test]
    fn test_mixed_separators_are_judged_per_block() {
        assert!(mixes_separators("0:00 Intro\n1:30 - Setup"));
        assert!(!mixes_separators("0:00 - Intro\n1:30 - Setup\nnotes\n5:00 pm stream"));
        assert!(mixes_separators("notes\n0:00 - Intro\n1:30 Setup\nmore notes"));
    }

    #[test]
    fn test_dash_rule_inline_timecodes() {
        let description = "Chapters: 0:00 - Intro 2:15 - Main topic 10:00 - Outro";
        let entries = DashSeparatedRule.try_match(description);
        assert_eq!(
            pairs(&entries),
            vec![("0:00", "Intro"), ("2:15", "Main topic"), ("10:00", "Outro")]
        );
    }

    #[test]
    fn test_space_rule_strips_leading_separator() {
        let description = "0:00 Intro\n1:30 - Setup\n3:45 Deep Dive";
        let entries = SpaceSeparatedRule.try_match(description);
        assert_eq!(
            pairs(&entries),
            vec![("0:00", "Intro"), ("1:30", "Setup"), ("3:45", "Deep Dive")]
        );
    }

    #[test]
    fn test_space_rule_stops_topic_at_next_timecode() {
        let entries = SpaceSeparatedRule.try_match("0:00 Opening words 4:20 Closing words");
        assert_eq!(
            pairs(&entries),
            vec![("0:00", "Opening words"), ("4:20", "Closing words")]
        );
    }

    #[test]
    fn test_space_rule_drops_short_topics() {
        assert!(SpaceSeparatedRule.try_match("1:00 Hi").is_empty());
    }

    #[test]
    fn test_line_leading_rule() {
        let description = "Intro text\n0:00:Welcome\n12:30 Questions\nno timecode here";
        let entries = LineLeadingRule.try_match(description);
        assert_eq!(pairs(&entries), vec![("0:00", "Welcome"), ("12:30", "Questions")]);
    }

    #[test]
    fn test_line_leading_rule_ignores_inline_timecodes() {
        assert!(LineLeadingRule.try_match("Skip to 3:45 for the demo").is_empty());
    }

    #[test]
    fn test_list_items_are_numbered_in_match_order() {
        let description = "Agenda\n1. Install tools\n2. Ok\n3. Write code\n- Ship it";
        let entries = SectionRule::list_items().try_match(description);
        assert_eq!(
            pairs(&entries),
            vec![
                ("Section 1", "Install tools"),
                ("Section 3", "Write code"),
                ("Section 4", "Ship it"),
            ]
        );
    }

    #[test]
    fn test_list_items_need_a_dot_after_numbers() {
        assert!(SectionRule::list_items().try_match("1:00 Hi").is_empty());
        assert!(SectionRule::list_items().try_match("2024 was a good year").is_empty());
    }

    #[test]
    fn test_chapter_headings_ignore_written_numbers() {
        let description = "chapter 7: Foundations\nSECTION 9 - Advanced topics\nChapter 10 x";
        let entries = SectionRule::chapter_headings().try_match(description);
        assert_eq!(
            pairs(&entries),
            vec![("Section 1", "Foundations"), ("Section 2", "Advanced topics")]
        );
    }

    #[test]
    fn test_topic_end_needs_one_character() {
        assert_eq!(topic_end("abc", 3), 3);
        assert_eq!(topic_end("\nabc", 0), 0);
        assert_eq!(topic_end("1:00 x\ny", 0), 6);
        assert_eq!(topic_end("ab 1:00", 0), 3);
    }
}
