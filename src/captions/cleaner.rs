/// Subtitle cleaning: turns SRT/WebVTT payloads into flat prose
use once_cell::sync::Lazy;
use regex::Regex;

/// `00:00:01,000 --> 00:00:03,000` (SRT) or `00:00:01.000 --> 00:00:03.000 align:start` (WebVTT)
static CUE_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}:\d{2}:\d{2}[,.]\d{3}\s*-->\s*\d{2}:\d{2}:\d{2}[,.]\d{3}[^\n]*").unwrap()
});

/// SRT cue numbers sitting alone on a line
static SEQUENCE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\d+\s*$").unwrap());

static BRACKET_TIMECODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d{2}:\d{2}:\d{2}\.\d{3}\]").unwrap());

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Header lines, also when indented or exposed by removing a leading timecode
static HEADER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*(?:WEBVTT|Kind:|Language:).*$").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Clean raw caption text by removing timing, numbering, markup and headers.
///
/// The result is a single line of text. Input without caption content yields
/// an empty string. Cleaning is idempotent: removing markup can expose text
/// that an earlier step would have dropped (a cue number wrapped in tags, for
/// instance), so the line-level steps repeat until the lines settle, and the
/// whole pass repeats until the output settles. Headers are removed while the
/// caption lines are still separate, so a header drops only its own line.
pub fn clean_caption_text(raw: &str) -> String {
    let mut current = clean_pass(raw);

    // Each pass only removes characters or shrinks whitespace runs
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(text: &str) -> String {
    let mut text = strip_cue_noise(text);
    loop {
        let next = strip_cue_noise(&text);
        if next == text {
            break;
        }
        text = next;
    }

    let joined = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    WHITESPACE_RUN.replace_all(&joined, " ").trim().to_string()
}

/// Timing, numbering, timecodes, markup and headers; line structure is kept
fn strip_cue_noise(text: &str) -> String {
    let text = CUE_TIMING.replace_all(text, "");
    let text = SEQUENCE_LINE.replace_all(&text, "");
    let text = BRACKET_TIMECODE.replace_all(&text, "");
    let text = MARKUP_TAG.replace_all(&text, "");
    HEADER_LINE.replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srt_block() {
        let srt = "1\n00:00:01,000 --> 00:00:03,000\nHello world\n";
        assert_eq!(clean_caption_text(srt), "Hello world");
    }

    #[test]
    fn test_multiple_srt_cues_with_crlf() {
        let srt = "1\r\n00:00:01,000 --> 00:00:03,000\r\nFirst line\r\n\r\n\
                   2\r\n00:00:03,500 --> 00:00:05,000\r\nsecond <i>line</i>\r\n";
        assert_eq!(clean_caption_text(srt), "First line second line");
    }

    #[test]
    fn test_webvtt_payload() {
        let vtt = "WEBVTT\nKind: captions\nLanguage: en\n\n\
                   00:00:00.000 --> 00:00:02.500 align:start position:0%\n\
                   <c>Hello</c><00:00:01.000><c> there</c>\n\n\
                   00:00:02.500 --> 00:00:04.000\n\
                   general   kenobi\n";
        assert_eq!(clean_caption_text(vtt), "Hello there general kenobi");
    }

    #[test]
    fn test_bracketed_timecodes() {
        let text = "[00:00:01.250] Welcome back [00:00:03.000] everyone";
        assert_eq!(clean_caption_text(text), "Welcome back everyone");
    }

    #[test]
    fn test_headers_only_become_empty() {
        assert_eq!(clean_caption_text("WEBVTT\nKind: captions\nLanguage: en\n"), "");
        assert_eq!(clean_caption_text(""), "");
        assert_eq!(clean_caption_text("   \n\t\n"), "");
    }

    #[test]
    fn test_numbers_inside_sentences_survive() {
        assert_eq!(clean_caption_text("We sold 42 units\n"), "We sold 42 units");
    }

    #[test]
    fn test_header_after_timecode_drops_only_that_line() {
        let text = "[00:00:01.000] Kind: of a big deal\nThe rest of the lecture continues here\n";
        assert_eq!(clean_caption_text(text), "The rest of the lecture continues here");
    }

    #[test]
    fn test_indented_header_drops_only_that_line() {
        let text = "  WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nStill here\n\tLanguage: en\nand here";
        assert_eq!(clean_caption_text(text), "Still here and here");
    }

    #[test]
    fn test_header_exposed_by_markup_keeps_other_lines() {
        let text = "[00:00:01.000<b></b>] Kind: of a big deal\nThe rest of the lecture continues here";
        assert_eq!(clean_caption_text(text), "The rest of the lecture continues here");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "1\n00:00:01,000 --> 00:00:03,000\nHello world\n",
            "<b>42</b>",
            " WEBVTT trailing",
            "  7  ",
            "00:00:01,000 -<i>-></i> 00:00:02,000 text",
            "Kind:<b></b> captions\nreal text",
            "plain\ttext\u{00a0}with  spacing",
            "[00:00:01.000]\n[00:00:02.000]\nhi",
            "<<>>",
            "[00:00:01.000] Kind: of a big deal\nThe rest of the lecture continues here\n",
            "\u{00a0}Language: en\nbody text",
            "",
        ];

        for input in inputs {
            let once = clean_caption_text(input);
            assert_eq!(clean_caption_text(&once), once, "input: {:?}", input);
        }
    }
}
