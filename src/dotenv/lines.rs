use std::fmt;

use crate::dotenv::line::{Line, Quote};
use crate::dotenv::sequence::Sequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// `CrLf` if the content uses Windows line endings anywhere.
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// Split a terminated chunk into its text and the ending it carried.
    fn strip(chunk: &str) -> (&str, Option<Self>) {
        if let Some(text) = chunk.strip_suffix("\r\n") {
            (text, Some(LineEnding::CrLf))
        } else if let Some(text) = chunk.strip_suffix('\n') {
            (text, Some(LineEnding::Lf))
        } else {
            (chunk, None)
        }
    }
}

/// A line and the terminator it was read with. Lines added in memory, and a
/// final line with no newline, have none.
#[derive(Debug, Clone, PartialEq)]
struct Row {
    line: Line,
    eol: Option<LineEnding>,
}

impl Row {
    fn new(line: Line) -> Self {
        Self { line, eol: None }
    }
}

/// The ordered lines of a `.env` file.
///
/// Lookups (`get`, `find`, `set`) act on the first pair line for a key and
/// leave later duplicates alone. `remove` drops every duplicate.
///
/// Each parsed line keeps its own terminator, so files mixing `\n` and
/// `\r\n` are written back as they were read. `ending` is used for lines
/// that have none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineCollection {
    rows: Sequence<Row>,
    ending: LineEnding,
}

impl LineCollection {
    pub fn load<I, S>(raw_lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rows: raw_lines
                .into_iter()
                .map(|text| Row::new(Line::parse(text.as_ref())))
                .collect(),
            ending: LineEnding::Lf,
        }
    }

    /// Parse whole file content. A trailing newline does not produce an
    /// extra empty line.
    pub fn parse(content: &str) -> Self {
        let rows = content
            .split_inclusive('\n')
            .map(|chunk| {
                let (text, eol) = LineEnding::strip(chunk);
                Row {
                    line: Line::parse(text),
                    eol,
                }
            })
            .collect();
        Self {
            rows,
            ending: LineEnding::detect(content),
        }
    }

    /// The terminator written after the last line on save.
    pub fn final_ending(&self) -> LineEnding {
        self.rows
            .iter()
            .last()
            .and_then(|row| row.eol)
            .unwrap_or(self.ending)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &Line> {
        self.rows.iter().map(|row| &row.line).filter(|line| line.is_pair())
    }

    pub fn find(&self, key: &str) -> Option<&Line> {
        self.rows.first(|row| row.line.has_key(key)).map(|row| &row.line)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.find(key).map(Line::value)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.rows.contains(|row| row.line.has_key(key))
    }

    /// Replace the first definition of `key` in place, or append one. The
    /// quote is upgraded when `value` would not read back unchanged.
    pub fn set(&mut self, key: &str, value: &str, quote: Quote) {
        let line = Line::from_pair(key, value, quote.fitting(value));
        match self.rows.position(|row| row.line.has_key(key)) {
            Some(index) => {
                let eol = self.rows.get(index).and_then(|row| row.eol);
                self.rows.replace(index, Row { line, eol });
            }
            None => self.rows.push(Row::new(line)),
        }
    }

    /// Remove every definition of `key`. Returns how many lines were removed.
    pub fn remove(&mut self, key: &str) -> usize {
        self.rows.reject(|row| row.line.has_key(key))
    }

    /// Key to value for every pair, in file order. When a key is defined more
    /// than once the last value wins, kept at the first definition's slot.
    pub fn dictionary(&self) -> Dictionary {
        let mut dictionary = Dictionary::default();
        for line in self.pairs() {
            if let Some(key) = line.key() {
                dictionary.insert(key, line.value());
            }
        }
        dictionary
    }
}

/// The lines joined by their terminators, without one after the last line.
impl fmt::Display for LineCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous: Option<&Row> = None;
        for row in self.rows.iter() {
            if let Some(prev) = previous {
                f.write_str(prev.eol.unwrap_or(self.ending).as_str())?;
            }
            write!(f, "{}", row.line)?;
            previous = Some(row);
        }
        Ok(())
    }
}

/// Ordered key to value view over a collection's pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: Vec<(String, String)>,
}

impl Dictionary {
    fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Only the entries whose key is listed, still in file order.
    pub fn only<S: AsRef<str>>(&self, keys: &[S]) -> Dictionary {
        Dictionary {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| keys.iter().any(|wanted| wanted.as_ref() == k.as_str()))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Database\nDB_NAME=wordpress\nDB_USER = 'root'\n\nDB_PASSWORD=\"secret\"\n";

    #[test]
    fn test_parse_does_not_add_trailing_empty_line() {
        let lines = LineCollection::parse(SAMPLE);
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_roundtrip_unmodified_content() {
        let lines = LineCollection::parse(SAMPLE);
        assert_eq!(format!("{}\n", lines), SAMPLE);
    }

    #[test]
    fn test_crlf_is_preserved() {
        let content = "FOO=1\r\n# note\r\nBAR=2";
        let lines = LineCollection::parse(content);
        assert_eq!(lines.final_ending(), LineEnding::CrLf);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.get("FOO"), Some("1"));
        assert_eq!(lines.to_string(), content);
    }

    #[test]
    fn test_get_strips_quotes() {
        let lines = LineCollection::parse(SAMPLE);
        assert_eq!(lines.get("DB_NAME"), Some("wordpress"));
        assert_eq!(lines.get("DB_USER"), Some("root"));
        assert_eq!(lines.get("DB_PASSWORD"), Some("secret"));
        assert_eq!(lines.get("MISSING"), None);
    }

    #[test]
    fn test_set_replaces_existing_in_place() {
        let mut lines = LineCollection::load(["FOO=BAR"]);
        lines.set("FOO", "BAR-2", Quote::None);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.get("FOO"), Some("BAR-2"));

        lines.set("SECRET", "stuff", Quote::None);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.to_string(), "FOO=BAR-2\nSECRET=stuff");
    }

    #[test]
    fn test_set_keeps_surrounding_lines() {
        let mut lines = LineCollection::parse(SAMPLE);
        lines.set("DB_USER", "admin", Quote::Double);
        assert_eq!(
            lines.to_string(),
            "# Database\nDB_NAME=wordpress\nDB_USER=\"admin\"\n\nDB_PASSWORD=\"secret\""
        );
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut once = LineCollection::parse(SAMPLE);
        once.set("NEW", "value", Quote::Single);
        let mut twice = once.clone();
        twice.set("NEW", "value", Quote::Single);
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 6);
    }

    #[test]
    fn test_set_then_get_returns_unquoted_value() {
        for quote in [Quote::None, Quote::Single, Quote::Double] {
            let mut lines = LineCollection::default();
            lines.set("KEY", "some value", quote);
            assert_eq!(lines.get("KEY"), Some("some value"));
        }
    }

    #[test]
    fn test_duplicates_get_and_set_use_first_match() {
        let mut lines = LineCollection::load(["FOO=first", "FOO=second"]);
        assert_eq!(lines.get("FOO"), Some("first"));

        lines.set("FOO", "updated", Quote::None);
        assert_eq!(lines.to_string(), "FOO=updated\nFOO=second");
    }

    #[test]
    fn test_duplicates_dictionary_keeps_last_value() {
        let lines = LineCollection::load(["FOO=first", "BAR=1", "FOO=second"]);
        let dictionary = lines.dictionary();
        let entries: Vec<(&str, &str)> = dictionary.iter().collect();
        assert_eq!(entries, vec![("FOO", "second"), ("BAR", "1")]);
    }

    #[test]
    fn test_remove_drops_every_occurrence() {
        let mut lines = LineCollection::load(["FOO=1", "# FOO=2", "BAR=3", "FOO=4"]);
        assert_eq!(lines.remove("FOO"), 2);
        assert_eq!(lines.to_string(), "# FOO=2\nBAR=3");
        assert_eq!(lines.get("# FOO"), Some("2"));
    }

    #[test]
    fn test_mixed_line_endings_are_kept_per_line() {
        let content = "A=1\r\nB=2\nC=3\n";
        let mut lines = LineCollection::parse(content);
        assert_eq!(lines.len(), 3);
        assert_eq!(format!("{}{}", lines, lines.final_ending().as_str()), content);

        lines.set("B", "two", Quote::None);
        lines.set("D", "4", Quote::None);
        assert_eq!(lines.to_string(), "A=1\r\nB=two\nC=3\nD=4");
    }

    #[test]
    fn test_last_line_without_newline_uses_detected_ending() {
        let lines = LineCollection::parse("A=1\r\nB=2");
        assert_eq!(lines.final_ending(), LineEnding::CrLf);
        assert_eq!(LineCollection::parse("A=1").final_ending(), LineEnding::Lf);
    }

    #[test]
    fn test_set_upgrades_quote_for_values_that_would_change() {
        let mut lines = LineCollection::default();
        lines.set("PAD", "  spaced  ", Quote::None);
        lines.set("Q", "'x'", Quote::None);

        let reread = LineCollection::parse(&lines.to_string());
        assert_eq!(reread.get("PAD"), Some("  spaced  "));
        assert_eq!(reread.get("Q"), Some("'x'"));
        assert_eq!(reread.find("PAD").map(Line::quote), Some(Quote::Double));
    }

    #[test]
    fn test_remove_missing_key_is_a_noop() {
        let mut lines = LineCollection::parse(SAMPLE);
        let before = lines.clone();
        assert_eq!(lines.remove("NOPE"), 0);
        assert_eq!(lines, before);
    }

    #[test]
    fn test_has_key_ignores_passthrough_lines() {
        let lines = LineCollection::parse(SAMPLE);
        assert!(lines.has_key("DB_NAME"));
        assert!(!lines.has_key("# Database"));
        assert!(!lines.has_key(""));
    }

    #[test]
    fn test_dictionary_only_filters_keys() {
        let lines = LineCollection::parse(SAMPLE);
        let only = lines.dictionary().only(&["DB_PASSWORD", "DB_NAME", "MISSING"][..]);
        let entries: Vec<(&str, &str)> = only.iter().collect();
        assert_eq!(
            entries,
            vec![("DB_NAME", "wordpress"), ("DB_PASSWORD", "secret")]
        );
    }

    #[test]
    fn test_empty_content() {
        let lines = LineCollection::parse("");
        assert!(lines.is_empty());
        assert_eq!(lines.dictionary().iter().count(), 0);
        assert_eq!(lines.to_string(), "");
    }
}
