//! Approximate occurrence search over extracted text.
//!
//! Each search string is compared against every run of consecutive words of
//! the same length in a line; a window counts as an occurrence when its
//! Levenshtein distance to the search string is within that string's
//! tolerance.

use crate::error::{Error, Result};
use edit_distance::edit_distance;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;
use unicode_width::UnicodeWidthStr;

/// A phrase to look for and how many edits a match may differ by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchString {
    /// Phrase to look for
    pub string: String,
    /// Maximum edit distance for a window to count as a match
    pub max_distance: usize,
}

impl SearchString {
    /// Create a search string.
    pub fn new(string: impl Into<String>, max_distance: usize) -> Self {
        Self {
            string: string.into(),
            max_distance,
        }
    }
}

/// Load search strings from a JSON array of `{"string", "max_distance"}` objects.
///
/// ```json
/// [
///   { "string": "Jehan de Luxembourg", "max_distance": 4 }
/// ]
/// ```
pub fn load_search_strings(path: impl AsRef<Path>) -> Result<Vec<SearchString>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_search_strings(&content)
}

/// Parse search strings from JSON text.
pub fn parse_search_strings(json: &str) -> Result<Vec<SearchString>> {
    let strings: Vec<SearchString> = serde_json::from_str(json)?;
    if let Some(blank) = strings.iter().position(|s| s.string.trim().is_empty()) {
        return Err(Error::SearchStrings(format!(
            "entry {} has an empty string",
            blank
        )));
    }
    Ok(strings)
}

/// Count the windows of `line` that approximately match `needle`.
///
/// The window width is the needle's word count; each window is its words
/// joined by single spaces. Both sides are NFC-normalized before comparing.
///
/// ```
/// use doctext::search::count_approx_matches;
///
/// let line = "prins par messire Jehan de Luxembourg et autres";
/// assert_eq!(count_approx_matches(line, "Jehan de Luxembourc", 3), 1);
/// ```
pub fn count_approx_matches(line: &str, needle: &str, max_distance: usize) -> usize {
    let needle: String = needle.nfc().collect();
    let needle_words: Vec<&str> = needle.split_whitespace().collect();
    if needle_words.is_empty() {
        return 0;
    }
    let needle = needle_words.join(" ");

    let line: String = line.nfc().collect();
    let words: Vec<&str> = line.split_whitespace().collect();

    words
        .windows(needle_words.len())
        .filter(|window| edit_distance(&window.join(" "), &needle) <= max_distance)
        .count()
}

/// Matches for one search string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// The search string as written in the strings file
    pub string: String,
    /// Matches across all lines
    pub total: usize,
    /// Matching lines with their match counts, in text order
    pub lines: Vec<MatchedLine>,
}

/// A line containing at least one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedLine {
    /// Matches in this line
    pub count: usize,
    /// The line itself
    pub line: String,
}

/// Occurrences of every search string that matched at least once,
/// in the order the search strings were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OccurrenceReport {
    /// Per-string results
    pub occurrences: Vec<Occurrence>,
}

impl OccurrenceReport {
    /// Look up the result for a search string.
    pub fn get(&self, string: &str) -> Option<&Occurrence> {
        self.occurrences.iter().find(|o| o.string == string)
    }

    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Listing with every matched line under its search string.
    pub fn detailed(&self) -> String {
        let mut output = String::from("Occurrences:\n");
        for occurrence in &self.occurrences {
            output.push_str(&format!("{}: {}\n", occurrence.string, occurrence.total));
            for matched in &occurrence.lines {
                output.push_str(&format!("  [{}] {}\n", matched.count, matched.line));
            }
        }
        output
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// `Occurrences:` followed by one `string: total` line per search string,
/// names padded to a common display width.
impl fmt::Display for OccurrenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Occurrences:")?;
        let width = self
            .occurrences
            .iter()
            .map(|o| o.string.width())
            .max()
            .unwrap_or(0);
        for occurrence in &self.occurrences {
            let pad = width - occurrence.string.width();
            writeln!(
                f,
                "{}:{} {}",
                occurrence.string,
                " ".repeat(pad),
                occurrence.total
            )?;
        }
        Ok(())
    }
}

/// Search every line of `content` for every search string.
///
/// Entries repeating the same string share one result: their matches add up
/// under the first entry's position.
pub fn find_occurrences(content: &str, strings: &[SearchString]) -> OccurrenceReport {
    let slot_of: Vec<usize> = strings
        .iter()
        .enumerate()
        .map(|(i, search)| {
            strings[..i]
                .iter()
                .position(|earlier| earlier.string == search.string)
                .unwrap_or(i)
        })
        .collect();
    let mut occurrences: Vec<Option<Occurrence>> = vec![None; strings.len()];

    for (line_no, line) in content.lines().enumerate() {
        tracing::trace!(line_no, line, "scanning line");

        for (search, &slot) in strings.iter().zip(&slot_of) {
            let count = count_approx_matches(line, &search.string, search.max_distance);
            if count == 0 {
                continue;
            }

            let occurrence = occurrences[slot].get_or_insert_with(|| Occurrence {
                string: search.string.clone(),
                total: 0,
                lines: Vec::new(),
            });
            occurrence.total += count;
            occurrence.lines.push(MatchedLine {
                count,
                line: line.to_string(),
            });

            tracing::debug!(
                line_no,
                string = %search.string,
                count,
                total = occurrence.total,
                "match"
            );
        }
    }

    OccurrenceReport {
        occurrences: occurrences.into_iter().flatten().collect(),
    }
}
