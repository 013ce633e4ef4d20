//! Tolerant BibTeX field extraction.
//!
//! A bibliography attribute holds zero or more entries joined by a delimiter.
//! Each entry is scanned for `name = {value}` or `name = "value"` with an
//! ordered alias list per field; the first alias present in the entry wins,
//! even when its value is blank.
//!
//! A value ends at the first `}` or `"` not preceded by a backslash, whichever
//! opened it. Nested braces are therefore not balanced: `title = {The {GPU}
//! Era}` yields `The GPU` rather than the full title. This approximation is
//! accepted; entries stay parseable and the remaining fields are unaffected.

use super::types::CitationRecord;

/// Logical citation field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Field {
	Author,
	Year,
	Title,
	Venue,
	Volume,
	Issue,
	Pages,
	Doi,
}

/// One extraction rule: a field and the entry keys it may be spelled as.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
	/// Record slot filled by this rule.
	pub field: Field,
	/// Keys tried in order; the first one present wins.
	pub aliases: &'static [&'static str],
}

/// Extraction rules, applied independently per entry.
pub const FIELD_RULES: [FieldRule; 8] = [
	FieldRule {
		field: Field::Author,
		aliases: &["author"],
	},
	FieldRule {
		field: Field::Year,
		aliases: &["year", "date"],
	},
	FieldRule {
		field: Field::Title,
		aliases: &["title"],
	},
	FieldRule {
		field: Field::Venue,
		aliases: &["journal", "booktitle", "series"],
	},
	FieldRule {
		field: Field::Volume,
		aliases: &["volume"],
	},
	FieldRule {
		field: Field::Issue,
		aliases: &["number"],
	},
	FieldRule {
		field: Field::Pages,
		aliases: &["pages"],
	},
	FieldRule {
		field: Field::Doi,
		aliases: &["doi"],
	},
];

impl CitationRecord {
	fn slot(&mut self, field: Field) -> &mut Option<String> {
		match field {
			Field::Author => &mut self.author,
			Field::Year => &mut self.year,
			Field::Title => &mut self.title,
			Field::Venue => &mut self.venue,
			Field::Volume => &mut self.volume,
			Field::Issue => &mut self.issue,
			Field::Pages => &mut self.pages,
			Field::Doi => &mut self.doi,
		}
	}
}

/// Split a bibliography blob into entries and parse each one.
///
/// Empty input, `none` (any case), and whitespace-only entries yield nothing.
pub fn parse_entries(blob: &str, delimiter: &str) -> Vec<CitationRecord> {
	let trimmed = blob.trim();
	if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
		return Vec::new();
	}
	let entries: Box<dyn Iterator<Item = &str>> = if delimiter.is_empty() {
		Box::new(std::iter::once(blob))
	} else {
		Box::new(blob.split(delimiter))
	};
	entries
		.filter(|entry| !entry.trim().is_empty())
		.map(parse_entry)
		.collect()
}

/// Extract every field of [`FIELD_RULES`] from a single entry.
pub fn parse_entry(entry: &str) -> CitationRecord {
	let mut record = CitationRecord::default();
	for rule in &FIELD_RULES {
		*record.slot(rule.field) = rule
			.aliases
			.iter()
			.find_map(|alias| extract_field(entry, alias))
			.flatten();
	}
	record
}

/// Cleaned value of `name = <delim>value<delim>`, matched case-insensitively.
///
/// The outer option tells whether `name` is present with a terminated value;
/// the inner one is `None` when that value is blank. Occurrences of `name` inside a longer key (`booktitle` for `title`,
/// `urldate` for `date`) are skipped.
fn extract_field(entry: &str, name: &str) -> Option<Option<String>> {
	// ASCII lowering keeps byte offsets aligned with `entry`.
	let lowered = entry.to_ascii_lowercase();
	let needle = name.to_ascii_lowercase();
	let mut search_from = 0;

	while let Some(found) = lowered[search_from..].find(&needle) {
		let start = search_from + found;
		search_from = start + 1;

		let preceded_by_word = lowered[..start]
			.chars()
			.next_back()
			.is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == ':');
		if preceded_by_word {
			continue;
		}

		let Some(rest) = entry[start + needle.len()..].trim_start().strip_prefix('=') else {
			continue;
		};
		let rest = rest.trim_start();
		let Some(body) = rest.strip_prefix(['{', '"']) else {
			continue;
		};
		if let Some(end) = closing_delimiter(body) {
			let value = clean_value(&body[..end]);
			return Some((!value.is_empty()).then_some(value));
		}
	}
	None
}

/// Byte offset of the first `}` or `"` not escaped with a backslash.
fn closing_delimiter(body: &str) -> Option<usize> {
	let mut previous = None;
	for (offset, c) in body.char_indices() {
		if matches!(c, '}' | '"') && previous != Some('\\') {
			return Some(offset);
		}
		previous = Some(c);
	}
	None
}

/// Drop braces, collapse whitespace runs, trim.
fn clean_value(raw: &str) -> String {
	raw.split(|c| c == '{' || c == '}')
		.collect::<String>()
		.split_whitespace()
		.collect::<Vec<_>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;

	const ARTICLE: &str = r#"@article{smith2021,
  author = {Smith, Jane and Doe, John},
  title = {Graph   Methods
           for Citation Analysis},
  journal = "Journal of Networks",
  year = {2021-05-01},
  volume = {12},
  number = {3},
  pages = {45--67},
  doi = {10.1000/xyz123}
}"#;

	#[test]
	fn parses_all_fields_of_an_article() {
		let record = parse_entry(ARTICLE);
		assert_eq!(record.author.as_deref(), Some("Smith, Jane and Doe, John"));
		assert_eq!(
			record.title.as_deref(),
			Some("Graph Methods for Citation Analysis")
		);
		assert_eq!(record.venue.as_deref(), Some("Journal of Networks"));
		assert_eq!(record.year.as_deref(), Some("2021-05-01"));
		assert_eq!(record.volume.as_deref(), Some("12"));
		assert_eq!(record.issue.as_deref(), Some("3"));
		assert_eq!(record.pages.as_deref(), Some("45--67"));
		assert_eq!(record.doi.as_deref(), Some("10.1000/xyz123"));
	}

	#[test]
	fn field_names_match_case_insensitively() {
		let record = parse_entry("@misc{k, AUTHOR = {Lee}, Title = \"Loud\"}");
		assert_eq!(record.author.as_deref(), Some("Lee"));
		assert_eq!(record.title.as_deref(), Some("Loud"));
	}

	#[test]
	fn aliases_are_tried_in_order() {
		let record = parse_entry("@book{k, date = {2019}, series = {LNCS}, booktitle = {Proc}}");
		assert_eq!(record.year.as_deref(), Some("2019"));
		// `booktitle` outranks `series` regardless of position in the entry.
		assert_eq!(record.venue.as_deref(), Some("Proc"));
	}

	#[test]
	fn title_is_not_taken_from_booktitle() {
		let record =
			parse_entry("@inproceedings{k, booktitle = {Proceedings}, title = {Real Title}}");
		assert_eq!(record.title.as_deref(), Some("Real Title"));
		assert_eq!(record.venue.as_deref(), Some("Proceedings"));
	}

	#[test]
	fn nested_braces_truncate_the_value() {
		let record = parse_entry("@article{k, title = {The {GPU} Era}, year = {2020}}");
		assert_eq!(record.title.as_deref(), Some("The GPU"));
		assert_eq!(record.year.as_deref(), Some("2020"));
	}

	#[test]
	fn escaped_quote_does_not_close_the_value() {
		let record = parse_entry(r#"@article{k, title = "Say \"hi\" now"}"#);
		assert_eq!(record.title.as_deref(), Some(r#"Say \"hi\" now"#));
	}

	#[test]
	fn bare_and_unterminated_values_are_absent() {
		let record = parse_entry("@article{k, year = 2020, title = {never closed");
		assert_eq!(record.year, None);
		assert_eq!(record.title, None);
	}

	#[test]
	fn blank_values_are_absent() {
		let record = parse_entry("@article{k, author = {  }, pages = {}}");
		assert_eq!(record.author, None);
		assert_eq!(record.pages, None);
	}

	#[test]
	fn blank_first_alias_shadows_later_ones() {
		let record = parse_entry("@a{k, year = {}, date = {2019}}");
		assert_eq!(record.year, None);
		let record = parse_entry("@a{k, journal = \"  \", booktitle = {Proc}}");
		assert_eq!(record.venue, None);
	}

	#[test]
	fn bare_first_alias_falls_through() {
		let record = parse_entry("@a{k, date = {2019}, year = 2020}");
		assert_eq!(record.year.as_deref(), Some("2019"));
	}

	#[test]
	fn splits_on_delimiter_and_skips_blank_entries() {
		let blob = "@a{x, title={One}} ||    || @b{y, title={Two}} || ";
		let records = parse_entries(blob, " || ");
		let titles: Vec<_> = records.iter().map(|r| r.title.as_deref()).collect();
		assert_eq!(titles, vec![Some("One"), Some("Two")]);
	}

	#[test]
	fn empty_and_none_yield_nothing() {
		assert!(parse_entries("", " || ").is_empty());
		assert!(parse_entries("None", " || ").is_empty());
		assert!(parse_entries("NONE", " || ").is_empty());
		assert!(parse_entries("   ", " || ").is_empty());
	}

	#[test]
	fn garbage_entry_parses_to_empty_record() {
		let records = parse_entries("not bibtex at all", " || ");
		assert_eq!(records, vec![CitationRecord::default()]);
	}
}
