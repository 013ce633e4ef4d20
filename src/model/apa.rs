//! APA-style citation rendering.
//!
//! Each [`CitationRecord`] becomes three things: a plain-text citation (what
//! the copy action puts on the clipboard), a styled [`Fragment`] (typed spans
//! the client renders, or [`Fragment::to_html`] for the embedded markup), and
//! a flattened search string. Years feed the node's year range.

use serde::Serialize;

use super::bibtex::parse_entries;
use super::types::CitationRecord;
use crate::config::CitationConfig;

/// Styling class of a fragment span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SpanStyle {
	/// Punctuation and unstyled text.
	Plain,
	/// Formatted author list.
	Author,
	/// Work title.
	Title,
	/// Journal or proceedings name, italic.
	Venue,
	/// Volume number, set in italics after the venue.
	Volume,
	/// DOI resolver link.
	Doi,
}

impl SpanStyle {
	/// CSS class attached to the span, if any.
	pub fn class(self) -> Option<&'static str> {
		match self {
			SpanStyle::Plain | SpanStyle::Volume => None,
			SpanStyle::Author => Some("apa-author"),
			SpanStyle::Title => Some("apa-title"),
			SpanStyle::Venue => Some("apa-journal"),
			SpanStyle::Doi => Some("apa-doi"),
		}
	}
}

/// A run of citation text with one style.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Span {
	/// How the run is rendered.
	pub style: SpanStyle,
	/// Unescaped text.
	pub text: String,
}

/// A rendered citation: styled spans plus the plain text for copying.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fragment {
	/// Spans in reading order.
	pub spans: Vec<Span>,
	/// Plain-text citation put on the clipboard.
	pub copy_text: String,
}

/// Aggregated output for one node's bibliography attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormattedCitations {
	/// One record per non-blank entry.
	pub records: Vec<CitationRecord>,
	/// Concatenated entry markup.
	pub html: String,
	/// Per-entry search strings joined by the search separator.
	pub search_text: String,
	/// Every parseable entry year.
	pub years: Vec<i32>,
}

fn field(value: &Option<String>) -> &str {
	value.as_deref().unwrap_or("")
}

/// DOI with any resolver prefix removed.
fn bare_doi<'a>(doi: &'a str, prefix: &str) -> std::borrow::Cow<'a, str> {
	if prefix.is_empty() {
		doi.into()
	} else {
		doi.replace(prefix, "").into()
	}
}

/// `Author (Year). Title. Venue[, Volume][(Issue)][, Pages][. <doi url>]`
pub fn plain_text(record: &CitationRecord, config: &CitationConfig) -> String {
	let mut plain = format!(
		"{} ({}). {}. {}",
		field(&record.author),
		field(&record.year),
		field(&record.title),
		field(&record.venue)
	);
	if let Some(volume) = &record.volume {
		plain.push_str(&format!(", {volume}"));
	}
	if let Some(issue) = &record.issue {
		plain.push_str(&format!("({issue})"));
	}
	if let Some(pages) = &record.pages {
		plain.push_str(&format!(", {pages}"));
	}
	if let Some(doi) = &record.doi {
		plain.push_str(&format!(
			". {}{}",
			config.doi_prefix,
			bare_doi(doi, &config.doi_prefix)
		));
	}
	plain
}

impl Fragment {
	/// Build the styled citation. Venue details only appear with a venue.
	pub fn from_record(record: &CitationRecord, config: &CitationConfig) -> Self {
		let mut spans = Vec::new();
		let mut push = |style: SpanStyle, text: String| spans.push(Span { style, text });

		push(SpanStyle::Author, field(&record.author).to_string());
		if let Some(year) = &record.year {
			push(SpanStyle::Plain, format!(" ({year})"));
		}
		push(SpanStyle::Plain, ". ".to_string());
		if let Some(title) = &record.title {
			push(SpanStyle::Title, title.clone());
			push(SpanStyle::Plain, ". ".to_string());
		}
		if let Some(venue) = &record.venue {
			push(SpanStyle::Venue, venue.clone());
			if let Some(volume) = &record.volume {
				push(SpanStyle::Plain, ", ".to_string());
				push(SpanStyle::Volume, volume.clone());
			}
			if let Some(issue) = &record.issue {
				push(SpanStyle::Plain, format!("({issue})"));
			}
			if let Some(pages) = &record.pages {
				push(SpanStyle::Plain, format!(", {pages}"));
			}
			push(SpanStyle::Plain, ". ".to_string());
		}
		if let Some(doi) = &record.doi {
			push(SpanStyle::Plain, " ".to_string());
			push(
				SpanStyle::Doi,
				format!("{}{}", config.doi_prefix, bare_doi(doi, &config.doi_prefix)),
			);
		}

		Self {
			spans,
			copy_text: plain_text(record, config),
		}
	}

	/// Markup for the embedded model, with an inline copy handler.
	pub fn to_html(&self) -> String {
		let mut body = String::new();
		for span in &self.spans {
			let text = html_escape(&span.text);
			match span.style {
				SpanStyle::Plain => body.push_str(&text),
				SpanStyle::Author | SpanStyle::Title => body.push_str(&format!(
					"<span class='{}'>{text}</span>",
					span.style.class().unwrap_or_default()
				)),
				SpanStyle::Venue => body.push_str(&format!("<i class='apa-journal'>{text}</i>")),
				SpanStyle::Volume => body.push_str(&format!("<i>{text}</i>")),
				SpanStyle::Doi => body.push_str(&format!(
					"<a href='{text}' target='_blank' class='apa-doi'>{text}</a>"
				)),
			}
		}
		format!(
			"<div class='apa-entry'>{body}<button class='copy-btn' onclick=\"copyCitation('{}')\">Copy APA</button></div>",
			escape_handler_arg(&self.copy_text)
		)
	}
}

/// `"author year title venue"` for substring search.
pub fn search_string(record: &CitationRecord) -> String {
	format!(
		"{} {} {} {}",
		field(&record.author),
		field(&record.year),
		field(&record.title),
		field(&record.venue)
	)
}

/// Leading four characters of the year field as a strictly positive integer.
pub fn parse_year(year: &str) -> Option<i32> {
	let head: String = year.chars().take(4).collect();
	head.trim().parse::<i32>().ok().filter(|y| *y > 0)
}

/// Parse and render a whole bibliography attribute. Total: any input,
/// including empty and `none`, produces a value.
pub fn format_citations(blob: &str, config: &CitationConfig) -> FormattedCitations {
	let records = parse_entries(blob, &config.entry_delimiter);

	let html = records
		.iter()
		.map(|record| Fragment::from_record(record, config).to_html())
		.collect::<String>();
	let search_text = records
		.iter()
		.map(search_string)
		.collect::<Vec<_>>()
		.join(&config.search_separator);
	let years = records
		.iter()
		.filter_map(|record| record.year.as_deref().and_then(parse_year))
		.collect();

	FormattedCitations {
		records,
		html,
		search_text,
		years,
	}
}

/// Escape text for an HTML text node or single-quoted attribute.
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#39;")
}

/// Escape text passed as a single-quoted JS string inside a double-quoted
/// `onclick` attribute.
fn escape_handler_arg(s: &str) -> String {
	s.replace('\\', "\\\\")
		.replace('\'', "\\'")
		.replace(['\n', '\r'], " ")
		.replace('&', "&amp;")
		.replace('"', "&quot;")
		.replace('<', "&lt;")
}
