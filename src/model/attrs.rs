//! Alias-tolerant attribute lookup and coordinate extraction.
//!
//! Graph authoring tools spell the same logical field differently (`label`,
//! `Label`, `name`; `x`, `viz:position.x`, ...). Resolution tries every alias
//! case-sensitively first, then every alias case-insensitively, so the result
//! does not depend on which tool produced the file.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::Position;

/// A scalar attribute value as handed over by the graph decoder.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
	Text(String),
	Number(serde_json::Number),
	Bool(bool),
	Null,
}

impl AttrValue {
	/// Textual form of the value; `None` for null and for the empty string.
	pub fn as_text(&self) -> Option<Cow<'_, str>> {
		match self {
			AttrValue::Text(s) if s.is_empty() => None,
			AttrValue::Text(s) => Some(Cow::Borrowed(s)),
			AttrValue::Number(n) => Some(Cow::Owned(n.to_string())),
			AttrValue::Bool(b) => Some(Cow::Owned(b.to_string())),
			AttrValue::Null => None,
		}
	}
}

impl From<&str> for AttrValue {
	fn from(s: &str) -> Self {
		AttrValue::Text(s.to_string())
	}
}

/// String-keyed attribute bag of one node or edge.
pub type AttrBag = BTreeMap<String, AttrValue>;

/// Value of the first alias present with a non-empty value.
///
/// All aliases are checked case-sensitively before any is checked
/// case-insensitively. Among keys differing only by case, the first in key
/// order with a non-empty value wins.
pub fn resolve<'a, S: AsRef<str>>(bag: &'a AttrBag, aliases: &[S]) -> Option<Cow<'a, str>> {
	aliases
		.iter()
		.find_map(|alias| bag.get(alias.as_ref()).and_then(AttrValue::as_text))
		.or_else(|| {
			aliases.iter().find_map(|alias| {
				let alias = alias.as_ref();
				bag.iter()
					.filter(|(key, _)| key.eq_ignore_ascii_case(alias))
					.find_map(|(_, value)| value.as_text())
			})
		})
}

/// Parse a finite number, accepting a decimal comma (`"1,5"`).
pub fn parse_number(raw: &str) -> Option<f64> {
	let normalized = raw.trim().replace(',', ".");
	if normalized.is_empty() {
		return None;
	}
	normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// First `(x, y)` key pair whose values both parse as numbers, or `None`.
///
/// The vertical axis is flipped: authoring tools grow y upwards while screen
/// space grows it downwards.
pub fn extract_position<S: AsRef<str>>(bag: &AttrBag, pairs: &[(S, S)]) -> Option<Position> {
	let number = |key: &str| {
		bag.get(key)
			.and_then(AttrValue::as_text)
			.and_then(|v| parse_number(&v))
	};
	pairs.iter().find_map(|(kx, ky)| {
		let x = number(kx.as_ref())?;
		let y = number(ky.as_ref())?;
		Some(Position::new(x, -y))
	})
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn bag(items: &[(&str, &str)]) -> AttrBag {
		items
			.iter()
			.map(|(k, v)| (k.to_string(), AttrValue::from(*v)))
			.collect()
	}

	#[test]
	fn falls_back_to_case_insensitive_match() {
		let attrs = bag(&[("B", "x")]);
		assert_eq!(resolve(&attrs, &["a", "b", "c"]).as_deref(), Some("x"));
	}

	#[test]
	fn exact_match_anywhere_beats_case_insensitive_earlier_alias() {
		let attrs = bag(&[("LABEL", "shouting"), ("name", "exact")]);
		assert_eq!(
			resolve(&attrs, &["label", "name"]).as_deref(),
			Some("exact")
		);
	}

	#[test]
	fn alias_priority_order_is_respected() {
		let attrs = bag(&[("Label", "second"), ("label", "first")]);
		assert_eq!(
			resolve(&attrs, &["label", "Label"]).as_deref(),
			Some("first")
		);
	}

	#[test]
	fn empty_values_are_absent() {
		let attrs = bag(&[("label", ""), ("Name", "fallback")]);
		assert_eq!(
			resolve(&attrs, &["label", "name"]).as_deref(),
			Some("fallback")
		);
		assert_eq!(resolve(&bag(&[("label", "")]), &["label"]), None);
		assert_eq!(resolve(&AttrBag::new(), &["label"]), None);
	}

	#[test]
	fn numbers_and_bools_resolve_as_text() {
		let attrs: AttrBag = serde_json::from_str(r#"{ "size": 12.5, "flag": true, "n": null }"#)
			.unwrap();
		assert_eq!(resolve(&attrs, &["size"]).as_deref(), Some("12.5"));
		assert_eq!(resolve(&attrs, &["flag"]).as_deref(), Some("true"));
		assert_eq!(resolve(&attrs, &["n"]), None);
	}

	#[test]
	fn parses_decimal_comma() {
		assert_eq!(parse_number("1,5"), Some(1.5));
		assert_eq!(parse_number(" -3.25 "), Some(-3.25));
		assert_eq!(parse_number(""), None);
		assert_eq!(parse_number("abc"), None);
		assert_eq!(parse_number("NaN"), None);
		assert_eq!(parse_number("inf"), None);
	}

	#[test]
	fn position_takes_first_complete_pair_and_flips_y() {
		let pairs = [("x", "y"), ("pos_x", "pos_y")];
		let attrs = bag(&[("x", "1"), ("y", "oops"), ("pos_x", "4,5"), ("pos_y", "2")]);
		assert_eq!(
			extract_position(&attrs, &pairs),
			Some(Position::new(4.5, -2.0))
		);

		let attrs = bag(&[("x", "10"), ("y", "20")]);
		assert_eq!(
			extract_position(&attrs, &pairs),
			Some(Position::new(10.0, -20.0))
		);
	}

	#[test]
	fn missing_position_is_none() {
		let pairs = [("x", "y")];
		assert_eq!(extract_position(&bag(&[("x", "1")]), &pairs), None);
		assert_eq!(extract_position(&AttrBag::new(), &pairs), None);
	}

	proptest! {
		#[test]
		fn resolve_never_returns_empty(key in "[a-zA-Z]{1,6}", value in ".{0,8}") {
			let attrs = bag(&[(key.as_str(), value.as_str())]);
			let aliases = [key.to_lowercase(), key.to_uppercase()];
			if let Some(found) = resolve(&attrs, &aliases) {
				prop_assert!(!found.is_empty());
				prop_assert_eq!(found.as_ref(), value.as_str());
			} else {
				prop_assert!(value.is_empty());
			}
		}
	}
}
