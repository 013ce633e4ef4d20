//! Visual theming for the citation graph canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parse `#rrggbb` or `#rgb`.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let digits = hex.strip_prefix('#')?;
		let channel = |s: &str| u8::from_str_radix(s, 16).ok();
		match digits.len() {
			6 => Some(Self::rgb(
				channel(digits.get(0..2)?)?,
				channel(digits.get(2..4)?)?,
				channel(digits.get(4..6)?)?,
			)),
			3 => {
				let short = |i: usize| channel(digits.get(i..i + 1)?).map(|v| v * 17);
				Some(Self::rgb(short(0)?, short(1)?, short(2)?))
			}
			_ => None,
		}
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Opacity applied to elements outside the selected neighborhood.
#[derive(Clone, Debug)]
pub struct DimStyle {
	/// Dimmed node opacity.
	pub node_alpha: f64,
	/// Dimmed edge opacity.
	pub edge_alpha: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas fill.
	pub background: Color,
	/// Edge stroke.
	pub edge: Color,
	/// Node outline.
	pub node_border: Color,
	/// Label text.
	pub label: Color,
	/// Ring drawn around the selected node.
	pub highlight: Color,
	/// Neighbor overlay opacities.
	pub dim: DimStyle,
	/// Fill for nodes whose color string does not parse.
	pub fallback_node: Color,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(17, 17, 17),
			edge: Color::rgb(68, 68, 68),
			node_border: Color::rgb(34, 34, 34),
			label: Color::rgb(255, 255, 255),
			highlight: Color::rgb(255, 122, 162),
			dim: DimStyle {
				node_alpha: 0.08,
				edge_alpha: 0.05,
			},
			fallback_node: Color::rgb(158, 158, 158),
		}
	}
}

impl Theme {
	/// Fill color of a node given its model color string.
	pub fn node_fill(&self, color: &str) -> Color {
		Color::from_hex(color).unwrap_or(self.fallback_node)
	}
}
