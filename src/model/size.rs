//! Node radius and label font size from a raw weight metric.

use crate::config::SizeConfig;

/// `max(raw, 0)^power * mult + add`. Never below `add`.
pub fn radius(raw: f64, config: &SizeConfig) -> f64 {
	let weight = if raw.is_nan() { 0.0 } else { raw.max(0.0) };
	weight.powf(config.power) * config.mult + config.add
}

/// `max(min_font, floor(ln(1 + radius) * label_scale * 10))`.
pub fn font_size(radius: f64, config: &SizeConfig) -> u32 {
	let scaled = (radius.max(0.0).ln_1p() * config.label_scale * 10.0).floor();
	if scaled.is_finite() && scaled > config.min_font as f64 {
		scaled as u32
	} else {
		config.min_font
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn radius_grows_with_weight() {
		let config = SizeConfig::default();
		assert!(radius(0.0, &config) < radius(10.0, &config));
		assert!(radius(10.0, &config) < radius(100.0, &config));
		assert_eq!(radius(0.0, &config), config.add);
		assert_eq!(radius(-5.0, &config), config.add);
	}

	#[test]
	fn font_size_has_floor() {
		let config = SizeConfig::default();
		assert_eq!(font_size(0.0, &config), config.min_font);
		assert_eq!(font_size(1.0, &config), config.min_font);
		// ln(1 + 1000) * 3.5 = 24.17...
		assert_eq!(font_size(1000.0, &config), 24);
	}

	proptest! {
		#[test]
		fn radius_is_monotone(a in 0.0f64..1e6, b in 0.0f64..1e6) {
			let config = SizeConfig::default();
			let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
			prop_assert!(radius(lo, &config) <= radius(hi, &config));
			prop_assert!(radius(lo, &config) > 0.0);
		}

		#[test]
		fn font_size_is_monotone_and_floored(a in 0.0f64..1e6, b in 0.0f64..1e6) {
			let config = SizeConfig::default();
			let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
			prop_assert!(font_size(lo, &config) <= font_size(hi, &config));
			prop_assert!(font_size(lo, &config) >= config.min_font);
		}
	}
}
