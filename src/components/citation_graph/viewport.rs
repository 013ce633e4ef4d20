//! Pan/zoom transform math.
//!
//! A transform maps graph space to screen space as `screen = graph * k + (x, y)`.

use crate::model::Position;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal translation in pixels.
	pub x: f64,
	/// Vertical translation in pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Graph point to screen pixels.
	pub fn to_screen(&self, p: Position) -> (f64, f64) {
		(p.x * self.k + self.x, p.y * self.k + self.y)
	}

	/// Screen pixels to graph point.
	pub fn to_graph(&self, sx: f64, sy: f64) -> Position {
		Position::new((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Frame the bounding box of `positions` so it fills `margin` of the
	/// viewport, centered.
	///
	/// A single point (or a bounding box of zero extent) keeps zoom 1.0; an
	/// empty graph centers the origin.
	pub fn fit(
		positions: impl IntoIterator<Item = Position>,
		width: f64,
		height: f64,
		margin: f64,
	) -> Self {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		for p in positions {
			bounds = Some(match bounds {
				None => (p.x, p.x, p.y, p.y),
				Some((min_x, max_x, min_y, max_y)) => {
					(min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
				}
			});
		}
		let Some((min_x, max_x, min_y, max_y)) = bounds else {
			return Self::centered_on(Position::ORIGIN, 1.0, width, height);
		};

		let ratio = ((max_x - min_x) / width).max((max_y - min_y) / height);
		let k = if ratio.is_finite() && ratio > 0.0 {
			margin / ratio
		} else {
			1.0
		};
		let center = Position::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		Self::centered_on(center, k, width, height)
	}

	/// Zoom `k` with `p` in the middle of the viewport.
	pub fn centered_on(p: Position, k: f64, width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0 - k * p.x,
			y: height / 2.0 - k * p.y,
			k,
		}
	}

	/// Translate by a screen-space delta.
	pub fn panned(self, dx: f64, dy: f64) -> Self {
		Self {
			x: self.x + dx,
			y: self.y + dy,
			..self
		}
	}

	/// Multiply zoom by `factor` keeping the screen point `(sx, sy)` fixed.
	///
	/// The zoom stays within the extent spanned by `min_k` and `max_k`, in
	/// whichever order they are given.
	pub fn zoomed_at(self, factor: f64, sx: f64, sy: f64, min_k: f64, max_k: f64) -> Self {
		let (lo, hi) = (min_k.min(max_k), min_k.max(max_k));
		let k = (self.k * factor).max(lo).min(hi);
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fit_scales_larger_extent_and_centers_box() {
		let points = [Position::new(-100.0, -50.0), Position::new(100.0, 50.0)];
		let t = ViewTransform::fit(points, 800.0, 600.0, 0.85);
		// width ratio 200/800 = 0.25 dominates 100/600.
		assert!((t.k - 3.4).abs() < 1e-12);
		assert_eq!(t.to_screen(Position::ORIGIN), (400.0, 300.0));
	}

	#[test]
	fn fit_of_degenerate_boxes_keeps_unit_zoom() {
		let t = ViewTransform::fit([Position::new(5.0, 5.0)], 800.0, 600.0, 0.85);
		assert_eq!(t.k, 1.0);
		assert_eq!(t.to_screen(Position::new(5.0, 5.0)), (400.0, 300.0));

		let t = ViewTransform::fit(std::iter::empty(), 800.0, 600.0, 0.85);
		assert_eq!(t, ViewTransform { x: 400.0, y: 300.0, k: 1.0 });
	}

	#[test]
	fn screen_and_graph_round_trip() {
		let t = ViewTransform { x: 10.0, y: -20.0, k: 2.0 };
		let p = t.to_graph(50.0, 40.0);
		assert_eq!(p, Position::new(20.0, 30.0));
		assert_eq!(t.to_screen(p), (50.0, 40.0));
	}

	#[test]
	fn zoom_keeps_anchor_fixed_and_clamps() {
		let t = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };
		let anchor = t.to_graph(200.0, 100.0);
		let zoomed = t.zoomed_at(2.0, 200.0, 100.0, 0.05, 8.0);
		assert_eq!(zoomed.k, 2.0);
		assert_eq!(zoomed.to_screen(anchor), (200.0, 100.0));

		let clamped = zoomed.zoomed_at(100.0, 0.0, 0.0, 0.05, 8.0);
		assert_eq!(clamped.k, 8.0);
	}

	#[test]
	fn inverted_zoom_extent_still_clamps() {
		let t = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };
		assert_eq!(t.zoomed_at(100.0, 0.0, 0.0, 9.0, 8.0).k, 9.0);
		assert_eq!(t.zoomed_at(0.01, 0.0, 0.0, 9.0, 8.0).k, 8.0);
	}
}
