//! Zoom-dependent scaling of canvas visuals.
//!
//! Node radii and label sizes come from the model and live in world space.
//! Strokes, the selection ring and the click target are tuned here.
//!
//! - **World-space** values scale with zoom (drawn after the canvas transform).
//! - **Screen-space** values stay a fixed number of pixels at any zoom.

/// How a visual property scales with zoom level `k`.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space size, clamped to `[min_screen, max_screen]` pixels.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Alpha multiplier as a function of zoom.
#[derive(Clone, Debug, PartialEq)]
pub enum AlphaBehavior {
	/// Always opaque.
	Constant,
	/// Invisible at `zero_alpha_k`, opaque from `full_alpha_k` on.
	Fade {
		/// Zoom at which alpha reaches 0.
		zero_alpha_k: f64,
		/// Zoom from which alpha is 1.
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Alpha in `[0, 1]` at zoom `k`.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Zoom-independent sizes of canvas strokes and targets.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Click target around each node; applied to the node's own radius.
	pub hit_behavior: ScaleBehavior,
	/// Edge stroke width in pixels.
	pub edge_width: f64,
	/// Node outline width in pixels.
	pub node_stroke: f64,
	/// Selection ring width in pixels.
	pub ring_width: f64,
	/// Gap between the node edge and the ring, in pixels.
	pub ring_offset: f64,
	/// Label fade-out when zoomed far out.
	pub label_alpha: AlphaBehavior,
	/// Labels below this many pixels are skipped.
	pub label_cull_px: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			hit_behavior: ScaleBehavior::Clamped {
				min_screen: 6.0,
				max_screen: f64::INFINITY,
			},
			edge_width: 1.0,
			node_stroke: 1.0,
			ring_width: 2.5,
			ring_offset: 2.0,
			label_alpha: AlphaBehavior::Fade {
				zero_alpha_k: 0.15,
				full_alpha_k: 0.4,
			},
			label_cull_px: 3.0,
		}
	}
}

/// Scale values for one zoom level, computed once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom these values were computed for.
	pub k: f64,
	hit_behavior: ScaleBehavior,
	/// World-space edge width.
	pub edge_width: f64,
	/// World-space node outline width.
	pub node_stroke: f64,
	/// World-space selection ring width.
	pub ring_width: f64,
	/// World-space gap between node and ring.
	pub ring_offset: f64,
	/// Label alpha at this zoom.
	pub label_alpha: f64,
	label_cull_px: f64,
}

impl ScaledValues {
	/// Resolve `config` at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			hit_behavior: config.hit_behavior.clone(),
			edge_width: config.edge_width / k,
			node_stroke: config.node_stroke / k,
			ring_width: config.ring_width / k,
			ring_offset: config.ring_offset / k,
			label_alpha: config.label_alpha.apply(k),
			label_cull_px: config.label_cull_px,
		}
	}

	/// World-space click radius of a node drawn with `radius`.
	pub fn hit_radius(&self, radius: f64) -> f64 {
		self.hit_behavior.apply(radius, self.k)
	}

	/// Whether a label of `font_size` world units is worth drawing.
	pub fn shows_label(&self, font_size: f64) -> bool {
		self.label_alpha > 0.0 && font_size * self.k >= self.label_cull_px
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn behaviors_convert_to_world_space() {
		assert_eq!(ScaleBehavior::World.apply(4.0, 2.0), 4.0);
		assert_eq!(ScaleBehavior::Screen.apply(4.0, 2.0), 2.0);
		let clamped = ScaleBehavior::Clamped {
			min_screen: 6.0,
			max_screen: 10.0,
		};
		// 1.0 world at k=2 is 2px, raised to 6px = 3.0 world.
		assert_eq!(clamped.apply(1.0, 2.0), 3.0);
		assert_eq!(clamped.apply(20.0, 1.0), 10.0);
		assert_eq!(clamped.apply(8.0, 1.0), 8.0);
	}

	#[test]
	fn fade_is_linear_between_thresholds() {
		let fade = AlphaBehavior::Fade {
			zero_alpha_k: 0.0,
			full_alpha_k: 1.0,
		};
		assert_eq!(fade.apply(-1.0), 0.0);
		assert_eq!(fade.apply(0.25), 0.25);
		assert_eq!(fade.apply(3.0), 1.0);
		assert_eq!(AlphaBehavior::Constant.apply(0.01), 1.0);
	}

	#[test]
	fn small_nodes_get_a_minimum_click_target() {
		let values = ScaledValues::new(&ScaleConfig::default(), 0.5);
		assert_eq!(values.hit_radius(1.0), 12.0);
		assert_eq!(values.hit_radius(50.0), 50.0);
		assert_eq!(values.edge_width, 2.0);
	}

	#[test]
	fn tiny_labels_are_culled() {
		let values = ScaledValues::new(&ScaleConfig::default(), 0.2);
		assert!(!values.shows_label(8.0));
		assert!(values.shows_label(20.0));

		let far = ScaledValues::new(&ScaleConfig::default(), 0.1);
		assert!(!far.shows_label(100.0));
	}
}
