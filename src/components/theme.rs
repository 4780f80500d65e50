//! Visual theming for both visualizations.
//!
//! Provides the RGBA color type used across the crate and the per-variant
//! color and glow settings.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Opaque color from a packed `0xRRGGBB` value.
	pub const fn hex(rgb: u32) -> Self {
		Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// Linear interpolation between two colors, `t` clamped to [0, 1].
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t).round() as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t).round() as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t).round() as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors for the 3D galaxy scene.
#[derive(Clone, Debug)]
pub struct GalaxyTheme {
	/// Canvas clear color
	pub background: Color,
	/// Flat color of the center orb
	pub orb: Color,
	/// Color of the point light halo around the orb
	pub light: Color,
	/// Halo radius in world units (the light's falloff distance)
	pub light_distance: f32,
	/// Halo intensity at the center (0.0 = off)
	pub light_intensity: f64,
	/// Fill color of interaction hearts
	pub heart: Color,
}

impl Default for GalaxyTheme {
	fn default() -> Self {
		Self {
			background: Color::hex(0x0d001a),
			orb: Color::hex(0x9900ff),
			light: Color::hex(0xff00ff),
			light_distance: 300.0,
			light_intensity: 0.35,
			heart: Color::hex(0xff0000),
		}
	}
}

/// Colors for the 2D orbiting starfield.
#[derive(Clone, Debug)]
pub struct StarfieldTheme {
	/// Low-alpha overlay painted every tick; leaves motion trails
	pub trail: Color,
	/// Orb body color
	pub orb: Color,
	/// Orb core highlight
	pub orb_core: Color,
	/// Shadow color used for the orb glow
	pub orb_glow: Color,
	/// Shadow blur radius for the glow, in pixels
	pub orb_glow_blur: f64,
	/// Star color; alpha comes from the star's current opacity
	pub star: Color,
}

impl Default for StarfieldTheme {
	fn default() -> Self {
		Self {
			trail: Color::rgba(0, 0, 10, 0.2),
			orb: Color::hex(0x9900ff),
			orb_core: Color::hex(0xf3d9ff),
			orb_glow: Color::hex(0xcc66ff),
			orb_glow_blur: 40.0,
			star: Color::rgb(255, 255, 255),
		}
	}
}
