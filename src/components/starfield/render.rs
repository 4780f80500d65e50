//! Canvas painter for the starfield.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::stars::Star;
use super::state::StarPainter;
use crate::components::theme::StarfieldTheme;

/// Paints starfield ticks straight onto a 2D canvas context.
pub struct CanvasPainter<'a> {
	pub ctx: &'a CanvasRenderingContext2d,
	pub theme: &'a StarfieldTheme,
}

impl StarPainter for CanvasPainter<'_> {
	fn fade(&mut self, width: f64, height: f64) {
		self.ctx.set_fill_style_str(&self.theme.trail.to_css());
		self.ctx.fill_rect(0.0, 0.0, width, height);
	}

	fn orb(&mut self, cx: f64, cy: f64, radius: f64) {
		let ctx = self.ctx;
		let theme = self.theme;

		ctx.save();
		ctx.set_shadow_blur(theme.orb_glow_blur);
		ctx.set_shadow_color(&theme.orb_glow.to_css());

		match ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius) {
			Ok(gradient) => {
				let _ = gradient.add_color_stop(0.0, &theme.orb_core.to_css());
				let _ = gradient.add_color_stop(0.6, &theme.orb.to_css());
				let _ = gradient.add_color_stop(1.0, &theme.orb.darken(0.3).to_css());
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
			}
			Err(_) => ctx.set_fill_style_str(&theme.orb.to_css()),
		}

		ctx.begin_path();
		let _ = ctx.arc(cx, cy, radius, 0.0, PI * 2.0);
		ctx.fill();
		ctx.restore();
	}

	fn star(&mut self, star: &Star) {
		let color = self.theme.star.with_alpha(star.opacity);
		self.ctx.set_fill_style_str(&color.to_css());

		self.ctx.begin_path();
		let _ = self.ctx.arc(star.x, star.y, star.size, 0.0, PI * 2.0);
		self.ctx.fill();
	}
}
