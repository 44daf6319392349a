//! Canvas drawing for the word graph: links, node circles, labels, tooltips.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::WordGraphState;

const BACKGROUND: &str = "#1a1a1a";
const LINK_STROKE: &str = "rgba(102, 102, 102, 0.6)";
const NODE_FILL: &str = "rgba(220, 38, 38, 0.52)";
const NODE_STROKE: &str = "#961313";
const LABEL_FONT_FLOOR: f64 = 10.0;

/// Clear the canvas down to the background color.
pub fn render_empty(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);
	draw_help_text(ctx);
}

/// Draw one frame at the simulation's current positions.
pub fn render(state: &WordGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();

	draw_help_text(ctx);
	draw_tooltip(state, ctx);
}

fn draw_links(state: &WordGraphState, ctx: &CanvasRenderingContext2d) {
	let positions = state.positions();
	ctx.set_stroke_style_str(LINK_STROKE);
	for link in &state.links {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&link.source), positions.get(&link.target))
		else {
			continue;
		};
		ctx.set_line_width(link.thickness);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
}

fn draw_nodes(state: &WordGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;
		let radius = info.radius();

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill();
		ctx.set_stroke_style_str(NODE_STROKE);
		ctx.set_line_width(2.0);
		ctx.stroke();

		let font_size = (info.size / 3.0).max(LABEL_FONT_FLOOR);
		ctx.set_fill_style_str("white");
		ctx.set_font(&format!("{font_size}px Arial, sans-serif"));
		let _ = ctx.fill_text(&info.label, x, y);
	});
}

fn draw_help_text(ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("left");
	ctx.set_text_baseline("alphabetic");
	ctx.set_fill_style_str("#888");
	ctx.set_font("14px Arial, sans-serif");
	let _ = ctx.fill_text(
		"Use mouse wheel to zoom \u{2022} Click and drag to pan",
		10.0,
		25.0,
	);
}

/// Tooltip box next to the cursor, the canvas stand-in for SVG `<title>`.
fn draw_tooltip(state: &WordGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(text) = state.hover.tooltip.as_deref() else {
		return;
	};

	ctx.set_font("12px Arial, sans-serif");
	let text_width = ctx
		.measure_text(text)
		.map(|m| m.width())
		.unwrap_or(8.0 * text.len() as f64);
	let (pad, line_height) = (6.0, 16.0);
	let (box_w, box_h) = (text_width + 2.0 * pad, line_height + 2.0 * pad);

	// Keep the box on-canvas near the cursor.
	let x = (state.hover.cursor_x + 12.0).min(state.width - box_w - 2.0);
	let y = (state.hover.cursor_y + 12.0).min(state.height - box_h - 2.0);

	ctx.set_fill_style_str("rgba(0, 0, 0, 0.8)");
	ctx.fill_rect(x, y, box_w, box_h);
	ctx.set_stroke_style_str("#555");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, box_w, box_h);

	ctx.set_text_align("left");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str("white");
	let _ = ctx.fill_text(text, x + pad, y + box_h / 2.0);
}
