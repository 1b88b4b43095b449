//! Rendering: the observable scene and how it is drawn to a 2D context.
//!
//! [`Scene`] is the read-only view the surface renders from. It resolves
//! image file names to asset URLs, so hosts that draw with DOM elements can
//! use it directly (it serializes to JSON). [`draw`] is the canvas fallback
//! and the only place that touches [`web_sys::CanvasRenderingContext2d`].
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::AssetDirs;
use crate::reagent::ReagentShelf;
use crate::session::LabSession;
use crate::tokens::TokenId;

/// Caption of the outcome panel button that clears the bench.
pub const RESET_CAPTION: &str = "reset experiment";

/// Caption of the outcome panel button that only hides the panel.
pub const DISMISS_CAPTION: &str = "keep experimenting";

const WORKSPACE_DASH_PX: f64 = 6.0;
const WORKSPACE_STROKE: &str = "#9CA3AF";
const TOKEN_FILL: &str = "#FFFFFF";
const TOKEN_STROKE: &str = "#1F1A17";
const TEXT_FILL: &str = "#1F1A17";
const PANEL_FILL: &str = "rgba(255, 255, 255, 0.92)";
const PANEL_HEIGHT: f64 = 96.0;
const PANEL_MARGIN: f64 = 16.0;

// =============================================================
// Scene
// =============================================================

/// A shelf button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfItem {
    pub name: String,
    pub image_src: String,
}

/// A token as drawn: top-left corner plus edge length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenView {
    pub id: TokenId,
    pub reagent: String,
    pub image_src: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// The outcome panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeView {
    pub text: String,
    pub image_src: Option<String>,
}

/// Everything the surface needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub shelf: Vec<ShelfItem>,
    pub tokens: Vec<TokenView>,
    pub outcome: Option<OutcomeView>,
}

impl Scene {
    /// Snapshot the shelf and the session, resolving asset paths.
    #[must_use]
    pub fn build(shelf: &ReagentShelf, session: &LabSession) -> Self {
        let config = session.config();
        let assets = &config.assets;
        Self {
            shelf: shelf
                .iter()
                .map(|r| ShelfItem { name: r.name.clone(), image_src: reagent_src(assets, &r.image) })
                .collect(),
            tokens: session
                .tokens()
                .map(|t| TokenView {
                    id: t.id,
                    reagent: t.reagent.clone(),
                    image_src: reagent_src(assets, &t.image),
                    x: t.x,
                    y: t.y,
                    size: config.token_size,
                })
                .collect(),
            outcome: session.outcome().map(|o| OutcomeView {
                text: o.text.clone(),
                image_src: o.image.as_deref().map(|img| result_src(assets, img)),
            }),
        }
    }
}

/// URL of a reagent image.
#[must_use]
pub fn reagent_src(assets: &AssetDirs, image: &str) -> String {
    format!("{}/{image}", assets.reagent_dir)
}

/// URL of a reaction result image.
#[must_use]
pub fn result_src(assets: &AssetDirs, image: &str) -> String {
    format!("{}/{image}", assets.result_dir)
}

// =============================================================
// Canvas drawing
// =============================================================

/// Draw the bench: dashed workspace border, tokens in insertion order, then
/// the outcome panel on top.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene, width: f64, height: f64) -> Result<(), JsValue> {
    ctx.clear_rect(0.0, 0.0, width, height);
    draw_workspace(ctx, width, height)?;

    for token in &scene.tokens {
        draw_token(ctx, token)?;
    }

    if let Some(outcome) = &scene.outcome {
        draw_outcome(ctx, outcome, width, height)?;
    }
    Ok(())
}

fn draw_workspace(ctx: &CanvasRenderingContext2d, width: f64, height: f64) -> Result<(), JsValue> {
    ctx.save();
    let dash = js_sys::Array::of2(&JsValue::from_f64(WORKSPACE_DASH_PX), &JsValue::from_f64(WORKSPACE_DASH_PX));
    ctx.set_line_dash(&dash)?;
    ctx.set_stroke_style_str(WORKSPACE_STROKE);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(0.5, 0.5, width - 1.0, height - 1.0);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

fn draw_token(ctx: &CanvasRenderingContext2d, token: &TokenView) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str(TOKEN_FILL);
    ctx.fill_rect(token.x, token.y, token.size, token.size);
    ctx.set_stroke_style_str(TOKEN_STROKE);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(token.x, token.y, token.size, token.size);

    ctx.set_fill_style_str(TEXT_FILL);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let font_size = (token.size * 0.2).clamp(10.0, 16.0);
    ctx.set_font(&format!("bold {font_size:.0}px sans-serif"));
    let half = token.size / 2.0;
    ctx.fill_text(&token.reagent, token.x + half, token.y + half)?;
    ctx.restore();
    Ok(())
}

fn draw_outcome(ctx: &CanvasRenderingContext2d, outcome: &OutcomeView, width: f64, height: f64) -> Result<(), JsValue> {
    ctx.save();
    let top = height - PANEL_HEIGHT - PANEL_MARGIN;
    ctx.set_fill_style_str(PANEL_FILL);
    ctx.fill_rect(PANEL_MARGIN, top, width - 2.0 * PANEL_MARGIN, PANEL_HEIGHT);

    let cx = width / 2.0;
    ctx.set_fill_style_str(TEXT_FILL);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font("bold 18px sans-serif");
    ctx.fill_text(&outcome.text, cx, top + PANEL_HEIGHT * 0.3)?;

    ctx.set_font("14px sans-serif");
    ctx.fill_text(&format!("[ {RESET_CAPTION} ]    [ {DISMISS_CAPTION} ]"), cx, top + PANEL_HEIGHT * 0.72)?;
    ctx.restore();
    Ok(())
}
