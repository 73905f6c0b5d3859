//! Canvas 2D backend
//!
//! Executes a draw list on a `CanvasRenderingContext2d`. Sprites that are not
//! ready are replaced by their fallback shape; nothing here can fail a frame.

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::scene::{DrawCmd, Fallback, SpriteId, colors};
use crate::assets::Sprites;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::Rect;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn render(&self, cmds: &[DrawCmd], sprites: &Sprites) {
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear => {
                    self.ctx
                        .clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
                }
                DrawCmd::Background { scroll, fallback } => {
                    match sprites.ready(SpriteId::Background) {
                        Some(img) => self.draw_tiled(img, *scroll),
                        None => {
                            self.ctx.set_fill_style_str(fallback);
                            self.ctx
                                .fill_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
                        }
                    }
                }
                DrawCmd::FillRect { rect, color } => {
                    self.ctx.set_fill_style_str(color);
                    self.fill(rect);
                }
                DrawCmd::StrokeRect { rect, color, width } => {
                    self.ctx.set_stroke_style_str(color);
                    self.ctx.set_line_width(*width as f64);
                    self.ctx.stroke_rect(
                        rect.pos.x as f64,
                        rect.pos.y as f64,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    );
                }
                DrawCmd::Sprite {
                    sprite,
                    rect,
                    fallback,
                } => match sprites.ready(*sprite) {
                    Some(img) => self.draw_image(img, rect),
                    None => self.draw_fallback(rect, fallback),
                },
                DrawCmd::Coin { center, radius } => {
                    let (x, y, r) = (center.x as f64, center.y as f64, *radius as f64);
                    self.ctx.set_fill_style_str(colors::COIN_FILL);
                    self.ctx.begin_path();
                    self.ctx.arc(x, y, r, 0.0, TAU).ok();
                    self.ctx.fill();
                    self.ctx.set_stroke_style_str(colors::COIN_EDGE);
                    self.ctx.set_line_width(1.0);
                    self.ctx.stroke();
                    self.ctx.set_fill_style_str(colors::COIN_MARK);
                    self.ctx.set_font("10px Arial");
                    self.ctx.fill_text("$", x - 3.0, y + 4.0).ok();
                }
            }
        }
    }

    fn fill(&self, rect: &Rect) {
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn draw_image(&self, img: &HtmlImageElement, rect: &Rect) {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                img,
                rect.pos.x as f64,
                rect.pos.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            )
            .ok();
    }

    fn draw_fallback(&self, rect: &Rect, fallback: &Fallback) {
        match fallback {
            Fallback::Fill(color) => {
                self.ctx.set_fill_style_str(color);
                self.fill(rect);
            }
            Fallback::Wings(color) => {
                let (x, y) = (rect.pos.x as f64, rect.pos.y as f64);
                let (w, h) = (rect.size.x as f64, rect.size.y as f64);
                self.ctx.set_fill_style_str(color);
                self.ctx.begin_path();
                self.ctx.move_to(x, y);
                self.ctx.line_to(x + w / 2.0, y + h);
                self.ctx.line_to(x + w, y);
                self.ctx.fill();
            }
        }
    }

    /// Repeat the tile across the width, shifted by the scroll offset
    fn draw_tiled(&self, img: &HtmlImageElement, scroll: f64) {
        let tile_w = img.width() as f64;
        if tile_w <= 0.0 {
            return;
        }
        let offset = -scroll.rem_euclid(tile_w);
        let mut x = offset;
        while x < CANVAS_WIDTH as f64 {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    x,
                    0.0,
                    tile_w,
                    CANVAS_HEIGHT as f64,
                )
                .ok();
            x += tile_w;
        }
    }
}
