use crate::theme;
use crate::utils::*;
use core::f64::consts::TAU;
use sweeper_core::{Cell, Coord2, GameOutcome, Session};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// Size of each cell in pixels
pub(crate) const CELL_SIZE: u32 = 60;

/// Space under the grid for the status line
pub(crate) const STATUS_BAR_HEIGHT: u32 = 50;

const SIZE: f64 = CELL_SIZE as f64;

pub(crate) fn cell_origin((row, col): Coord2) -> (f64, f64) {
    (f64::from(col) * SIZE, f64::from(row) * SIZE)
}

/// Font size and vertical offset below the grid for the status line.
pub(crate) const fn status_layout(outcome: GameOutcome) -> (u32, u32) {
    match outcome {
        GameOutcome::Lost | GameOutcome::Won => (30, 10),
        GameOutcome::InProgress => (20, 15),
    }
}

/// Redraws the full frame: background, every cell, then the status line.
pub(crate) fn draw_session(
    ctx: &CanvasRenderingContext2d,
    session: &Session,
    boom_texture: Option<&HtmlImageElement>,
) -> anyhow::Result<()> {
    let board = session.board();
    let (rows, cols) = board.size();
    let width = f64::from(cols) * SIZE;
    let height = f64::from(rows) * SIZE + f64::from(STATUS_BAR_HEIGHT);

    ctx.set_fill_style_str(theme::BACKGROUND);
    ctx.fill_rect(0., 0., width, height);
    ctx.set_text_baseline("top");

    for (coords, cell) in board.iter_cells() {
        draw_cell(ctx, coords, cell, boom_texture)?;
    }

    draw_status(ctx, session)
}

fn draw_cell(
    ctx: &CanvasRenderingContext2d,
    coords: Coord2,
    cell: Cell,
    boom_texture: Option<&HtmlImageElement>,
) -> anyhow::Result<()> {
    let (x, y) = cell_origin(coords);
    let (center_x, center_y) = (x + SIZE / 2., y + SIZE / 2.);

    ctx.set_fill_style_str(theme::cell_fill(coords, cell.revealed));
    ctx.fill_rect(x, y, SIZE, SIZE);

    if cell.is_hidden() {
        ctx.set_stroke_style_str(theme::GRID_LINE);
        ctx.set_line_width(1.);
        ctx.stroke_rect(x + 0.5, y + 0.5, SIZE - 1., SIZE - 1.);

        if cell.flagged {
            ctx.set_fill_style_str(theme::FLAG);
            ctx.begin_path();
            ctx.move_to(center_x - 8., center_y + 8.);
            ctx.line_to(center_x - 8., center_y - 12.);
            ctx.line_to(center_x + 8., center_y - 2.);
            ctx.close_path();
            ctx.fill();
        }
        return Ok(());
    }

    if cell.has_mine {
        match boom_texture.filter(|image| image.complete() && image.natural_width() > 0) {
            Some(image) => ctx
                .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, SIZE, SIZE)
                .js_context("draw_image")?,
            None => {
                ctx.set_fill_style_str(theme::MINE_FALLBACK);
                ctx.begin_path();
                ctx.arc(center_x, center_y, SIZE / 4., 0., TAU)
                    .js_context("arc")?;
                ctx.fill();
            }
        }
    } else if cell.adjacent_mine_count > 0 {
        ctx.set_fill_style_str(theme::NUMBER);
        ctx.set_font("25px sans-serif");
        ctx.fill_text(
            &cell.adjacent_mine_count.to_string(),
            center_x - 8.,
            center_y - 12.,
        )
        .js_context("fill_text")?;
    }

    Ok(())
}

fn draw_status(ctx: &CanvasRenderingContext2d, session: &Session) -> anyhow::Result<()> {
    let outcome = session.outcome();
    let (font_size, offset) = status_layout(outcome);
    let grid_bottom = f64::from(session.board().rows()) * SIZE;

    ctx.set_fill_style_str(theme::status_color(outcome));
    ctx.set_font(&format!("{}px sans-serif", font_size));
    ctx.fill_text(session.status_line(), 10., grid_bottom + f64::from(offset))
        .js_context("fill_text")
}
