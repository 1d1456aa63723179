use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::grid::{CellPx, TILE_SIZE_PX};
use crate::app::sim::{ActorSprite, FrameSnapshot};

use super::{world_to_screen_px, Viewport, SCREEN_PX_PER_WORLD_PX};

const FNV1A_OFFSET_BASIS_64: u64 = 0xcbf2_9ce4_8422_2325;
const FNV1A_PRIME_64: u64 = 0x0000_0100_0000_01b3;

const GRID_LINE_COLOR: [u8; 4] = [0, 0, 0, 40];
const WALL_COLOR: [u8; 4] = [38, 34, 46, 255];
const PLAYER_BODY_COLOR: [u8; 4] = [222, 178, 62, 255];
const NPC_BODY_COLOR: [u8; 4] = [96, 134, 214, 255];
const FACING_NOTCH_COLOR: [u8; 4] = [24, 22, 28, 255];
const DIALOG_FILL_COLOR: [u8; 4] = [16, 16, 20, 255];
const DIALOG_STRIP_HEIGHT_PX: u32 = 72;
const DIALOG_BORDER_PX: i32 = 3;
const PAUSE_DIM_SHIFT: u8 = 1;

/// Placeholder renderer over a pixels framebuffer: layer washes, wall
/// silhouettes, facing-notched actor squares sorted by vertical
/// position, and a dialog strip while a text message waits for
/// acknowledgement. Sprite art is deliberately out of scope.
pub struct Renderer {
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: &'static Window) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(window, size.width, size.height)?;
        Ok(Self {
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn resize(&mut self, window: &'static Window, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(window, width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: &'static Window,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn render(&mut self, snapshot: &FrameSnapshot, paused: bool) -> Result<(), Error> {
        let viewport = self.viewport;
        if viewport.width == 0 || viewport.height == 0 {
            return Ok(());
        }
        let frame = self.pixels.frame_mut();

        let clear_color = layer_wash_color(&snapshot.lower_layer);
        for chunk in frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&clear_color);
        }

        draw_tile_grid(frame, viewport, snapshot.camera_px);
        for cell in &snapshot.wall_cells {
            draw_world_tile(frame, viewport, snapshot.camera_px, *cell, WALL_COLOR);
        }

        for sprite in sorted_draw_order(&snapshot.sprites) {
            draw_actor(frame, viewport, snapshot.camera_px, sprite);
        }

        if snapshot.dialog.is_some() {
            draw_dialog_strip(frame, viewport, layer_wash_color(&snapshot.upper_layer));
        }

        if paused {
            for byte in frame.iter_mut() {
                *byte >>= PAUSE_DIM_SHIFT;
            }
        }

        self.pixels.render()
    }
}

/// Ascending by `y_px`; stable, so equal rows keep insertion order.
fn sorted_draw_order(sprites: &[ActorSprite]) -> Vec<&ActorSprite> {
    let mut ordered: Vec<&ActorSprite> = sprites.iter().collect();
    ordered.sort_by_key(|sprite| sprite.y_px);
    ordered
}

fn draw_actor(frame: &mut [u8], viewport: Viewport, camera_px: (i32, i32), sprite: &ActorSprite) {
    let body = if sprite.is_player {
        PLAYER_BODY_COLOR
    } else {
        NPC_BODY_COLOR
    };
    fill_world_rect(
        frame,
        viewport,
        camera_px,
        (sprite.x_px + 1, sprite.y_px + 1),
        (TILE_SIZE_PX - 2, TILE_SIZE_PX - 2),
        body,
    );

    let notch = TILE_SIZE_PX / 4;
    let center = TILE_SIZE_PX / 2 - notch / 2;
    let (notch_x, notch_y) = match sprite.facing {
        crate::app::grid::Direction::Up => (sprite.x_px + center, sprite.y_px + 1),
        crate::app::grid::Direction::Down => {
            (sprite.x_px + center, sprite.y_px + TILE_SIZE_PX - 1 - notch)
        }
        crate::app::grid::Direction::Left => (sprite.x_px + 1, sprite.y_px + center),
        crate::app::grid::Direction::Right => {
            (sprite.x_px + TILE_SIZE_PX - 1 - notch, sprite.y_px + center)
        }
    };
    fill_world_rect(
        frame,
        viewport,
        camera_px,
        (notch_x, notch_y),
        (notch, notch),
        FACING_NOTCH_COLOR,
    );
}

fn draw_world_tile(
    frame: &mut [u8],
    viewport: Viewport,
    camera_px: (i32, i32),
    cell: CellPx,
    color: [u8; 4],
) {
    fill_world_rect(
        frame,
        viewport,
        camera_px,
        (cell.x, cell.y),
        (TILE_SIZE_PX, TILE_SIZE_PX),
        color,
    );
}

fn fill_world_rect(
    frame: &mut [u8],
    viewport: Viewport,
    camera_px: (i32, i32),
    origin_world_px: (i32, i32),
    size_world_px: (i32, i32),
    color: [u8; 4],
) {
    let (left, top) = world_to_screen_px(camera_px, viewport, origin_world_px);
    let right = left + size_world_px.0 * SCREEN_PX_PER_WORLD_PX;
    let bottom = top + size_world_px.1 * SCREEN_PX_PER_WORLD_PX;
    for y in top..bottom {
        for x in left..right {
            write_pixel_rgba_clipped(frame, viewport, x, y, color);
        }
    }
}

fn draw_tile_grid(frame: &mut [u8], viewport: Viewport, camera_px: (i32, i32)) {
    let half_w_world = viewport.width as i32 / (2 * SCREEN_PX_PER_WORLD_PX) + TILE_SIZE_PX;
    let half_h_world = viewport.height as i32 / (2 * SCREEN_PX_PER_WORLD_PX) + TILE_SIZE_PX;

    let first_col = (camera_px.0 - half_w_world).div_euclid(TILE_SIZE_PX);
    let last_col = (camera_px.0 + half_w_world).div_euclid(TILE_SIZE_PX);
    for col in first_col..=last_col {
        let (x, _) = world_to_screen_px(camera_px, viewport, (col * TILE_SIZE_PX, 0));
        draw_vertical_line_clipped(frame, viewport, x, GRID_LINE_COLOR);
    }

    let first_row = (camera_px.1 - half_h_world).div_euclid(TILE_SIZE_PX);
    let last_row = (camera_px.1 + half_h_world).div_euclid(TILE_SIZE_PX);
    for row in first_row..=last_row {
        let (_, y) = world_to_screen_px(camera_px, viewport, (0, row * TILE_SIZE_PX));
        draw_horizontal_line_clipped(frame, viewport, y, GRID_LINE_COLOR);
    }
}

fn draw_dialog_strip(frame: &mut [u8], viewport: Viewport, border_color: [u8; 4]) {
    let height = viewport.height as i32;
    let top = height - DIALOG_STRIP_HEIGHT_PX as i32;
    for y in top..height {
        for x in 0..viewport.width as i32 {
            let on_border = y - top < DIALOG_BORDER_PX || x < DIALOG_BORDER_PX
                || x >= viewport.width as i32 - DIALOG_BORDER_PX
                || y >= height - DIALOG_BORDER_PX;
            let color = if on_border {
                border_color
            } else {
                DIALOG_FILL_COLOR
            };
            write_pixel_rgba_clipped(frame, viewport, x, y, color);
        }
    }
}

fn draw_vertical_line_clipped(frame: &mut [u8], viewport: Viewport, x: i32, color: [u8; 4]) {
    if x < 0 || x >= viewport.width as i32 {
        return;
    }
    for y in 0..viewport.height as i32 {
        write_pixel_rgba_clipped(frame, viewport, x, y, color);
    }
}

fn draw_horizontal_line_clipped(frame: &mut [u8], viewport: Viewport, y: i32, color: [u8; 4]) {
    if y < 0 || y >= viewport.height as i32 {
        return;
    }
    for x in 0..viewport.width as i32 {
        write_pixel_rgba_clipped(frame, viewport, x, y, color);
    }
}

fn write_pixel_rgba_clipped(frame: &mut [u8], viewport: Viewport, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= viewport.width as i32 || y >= viewport.height as i32 {
        return;
    }
    let Some(pixel_offset) = (y as usize)
        .checked_mul(viewport.width as usize)
        .and_then(|row| row.checked_add(x as usize))
    else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    frame[byte_offset..end].copy_from_slice(&color);
}

/// Deterministic muted wash derived from a layer reference, so distinct
/// maps read differently without any asset loading.
fn layer_wash_color(layer_ref: &str) -> [u8; 4] {
    let mut hash = FNV1A_OFFSET_BASIS_64;
    for byte in layer_ref.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(FNV1A_PRIME_64);
    }
    let r = 40 + (hash & 0x3f) as u8;
    let g = 48 + ((hash >> 8) & 0x3f) as u8;
    let b = 40 + ((hash >> 16) & 0x3f) as u8;
    [r, g, b, 255]
}
