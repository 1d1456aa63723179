mod renderer;

pub use renderer::Renderer;

/// Integer upscale from world pixels to screen pixels.
pub const SCREEN_PX_PER_WORLD_PX: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Maps a world pixel to a screen pixel with the camera anchor at the
/// viewport center.
pub fn world_to_screen_px(
    camera_px: (i32, i32),
    viewport: Viewport,
    world_px: (i32, i32),
) -> (i32, i32) {
    let half_w = viewport.width as i32 / 2;
    let half_h = viewport.height as i32 / 2;
    (
        (world_px.0 - camera_px.0) * SCREEN_PX_PER_WORLD_PX + half_w,
        (world_px.1 - camera_px.1) * SCREEN_PX_PER_WORLD_PX + half_h,
    )
}
