//! Skeleton overlay: small filled circles composited over the preview.

use crate::types::DepthPoint;

pub const MARKER_RADIUS: i32 = 3;
const MARKER_COLOR: u32 = 0x00FF_0000;

pub fn draw_markers(buffer: &mut [u32], width: u32, height: u32, markers: &[DepthPoint]) {
    for marker in markers {
        draw_circle(
            buffer,
            width,
            height,
            (marker.x as i32, marker.y as i32),
            MARKER_RADIUS,
            MARKER_COLOR,
        );
    }
}

fn draw_circle(
    buffer: &mut [u32],
    width: u32,
    height: u32,
    center: (i32, i32),
    radius: i32,
    color: u32,
) {
    let (cx, cy) = center;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_pixel_safe(buffer, width, height, cx + dx, cy + dy, color);
            }
        }
    }
}

fn put_pixel_safe(buffer: &mut [u32], width: u32, height: u32, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (ux, uy) = (x as u32, y as u32);
    if ux >= width || uy >= height {
        return;
    }
    let idx = (uy * width + ux) as usize;
    if idx < buffer.len() {
        buffer[idx] = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_paints_its_center_pixel() {
        let mut buffer = vec![0u32; 16 * 16];
        draw_markers(&mut buffer, 16, 16, &[DepthPoint { x: 8.0, y: 8.0 }]);
        assert_eq!(buffer[8 * 16 + 8], MARKER_COLOR);
    }

    #[test]
    fn markers_clip_at_the_image_edge() {
        let mut buffer = vec![0u32; 16 * 16];
        draw_markers(
            &mut buffer,
            16,
            16,
            &[
                DepthPoint { x: -40.0, y: 2.0 },
                DepthPoint { x: 0.0, y: 0.0 },
                DepthPoint { x: 300.0, y: 300.0 },
            ],
        );
        // The corner marker paints its in-bounds quarter and nothing wraps.
        assert_eq!(buffer[0], MARKER_COLOR);
        assert_eq!(buffer[16 * 16 - 1], 0);
    }
}
