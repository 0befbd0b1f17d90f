use glam::DVec2;

use super::point::MAX_ZOOM_LEVEL;

/// Size of one tile at `zoom_base`, measured in 31-bit tile coordinates
pub fn tile_size_31(zoom_base: u32) -> i32 {
    if zoom_base >= MAX_ZOOM_LEVEL {
        1
    } else {
        ((1u32 << (MAX_ZOOM_LEVEL - zoom_base)) - 1) as i32
    }
}

/// Tile units per screen pixel. Degenerate tile sizes scale to zero.
fn scale_31(zoom_base: u32, tile_size_on_screen: f32) -> f64 {
    if !(tile_size_on_screen > f32::EPSILON) {
        return 0.0;
    }
    f64::from(tile_size_31(zoom_base)) / f64::from(tile_size_on_screen)
}

/// Convert a screen-space pixel displacement into a tile-coordinate displacement.
///
/// The drag vector is rotated by the camera azimuth before scaling, so dragging
/// "up" moves the target visually upward whatever the current yaw is. Results
/// wrap on overflow; the renderer wraps the target axes itself.
pub fn screen_delta_to_tile_delta(
    dx: i32,
    dy: i32,
    azimuth_degrees: f32,
    zoom_base: u32,
    tile_size_on_screen: f32,
) -> (i32, i32) {
    let rotation = DVec2::from_angle(f64::from(azimuth_degrees).to_radians());
    let rotated = rotation.rotate(DVec2::new(f64::from(dx), f64::from(dy)));
    let tile = (rotated * scale_31(zoom_base, tile_size_on_screen)).round();

    (tile.x as i64 as i32, tile.y as i64 as i32)
}

/// Inverse of [`screen_delta_to_tile_delta`], kept in floating point.
///
/// Used to place tiles on screen relative to the viewport center.
pub fn tile_delta_to_screen_delta(
    tile_dx: f64,
    tile_dy: f64,
    azimuth_degrees: f32,
    zoom_base: u32,
    tile_size_on_screen: f32,
) -> (f64, f64) {
    let scale = scale_31(zoom_base, tile_size_on_screen);
    if scale == 0.0 {
        return (0.0, 0.0);
    }
    let rotation = DVec2::from_angle(-f64::from(azimuth_degrees).to_radians());
    let screen = rotation.rotate(DVec2::new(tile_dx, tile_dy) / scale);
    (screen.x, screen.y)
}

/// Keyboard pan step: one whole tile at the integer part of `requested_zoom`
pub fn pan_step_31(requested_zoom: f32) -> i64 {
    let zoom = requested_zoom.floor().clamp(0.0, MAX_ZOOM_LEVEL as f32) as u32;
    1i64 << (MAX_ZOOM_LEVEL - zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tile_size_31_at_extremes() {
        assert_eq!(tile_size_31(31), 1);
        assert_eq!(tile_size_31(0), i32::MAX);
        assert_eq!(tile_size_31(12), (1 << 19) - 1);
    }

    #[test]
    fn test_zero_delta_is_zero() {
        for azimuth in [0.0, 33.3, 90.0, 180.0, -270.5] {
            for zoom in [0, 5, 12, 31] {
                assert_eq!(screen_delta_to_tile_delta(0, 0, azimuth, zoom, 256.0), (0, 0));
            }
        }
    }

    #[test]
    fn test_no_cross_axis_leak_at_zero_azimuth() {
        let (tx, ty) = screen_delta_to_tile_delta(100, 0, 0.0, 12, 256.0);
        assert_ne!(tx, 0);
        assert_eq!(ty, 0);

        let (tx, ty) = screen_delta_to_tile_delta(0, -40, 0.0, 12, 256.0);
        assert_eq!(tx, 0);
        assert_ne!(ty, 0);
    }

    #[test]
    fn test_scale_matches_tile_size() {
        // One full on-screen tile of drag covers one tile in 31-bit space
        let (tx, ty) = screen_delta_to_tile_delta(256, 0, 0.0, 12, 256.0);
        assert_eq!(tx, tile_size_31(12));
        assert_eq!(ty, 0);
    }

    #[test]
    fn test_quarter_turn_rotates_axes() {
        let (tx, ty) = screen_delta_to_tile_delta(256, 0, 90.0, 12, 256.0);
        assert_eq!(tx, 0);
        assert_eq!(ty, tile_size_31(12));
    }

    #[test]
    fn test_degenerate_tile_size_means_no_movement() {
        assert_eq!(screen_delta_to_tile_delta(50, 50, 10.0, 12, 0.0), (0, 0));
        assert_eq!(screen_delta_to_tile_delta(50, 50, 10.0, 12, 1e-12), (0, 0));
        assert_eq!(screen_delta_to_tile_delta(50, 50, 10.0, 12, f32::NAN), (0, 0));
    }

    #[test]
    fn test_opposite_deltas_cancel() {
        for azimuth in [0.0f32, 12.5, 69.4, 137.6, 300.0] {
            let forward = screen_delta_to_tile_delta(37, -91, azimuth, 14, 301.7);
            let back = screen_delta_to_tile_delta(-37, 91, azimuth, 14, 301.7);
            assert_eq!(forward.0, -back.0);
            assert_eq!(forward.1, -back.1);
        }
    }

    #[test]
    fn test_screen_round_trip() {
        let (tx, ty) = screen_delta_to_tile_delta(120, 45, 30.0, 10, 256.0);
        let (sx, sy) = tile_delta_to_screen_delta(tx as f64, ty as f64, 30.0, 10, 256.0);
        assert_relative_eq!(sx, 120.0, epsilon = 1e-3);
        assert_relative_eq!(sy, 45.0, epsilon = 1e-3);
    }

    #[test]
    fn test_pan_step_uses_integer_zoom() {
        assert_eq!(pan_step_31(12.0), 1 << 19);
        assert_eq!(pan_step_31(12.99), 1 << 19);
        assert_eq!(pan_step_31(0.5), 1i64 << 31);
        assert_eq!(pan_step_31(31.0), 1);
    }
}
