mod tests {
    use donation_light_composer::{
        bounds::{center_positions, max_radius, ring_positions, signed_index},
        color::{WHITE, fade_to_black_by, gray, scale_rgb},
        math8::{level8, map_range, scale8},
    };

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(0, 0, 3, 255, 100), 255);
        assert_eq!(map_range(1, 0, 2, 255, 100), 178);
        assert_eq!(map_range(2, 0, 3, 255, 100), 152);
        assert_eq!(map_range(2, 1, 3, 180, 30), 105);
        assert_eq!(map_range(3, 1, 3, 180, 30), 30);
    }

    #[test]
    fn test_map_range_degenerate_input() {
        assert_eq!(map_range(7, 1, 1, 180, 30), 180);
    }

    #[test]
    fn test_level8_clamps() {
        assert_eq!(level8(5, 0, 1, 255, 100, 50, 255), 50);
        assert_eq!(level8(-3, 0, 1, 255, 100, 50, 255), 255);
        assert_eq!(level8(1, 1, 1, 180, 30, 30, 180), 180);
    }

    #[test]
    fn test_color_scaling() {
        assert_eq!(scale_rgb(WHITE, 255), WHITE);
        assert_eq!(fade_to_black_by(WHITE, 200), gray(55));
        assert_eq!(fade_to_black_by(WHITE, 0), WHITE);
    }

    #[test]
    fn test_center_positions() {
        assert_eq!(center_positions(6), [Some(2), Some(3)]);
        assert_eq!(center_positions(5), [Some(2), None]);
        assert_eq!(center_positions(1), [Some(0), None]);
        assert_eq!(center_positions(0), [None, None]);
    }

    #[test]
    fn test_ring_positions_even() {
        assert_eq!(max_radius(6), 3);
        assert_eq!(ring_positions(6, 0), [Some(2), Some(3)]);
        assert_eq!(ring_positions(6, 2), [Some(0), Some(5)]);
        assert_eq!(ring_positions(6, 3), [None, None]);
    }

    #[test]
    fn test_ring_positions_odd() {
        assert_eq!(ring_positions(5, 0), [Some(2), None]);
        assert_eq!(ring_positions(5, 1), [Some(1), Some(3)]);
        assert_eq!(ring_positions(5, 2), [Some(0), Some(4)]);
    }

    #[test]
    fn test_signed_index() {
        assert_eq!(signed_index(6, -1), None);
        assert_eq!(signed_index(6, 0), Some(0));
        assert_eq!(signed_index(6, 5), Some(5));
        assert_eq!(signed_index(6, 6), None);
    }
}
