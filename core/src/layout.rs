/// Column and tile-size policy. Small or square boards keep their column
/// count; larger boards give up a column on narrow portrait viewports so
/// tiles stay tappable, trading more rows for bigger targets.

pub const COLUMN_KEEP_MAX: u32 = 4;
pub const COLUMN_FLOOR: u32 = 3;
pub const WIDE_VIEWPORT_MIN_PX: u32 = 700;

pub const TILE_HEIGHT_DEFAULT_PX: u32 = 76;
pub const TILE_HEIGHT_SHORT_PX: u32 = 66;
pub const TILE_HEIGHT_NARROW_PX: u32 = 58;
pub const SHORT_VIEWPORT_MAX_PX: u32 = 720;
pub const NARROW_VIEWPORT_MAX_PX: u32 = 380;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub landscape: bool,
}

pub fn effective_columns(board_cols: u32, viewport: &Viewport) -> u32 {
    if board_cols <= COLUMN_KEEP_MAX {
        return board_cols;
    }
    if viewport.landscape || viewport.width >= WIDE_VIEWPORT_MIN_PX {
        return board_cols;
    }
    board_cols.saturating_sub(1).max(COLUMN_FLOOR)
}

pub fn tile_height_px(viewport: &Viewport) -> u32 {
    if viewport.width < NARROW_VIEWPORT_MAX_PX {
        TILE_HEIGHT_NARROW_PX
    } else if viewport.height < SHORT_VIEWPORT_MAX_PX {
        TILE_HEIGHT_SHORT_PX
    } else {
        TILE_HEIGHT_DEFAULT_PX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portrait_phone() -> Viewport {
        Viewport {
            width: 390,
            height: 844,
            landscape: false,
        }
    }

    #[test]
    fn small_boards_keep_their_columns() {
        assert_eq!(effective_columns(4, &portrait_phone()), 4);
        assert_eq!(effective_columns(3, &portrait_phone()), 3);
    }

    #[test]
    fn narrow_portrait_drops_one_column() {
        assert_eq!(effective_columns(6, &portrait_phone()), 5);
        assert_eq!(effective_columns(5, &portrait_phone()), 4);
    }

    #[test]
    fn column_floor_holds() {
        let mut viewport = portrait_phone();
        viewport.width = 320;
        for cols in 1..=12 {
            assert!(effective_columns(cols, &viewport) >= cols.min(COLUMN_FLOOR));
        }
    }

    #[test]
    fn wide_or_landscape_keeps_columns() {
        let wide = Viewport {
            width: 1280,
            height: 720,
            landscape: false,
        };
        assert_eq!(effective_columns(8, &wide), 8);
        let landscape = Viewport {
            width: 660,
            height: 380,
            landscape: true,
        };
        assert_eq!(effective_columns(8, &landscape), 8);
    }

    #[test]
    fn tile_height_scales_down() {
        assert_eq!(
            tile_height_px(&Viewport {
                width: 1280,
                height: 900,
                landscape: true,
            }),
            TILE_HEIGHT_DEFAULT_PX
        );
        // Tall phones stay at the default height; only short viewports shrink.
        assert_eq!(tile_height_px(&portrait_phone()), TILE_HEIGHT_DEFAULT_PX);
        assert_eq!(
            tile_height_px(&Viewport {
                width: 500,
                height: 640,
                landscape: false,
            }),
            TILE_HEIGHT_SHORT_PX
        );
        assert_eq!(
            tile_height_px(&Viewport {
                width: 360,
                height: 640,
                landscape: false,
            }),
            TILE_HEIGHT_NARROW_PX
        );
    }
}
