//! Wall boundary autotiling
//!
//! Every blocking cell picks one of thirteen boundary variants from the 3×3
//! window of level symbols around it: four straight edges, a fully enclosed
//! fill, four inner corners (each carrying a translucent shadow overlay),
//! and four outer corners, with a plain fill as the fallback for patterns a
//! well-formed level never produces.
//!
//! Classification reads the raw symbol grid, never built tiles, so the
//! result cannot depend on construction order. It runs once per blocking
//! cell at room build time and is cached in the tile for its lifetime.

use serde::{Deserialize, Serialize};

use super::level::{LevelMap, Symbol};

/// Corner of a tile, used to orient the shadow overlay under inner corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Boundary rendering variant for a blocking tile.
///
/// Edges are named for the room wall they form: a `TopEdge` tile sits in
/// the top wall with its open face looking down into the arena. Inner and
/// outer corners are named for the tile corner the boundary turns around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileVariant {
    LeftEdge,
    RightEdge,
    TopEdge,
    BottomEdge,
    /// Every neighbor solid; drawn as a featureless interior fill
    Enclosed,
    InnerTopLeft,
    InnerTopRight,
    InnerBottomLeft,
    InnerBottomRight,
    OuterTopLeft,
    OuterTopRight,
    OuterBottomLeft,
    OuterBottomRight,
    /// No rule matched. Must never happen with a well-formed level, but is
    /// drawn as a plain fill instead of failing.
    Fallback,
}

impl TileVariant {
    /// The corner a translucent shadow overlay should hug, for variants
    /// that carry one (inner corners only).
    pub fn shadow_corner(self) -> Option<Corner> {
        match self {
            TileVariant::InnerTopLeft => Some(Corner::TopLeft),
            TileVariant::InnerTopRight => Some(Corner::TopRight),
            TileVariant::InnerBottomLeft => Some(Corner::BottomLeft),
            TileVariant::InnerBottomRight => Some(Corner::BottomRight),
            _ => None,
        }
    }
}

/// Classify the blocking cell at `(cx, cy)` from its 3×3 symbol window.
///
/// Neighbors outside the grid count as solid, so border walls read as part
/// of a larger mass. Rules are ordered; the first match wins.
pub fn classify(map: &LevelMap, cx: i32, cy: i32) -> TileVariant {
    let solid =
        |dx: i32, dy: i32| map.symbol(cx + dx, cy + dy).is_none_or(Symbol::is_blocking);

    let n = solid(0, -1);
    let s = solid(0, 1);
    let w = solid(-1, 0);
    let e = solid(1, 0);
    let nw = solid(-1, -1);
    let ne = solid(1, -1);
    let sw = solid(-1, 1);
    let se = solid(1, 1);

    // Straight runs: one cardinal open, the opposite side and both laterals
    // solid.
    if w && n && s && !e {
        return TileVariant::LeftEdge;
    }
    if e && n && s && !w {
        return TileVariant::RightEdge;
    }
    if w && n && e && !s {
        return TileVariant::TopEdge;
    }
    if w && s && e && !n {
        return TileVariant::BottomEdge;
    }

    if n && s && w && e {
        if nw && ne && sw && se {
            return TileVariant::Enclosed;
        }
        // Inner corner: exactly one diagonal open.
        let open = [!ne, !se, !sw, !nw];
        if open.iter().filter(|&&o| o).count() == 1 {
            if !ne {
                return TileVariant::InnerTopRight;
            }
            if !se {
                return TileVariant::InnerBottomRight;
            }
            if !sw {
                return TileVariant::InnerBottomLeft;
            }
            return TileVariant::InnerTopLeft;
        }
        return TileVariant::Fallback;
    }

    // Outer corner: exactly two adjacent cardinals solid.
    match (n, w, s, e) {
        (true, false, false, true) => TileVariant::OuterBottomLeft,
        (false, false, true, true) => TileVariant::OuterTopLeft,
        (false, true, true, false) => TileVariant::OuterTopRight,
        (true, true, false, false) => TileVariant::OuterBottomRight,
        _ => TileVariant::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(text: &str) -> LevelMap {
        LevelMap::parse(text).unwrap()
    }

    #[test]
    fn border_walls_pick_straight_edges() {
        let m = map("XXXXX\nX...X\nX...X\nXXXXX\n");
        assert_eq!(classify(&m, 2, 0), TileVariant::TopEdge);
        assert_eq!(classify(&m, 2, 3), TileVariant::BottomEdge);
        assert_eq!(classify(&m, 0, 1), TileVariant::LeftEdge);
        assert_eq!(classify(&m, 4, 2), TileVariant::RightEdge);
    }

    #[test]
    fn border_corners_pick_inner_variants() {
        let m = map("XXXXX\nX...X\nX...X\nXXXXX\n");
        // Out-of-range neighbors count as solid, so the room corner only
        // sees one open diagonal: the interior.
        assert_eq!(classify(&m, 0, 0), TileVariant::InnerBottomRight);
        assert_eq!(classify(&m, 4, 0), TileVariant::InnerBottomLeft);
        assert_eq!(classify(&m, 0, 3), TileVariant::InnerTopRight);
        assert_eq!(classify(&m, 4, 3), TileVariant::InnerTopLeft);
    }

    #[test]
    fn free_standing_block_picks_outer_corners() {
        let m = map(".....\n.XX..\n.XX..\n.....\n");
        assert_eq!(classify(&m, 1, 1), TileVariant::OuterTopLeft);
        assert_eq!(classify(&m, 2, 1), TileVariant::OuterTopRight);
        assert_eq!(classify(&m, 1, 2), TileVariant::OuterBottomLeft);
        assert_eq!(classify(&m, 2, 2), TileVariant::OuterBottomRight);
    }

    #[test]
    fn surrounded_tile_is_enclosed() {
        let m = map("XXX\nXXX\nXXX\n");
        assert_eq!(classify(&m, 1, 1), TileVariant::Enclosed);
    }

    #[test]
    fn lone_wall_falls_back() {
        let m = map(".....\n..X..\n.....\n");
        assert_eq!(classify(&m, 2, 1), TileVariant::Fallback);
    }

    #[test]
    fn two_open_diagonals_fall_back() {
        // All cardinals solid but two diagonals open: no inner-corner rule.
        let m = map(".X.\nXXX\n.X.\n");
        assert_eq!(classify(&m, 1, 1), TileVariant::Fallback);
    }

    #[test]
    fn doors_read_as_solid_neighbors() {
        let m = map("XXDXX\nX...X\nXXXXX\n");
        // The wall beside the door still classifies as a straight top run.
        assert_eq!(classify(&m, 1, 0), TileVariant::TopEdge);
        assert_eq!(classify(&m, 2, 0), TileVariant::TopEdge);
    }

    #[test]
    fn classification_is_pure() {
        let m = map("XXXXX\nX...X\nXXXXX\n");
        let first = classify(&m, 0, 0);
        for _ in 0..4 {
            assert_eq!(classify(&m, 0, 0), first);
        }
    }

    #[test]
    fn only_inner_corners_carry_shadows() {
        assert_eq!(
            TileVariant::InnerTopRight.shadow_corner(),
            Some(Corner::TopRight)
        );
        assert_eq!(
            TileVariant::InnerBottomLeft.shadow_corner(),
            Some(Corner::BottomLeft)
        );
        assert_eq!(TileVariant::LeftEdge.shadow_corner(), None);
        assert_eq!(TileVariant::Enclosed.shadow_corner(), None);
        assert_eq!(TileVariant::OuterTopLeft.shadow_corner(), None);
    }
}
