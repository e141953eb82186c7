//! Cosmetic color constants for animation hosts.
//!
//! The searchers report progress through [`SearchEvent`]s carrying palette
//! indices; a host that wants the legacy look maps them through
//! [`event_color`]. Nothing here affects correctness or termination.

use gridsearch_core::MAX_REACHED_COUNT;

use crate::context::SearchEvent;

/// Color shown when a cell joins the frontier (legacy yellow).
pub const FRONTIER_COLOR: u32 = 0xFFFF_FF00;

/// Color shown when a cell is expanded (legacy light green).
pub const EXPANDED_COLOR: u32 = 0xFF9D_FF1A;

/// Color shown for cells along the reconstructed path (legacy green).
pub const PATH_COLOR: u32 = 0xFF00_FF00;

/// The five-entry "seen again" palette rotated through when a searcher
/// revisits an already-closed cell. A cell's revisit marker indexes into
/// this array and never exceeds its last entry.
pub const SEEN_AGAIN_PALETTE: [u32; 5] = [
    0xFFF5_0BFF, // magenta
    0xFF50_F2FF, // cyan
    0xFFFF_9004, // orange
    0xFFFF_3D92, // pink
    0xFF9F_02FF, // purple
];

/// The packed-ARGB color the legacy animation paints for `event`.
pub fn event_color(event: &SearchEvent) -> u32 {
    match event {
        SearchEvent::Discovered { .. } => FRONTIER_COLOR,
        SearchEvent::Expanded { .. } => EXPANDED_COLOR,
        SearchEvent::Revisited { marker, .. } => {
            SEEN_AGAIN_PALETTE[(*marker).min(MAX_REACHED_COUNT) as usize]
        }
        SearchEvent::PathTraced { .. } => PATH_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsearch_core::Point;

    #[test]
    fn every_marker_index_has_a_palette_entry() {
        assert_eq!(SEEN_AGAIN_PALETTE.len(), MAX_REACHED_COUNT as usize + 1);
    }

    #[test]
    fn every_event_kind_maps_to_a_legacy_color() {
        let pos = Point::new(1, 1);
        assert_eq!(event_color(&SearchEvent::Discovered { pos }), FRONTIER_COLOR);
        assert_eq!(event_color(&SearchEvent::Expanded { pos }), EXPANDED_COLOR);
        assert_eq!(event_color(&SearchEvent::PathTraced { pos }), PATH_COLOR);
        for marker in 0..=MAX_REACHED_COUNT {
            assert_eq!(
                event_color(&SearchEvent::Revisited { pos, marker }),
                SEEN_AGAIN_PALETTE[marker as usize]
            );
        }
    }
}
