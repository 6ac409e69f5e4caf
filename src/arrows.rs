use serde::Serialize;

use crate::pagination::{Pagination, ScrollTrack};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Page an arrow in this direction leads to, if there is one.
    pub fn target(self, current: usize, total_pages: usize) -> Option<usize> {
        match self {
            Direction::Left => current.checked_sub(1),
            Direction::Right => Some(current + 1).filter(|p| *p < total_pages),
        }
    }
}

/// Which arrows are shown. Hidden arrows are removed from view, not disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArrowVisibility {
    pub show_left: bool,
    pub show_right: bool,
}

impl ArrowVisibility {
    pub const HIDDEN: Self = Self { show_left: false, show_right: false };
}

pub fn visible_arrow_state(page: usize, total_pages: usize) -> ArrowVisibility {
    if total_pages <= 1 {
        return ArrowVisibility::HIDDEN;
    }
    ArrowVisibility { show_left: page > 0, show_right: page < total_pages - 1 }
}

impl Pagination {
    /// Step one page in `dir`. At either end this is a no-op and returns `None`.
    pub fn arrow_clicked<T: ScrollTrack + ?Sized>(&mut self, dir: Direction, track: &mut T) -> Option<usize> {
        let target = dir.target(self.current_page(), self.total_pages())?;
        Some(self.go_to_page(target, track))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_rules() {
        assert_eq!(visible_arrow_state(0, 1), ArrowVisibility::HIDDEN);
        assert_eq!(visible_arrow_state(0, 0), ArrowVisibility::HIDDEN);
        assert_eq!(visible_arrow_state(0, 3), ArrowVisibility { show_left: false, show_right: true });
        assert_eq!(visible_arrow_state(1, 3), ArrowVisibility { show_left: true, show_right: true });
        assert_eq!(visible_arrow_state(2, 3), ArrowVisibility { show_left: true, show_right: false });
    }

    #[test]
    fn targets_stop_at_edges() {
        assert_eq!(Direction::Left.target(0, 3), None);
        assert_eq!(Direction::Left.target(2, 3), Some(1));
        assert_eq!(Direction::Right.target(2, 3), None);
        assert_eq!(Direction::Right.target(0, 3), Some(1));
        assert_eq!(Direction::Right.target(0, 1), None);
    }
}
