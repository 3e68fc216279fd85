//! Point interaction states and the store that tracks them.

use bitflags::bitflags;
use ordinate_core::alloc::HashMap;

/// Interaction mode a point is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum PointState {
    #[default]
    Normal,
    Hover,
    Select,
}

impl PointState {
    pub const ALL: [PointState; 3] = [PointState::Normal, PointState::Hover, PointState::Select];

    /// Drawing state for a set of flags. Selection wins over hover.
    pub fn from_flags(flags: PointStates) -> Self {
        if flags.contains(PointStates::SELECT) {
            PointState::Select
        } else if flags.contains(PointStates::HOVER) {
            PointState::Hover
        } else {
            PointState::Normal
        }
    }

    /// Flag for this state; empty for [`Normal`](Self::Normal).
    pub fn flag(self) -> PointStates {
        match self {
            PointState::Normal => PointStates::empty(),
            PointState::Hover => PointStates::HOVER,
            PointState::Select => PointStates::SELECT,
        }
    }
}

bitflags! {
    /// States a single point can be in at once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PointStates: u8 {
        const HOVER  = 1 << 0;
        const SELECT = 1 << 1;
    }
}

/// Per-series store of point states, owned by the chart.
#[derive(Debug, Clone, Default)]
pub struct InteractivityState {
    points: HashMap<usize, PointStates>,
}

impl InteractivityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `state` to a point. Returns true if it changed.
    pub fn add(&mut self, index: usize, state: PointState) -> bool {
        let flag = state.flag();
        if flag.is_empty() {
            return false;
        }
        let entry = self.points.entry(index).or_default();
        let changed = !entry.contains(flag);
        entry.insert(flag);
        changed
    }

    /// Remove `state` from a point. Returns true if it changed.
    pub fn remove(&mut self, index: usize, state: PointState) -> bool {
        let flag = state.flag();
        let Some(entry) = self.points.get_mut(&index) else {
            return false;
        };
        let changed = entry.intersects(flag);
        entry.remove(flag);
        if entry.is_empty() {
            self.points.remove(&index);
        }
        changed
    }

    /// Remove `state` from every point, returning the indices that changed.
    pub fn remove_all(&mut self, state: PointState) -> Vec<usize> {
        let mut changed: Vec<usize> = self
            .points
            .iter()
            .filter(|(_, flags)| flags.intersects(state.flag()))
            .map(|(i, _)| *i)
            .collect();
        changed.sort_unstable();
        for index in &changed {
            self.remove(*index, state);
        }
        changed
    }

    /// Returns true if the point is in `state`. Every point is in `Normal`.
    pub fn has_point_state(&self, state: PointState, index: usize) -> bool {
        match state {
            PointState::Normal => true,
            _ => self
                .points
                .get(&index)
                .is_some_and(|flags| flags.contains(state.flag())),
        }
    }

    /// State a point is drawn in.
    pub fn point_state(&self, index: usize) -> PointState {
        PointState::from_flags(self.points.get(&index).copied().unwrap_or_default())
    }

    /// State a continuous series is drawn in: the strongest state of any point.
    pub fn series_state(&self) -> PointState {
        self.points
            .values()
            .map(|flags| PointState::from_flags(*flags))
            .max()
            .unwrap_or_default()
    }

    /// Drop states of points at or past `row_count`.
    pub fn retain_rows(&mut self, row_count: usize) {
        self.points.retain(|index, _| *index < row_count);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points with any state, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, PointStates)> + '_ {
        self.points.iter().map(|(index, flags)| (*index, *flags))
    }

    /// Replace every state of a point.
    pub fn set_flags(&mut self, index: usize, flags: PointStates) {
        if flags.is_empty() {
            self.points.remove(&index);
        } else {
            self.points.insert(index, flags);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_wins_over_hover() {
        assert_eq!(
            PointState::from_flags(PointStates::HOVER | PointStates::SELECT),
            PointState::Select
        );
        assert_eq!(PointState::from_flags(PointStates::empty()), PointState::Normal);
    }

    #[test]
    fn test_add_remove() {
        let mut states = InteractivityState::new();
        assert!(states.add(3, PointState::Hover));
        assert!(!states.add(3, PointState::Hover));
        assert!(states.has_point_state(PointState::Hover, 3));
        assert!(!states.has_point_state(PointState::Select, 3));
        assert!(states.has_point_state(PointState::Normal, 7));

        assert!(states.remove(3, PointState::Hover));
        assert!(!states.remove(3, PointState::Hover));
        assert!(states.is_empty());
    }

    #[test]
    fn test_series_state() {
        let mut states = InteractivityState::new();
        assert_eq!(states.series_state(), PointState::Normal);
        states.add(1, PointState::Hover);
        assert_eq!(states.series_state(), PointState::Hover);
        states.add(4, PointState::Select);
        assert_eq!(states.series_state(), PointState::Select);
        assert_eq!(states.point_state(1), PointState::Hover);
    }

    #[test]
    fn test_remove_all() {
        let mut states = InteractivityState::new();
        states.add(5, PointState::Hover);
        states.add(2, PointState::Hover);
        states.add(2, PointState::Select);
        assert_eq!(states.remove_all(PointState::Hover), vec![2, 5]);
        assert_eq!(states.point_state(2), PointState::Select);
    }

    #[test]
    fn test_retain_rows() {
        let mut states = InteractivityState::new();
        states.add(0, PointState::Select);
        states.add(9, PointState::Select);
        states.retain_rows(5);
        assert!(states.has_point_state(PointState::Select, 0));
        assert!(!states.has_point_state(PointState::Select, 9));
    }
}
