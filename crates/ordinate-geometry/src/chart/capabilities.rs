//! Drawer capability flags and the closed set of drawer types.

use bitflags::bitflags;

bitflags! {
    /// Generic behaviours a drawer type opts into. Fixed per type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DrawerCapabilities: u16 {
        /// A zero baseline must be resolved before drawing.
        const NEEDS_ZERO                  = 1 << 0;
        /// Points carry a size resolved through a size scale.
        const NEEDS_SIZE_SCALE            = 1 << 1;
        /// Shapes attach to the series root layer directly.
        const USES_CONTAINER_AS_ROOT      = 1 << 2;
        /// Missing points may be bridged when `connect_missing` is on.
        const SUPPORTS_CONNECTING_MISSING = 1 << 3;
        const SUPPORTS_STACK              = 1 << 4;
        const SUPPORTS_COMPARISON         = 1 << 5;
        const SUPPORTS_ERROR              = 1 << 6;
        /// Every point gets its own shapes group.
        const IS_DISCRETE_BASED           = 1 << 7;
        /// Point width comes from the category band.
        const IS_WIDTH_BASED              = 1 << 8;
        const IS_MARKER_BASED             = 1 << 9;
        const IS_LINE_BASED               = 1 << 10;
        /// Points have `high`/`low` values instead of a single value.
        const IS_RANGE_BASED              = 1 << 11;
        const SUPPORTS_STEP_DIRECTION     = 1 << 12;
    }
}

impl DrawerCapabilities {
    #[inline]
    pub fn is_discrete(&self) -> bool {
        self.contains(Self::IS_DISCRETE_BASED)
    }

    #[inline]
    pub fn needs_zero(&self) -> bool {
        self.contains(Self::NEEDS_ZERO)
    }

    #[inline]
    pub fn is_width_based(&self) -> bool {
        self.contains(Self::IS_WIDTH_BASED)
    }

    #[inline]
    pub fn is_range_based(&self) -> bool {
        self.contains(Self::IS_RANGE_BASED)
    }

    #[inline]
    pub fn supports_stack(&self) -> bool {
        self.contains(Self::SUPPORTS_STACK)
    }

    #[inline]
    pub fn can_connect_missing(&self) -> bool {
        self.contains(Self::SUPPORTS_CONNECTING_MISSING)
    }
}

/// Every drawer the engine ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawerType {
    Column,
    /// Column drawn with swapped axes.
    Bar,
    RangeColumn,
    Line,
    StepLine,
    Spline,
    Area,
    StepArea,
    RangeArea,
    Bubble,
    Marker,
}

impl DrawerType {
    pub const ALL: [DrawerType; 11] = [
        DrawerType::Column,
        DrawerType::Bar,
        DrawerType::RangeColumn,
        DrawerType::Line,
        DrawerType::StepLine,
        DrawerType::Spline,
        DrawerType::Area,
        DrawerType::StepArea,
        DrawerType::RangeArea,
        DrawerType::Bubble,
        DrawerType::Marker,
    ];

    /// Returns true for types drawn with the category axis vertical.
    pub fn is_vertical(self) -> bool {
        matches!(self, DrawerType::Bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let caps = DrawerCapabilities::IS_DISCRETE_BASED | DrawerCapabilities::NEEDS_ZERO;
        assert!(caps.is_discrete());
        assert!(caps.needs_zero());
        assert!(!caps.is_width_based());
        assert!(!caps.can_connect_missing());
    }

    #[test]
    fn test_only_bar_is_vertical() {
        let vertical: Vec<_> = DrawerType::ALL.iter().filter(|t| t.is_vertical()).collect();
        assert_eq!(vertical, vec![&DrawerType::Bar]);
    }
}
