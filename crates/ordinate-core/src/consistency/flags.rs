//! Consistency state and signal bit sets.

use bitflags::bitflags;

bitflags! {
    /// Aspects of a visual object that are stale and must be recomputed
    /// by the next draw pass.
    ///
    /// A freshly drawn object has no bits set. Mutators OR bits in through
    /// `invalidate`, and the draw pass clears each bit once it has handled
    /// the matching aspect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConsistencyState: u32 {
        /// Enabled/disabled toggle changed.
        const ENABLED              = 1 << 0;
        /// The parent layer the object renders into changed.
        const CONTAINER            = 1 << 1;
        /// Z order changed.
        const Z_INDEX              = 1 << 2;
        /// Fill, stroke or other paint settings changed.
        const APPEARANCE           = 1 << 3;
        /// Pixel bounds changed.
        const BOUNDS               = 1 << 4;
        /// Underlying data changed.
        const DATA                 = 1 << 6;

        // Series draw pass (bits 8-16)

        /// Point geometry must be rebuilt.
        const SERIES_POINTS        = 1 << 8;
        /// Point labels must be repositioned.
        const SERIES_LABELS        = 1 << 9;
        /// Point markers must be repositioned.
        const SERIES_MARKERS       = 1 << 10;
        /// Clip rectangle changed.
        const SERIES_CLIP          = 1 << 11;
        /// Colours changed without a geometry change.
        const SERIES_COLOR         = 1 << 12;
        /// The shape configuration changed and the shapes manager must be recreated.
        const SERIES_SHAPE_MANAGER = 1 << 13;
        /// Data view changed and the point metadata cache is stale.
        const SERIES_DATA          = 1 << 14;
        /// Stacking baselines must be recomputed.
        const SERIES_STACK         = 1 << 15;

        /// Hatch fill pattern changed.
        const HATCH_FILL           = 1 << 30;
    }
}

impl ConsistencyState {
    /// States every visual element supports.
    pub const VISUAL_GROUP: Self = Self::ENABLED
        .union(Self::CONTAINER)
        .union(Self::Z_INDEX)
        .union(Self::APPEARANCE)
        .union(Self::BOUNDS);

    /// States a series supports on top of [`Self::VISUAL_GROUP`].
    pub const SERIES_GROUP: Self = Self::VISUAL_GROUP
        .union(Self::DATA)
        .union(Self::HATCH_FILL)
        .union(Self::SERIES_POINTS)
        .union(Self::SERIES_LABELS)
        .union(Self::SERIES_MARKERS)
        .union(Self::SERIES_CLIP)
        .union(Self::SERIES_COLOR)
        .union(Self::SERIES_SHAPE_MANAGER)
        .union(Self::SERIES_DATA)
        .union(Self::SERIES_STACK);

    /// States that force the point geometry to be rebuilt from scratch.
    pub const REBUILD_GROUP: Self = Self::SERIES_POINTS
        .union(Self::CONTAINER)
        .union(Self::BOUNDS)
        .union(Self::SERIES_DATA)
        .union(Self::SERIES_STACK)
        .union(Self::SERIES_SHAPE_MANAGER)
        .union(Self::ENABLED);

    /// Returns true if the point geometry must be rebuilt.
    #[inline]
    pub fn needs_rebuild(&self) -> bool {
        self.intersects(Self::REBUILD_GROUP)
    }

    /// Returns true if only paint changed, so shapes can be recoloured in place.
    #[inline]
    pub fn is_paint_only(&self) -> bool {
        !self.is_empty()
            && !self.needs_rebuild()
            && self.intersects(Self::SERIES_COLOR | Self::APPEARANCE | Self::HATCH_FILL)
    }
}

bitflags! {
    /// Edge-triggered notifications broadcast to listeners when an object
    /// becomes inconsistent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Signal: u32 {
        /// The object must be redrawn.
        const NEEDS_REDRAW            = 1 << 0;
        /// Settings must be reapplied from the theme.
        const NEEDS_REAPPLICATION     = 1 << 1;
        /// Derived values must be recalculated.
        const NEEDS_RECALCULATION     = 1 << 2;
        /// The object's bounds changed.
        const BOUNDS_CHANGED          = 1 << 3;
        /// The underlying data changed.
        const DATA_CHANGED            = 1 << 4;
        /// Only appearance must be redrawn.
        const NEEDS_REDRAW_APPEARANCE = 1 << 5;
        /// Only labels must be redrawn.
        const NEEDS_REDRAW_LABELS     = 1 << 6;
    }
}

impl Signal {
    /// Signals that ask a parent to redraw in any form.
    pub const REDRAW_GROUP: Self = Self::NEEDS_REDRAW
        .union(Self::NEEDS_REDRAW_APPEARANCE)
        .union(Self::NEEDS_REDRAW_LABELS);

    /// Returns true if any redraw signal is set.
    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.intersects(Self::REDRAW_GROUP)
    }

    /// Maps the signals a child sent into the consistency bits a parent
    /// owning that child should invalidate on itself.
    pub fn to_parent_state(self) -> ConsistencyState {
        let mut state = ConsistencyState::empty();
        if self.intersects(Self::NEEDS_REDRAW | Self::DATA_CHANGED) {
            state |= ConsistencyState::SERIES_POINTS;
        }
        if self.contains(Self::DATA_CHANGED) {
            state |= ConsistencyState::SERIES_STACK | ConsistencyState::DATA;
        }
        if self.contains(Self::NEEDS_RECALCULATION) {
            state |= ConsistencyState::SERIES_STACK;
        }
        if self.contains(Self::BOUNDS_CHANGED) {
            state |= ConsistencyState::BOUNDS;
        }
        if self.contains(Self::NEEDS_REDRAW_APPEARANCE) {
            state |= ConsistencyState::APPEARANCE;
        }
        if self.contains(Self::NEEDS_REDRAW_LABELS) {
            state |= ConsistencyState::SERIES_LABELS;
        }
        state
    }
}
