use bitflags::bitflags;

bitflags! {
    /// Flags to track which parts of the panel need re-rendering
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u32 {
        /// Nothing needs rendering
        const NONE = 0;
        /// Header (back control, badge, name)
        const HEADER = 0b0000_0001;
        /// Price and 24h change
        const PRICE = 0b0000_0010;
        /// Stat rows
        const STATS = 0b0000_0100;
        /// Loading spinner animates on every tick
        const LOADING = 0b0000_1000;
        /// Error screen
        const ERROR = 0b0001_0000;
        /// Identifier prompt
        const PROMPT = 0b0010_0000;
        /// Footer key hints
        const FOOTER = 0b0100_0000;
        /// Full redraw
        const ALL = 0xFFFF_FFFF;
    }
}

impl DirtyFlags {
    #[inline]
    pub fn needs_render(self) -> bool {
        !self.is_empty()
    }

    /// Mark everything the detail body draws after a resolution settles
    #[inline]
    #[must_use]
    pub fn mark_settled(mut self) -> Self {
        self.insert(Self::HEADER | Self::PRICE | Self::STATS | Self::ERROR);
        self
    }
}

/// Manages rendering state and tracks which components need updates
#[derive(Debug)]
pub struct RenderState {
    dirty: DirtyFlags,
    render_count: u64,
    skip_count: u64,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderState {
    pub fn new() -> Self {
        Self {
            dirty: DirtyFlags::NONE,
            render_count: 0,
            skip_count: 0,
        }
    }

    #[inline]
    pub fn needs_render(&self) -> bool {
        self.dirty.needs_render()
    }

    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty.insert(flags);
    }

    #[inline]
    pub fn mark_all_dirty(&mut self) {
        self.dirty = DirtyFlags::ALL;
    }

    /// Clear all dirty flags after successful render
    #[inline]
    pub fn clear(&mut self) {
        self.dirty = DirtyFlags::NONE;
        self.render_count += 1;
    }

    #[inline]
    pub fn skip(&mut self) {
        self.skip_count += 1;
    }

    #[inline]
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Percentage of ticks that were skipped
    #[allow(clippy::cast_precision_loss)]
    pub fn efficiency(&self) -> f64 {
        let total = self.render_count + self.skip_count;
        if total == 0 {
            0.0
        } else {
            (self.skip_count as f64 / total as f64) * 100.0
        }
    }

    pub fn stats(&self) -> String {
        format!(
            "渲染次数: {}, 跳过次数: {}, 跳过率: {:.1}%",
            self.render_count,
            self.skip_count,
            self.efficiency()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{DirtyFlags, RenderState};

    #[test]
    fn test_dirty_flags() {
        let flags = DirtyFlags::NONE;
        assert!(!flags.needs_render());

        let flags = DirtyFlags::HEADER | DirtyFlags::PROMPT;
        assert!(flags.needs_render());
        assert!(flags.contains(DirtyFlags::PROMPT));
        assert!(!flags.contains(DirtyFlags::STATS));
    }

    #[test]
    fn test_mark_settled() {
        let flags = DirtyFlags::NONE.mark_settled();
        assert!(flags.contains(DirtyFlags::PRICE));
        assert!(flags.contains(DirtyFlags::STATS));
        assert!(flags.contains(DirtyFlags::ERROR));
        assert!(!flags.contains(DirtyFlags::LOADING));
    }

    #[test]
    fn test_render_state() {
        let mut state = RenderState::new();
        assert!(!state.needs_render());

        state.mark_dirty(DirtyFlags::LOADING);
        assert!(state.needs_render());
        assert_eq!(state.dirty(), DirtyFlags::LOADING);

        state.clear();
        assert!(!state.needs_render());
        assert_eq!(state.render_count, 1);
    }

    #[test]
    fn test_efficiency_calculation() {
        let mut state = RenderState::new();

        for _ in 0..3 {
            state.mark_dirty(DirtyFlags::STATS);
            state.clear();
        }
        for _ in 0..7 {
            state.skip();
        }

        assert!((state.efficiency() - 70.0).abs() < f64::EPSILON);
        assert!(state.stats().contains("70.0%"));
    }
}
