//! Scroll-into-view math for the options list.
//!
//! Units are whatever the list measures in; the terminal front end uses rows.

use std::ops::Range;

/// Vertical extent of one list entry, relative to the top of the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub top: usize,
    pub height: usize,
}

impl Extent {
    pub fn bottom(&self) -> usize {
        self.top + self.height
    }
}

/// The visible window of a scrollable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Distance from the top of the content to the top of the window.
    pub offset: usize,
    /// Height of the visible window.
    pub height: usize,
}

impl Viewport {
    pub fn new(offset: usize, height: usize) -> Self {
        Self { offset, height }
    }

    /// Returns true if `extent` lies fully inside the window.
    pub fn contains(&self, extent: Extent) -> bool {
        extent.top >= self.offset && extent.bottom() <= self.offset + self.height
    }
}

/// Returns the offset that brings `item` into view with the least movement.
///
/// An item above the window is aligned to the top edge, an item below it to
/// the bottom edge; a visible item leaves the offset unchanged.
pub fn scroll_into_view(item: Extent, viewport: Viewport) -> usize {
    if item.top < viewport.offset {
        item.top
    } else if item.bottom() > viewport.offset + viewport.height {
        item.bottom().saturating_sub(viewport.height)
    } else {
        viewport.offset
    }
}

/// Clamps an offset so the window never starts past the end of the content.
pub fn clamp_offset(offset: usize, content_height: usize, viewport_height: usize) -> usize {
    offset.min(content_height.saturating_sub(viewport_height))
}

/// Per-list scroll state for fixed-height entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListViewport {
    offset: usize,
    visible_height: usize,
    item_height: usize,
}

impl ListViewport {
    /// Creates a viewport showing `visible_height` units of entries that are
    /// each `item_height` units tall.
    pub fn new(visible_height: usize, item_height: usize) -> Self {
        Self {
            offset: 0,
            visible_height,
            item_height: item_height.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn visible_height(&self) -> usize {
        self.visible_height
    }

    /// Changes the window height, keeping the current offset.
    pub fn set_visible_height(&mut self, visible_height: usize) {
        self.visible_height = visible_height;
    }

    /// Extent of the entry at 0-based `index`.
    pub fn extent_of(&self, index: usize) -> Extent {
        Extent {
            top: index * self.item_height,
            height: self.item_height,
        }
    }

    /// Adjusts the offset so the entry at 0-based `index` is visible.
    pub fn reveal(&mut self, index: usize) {
        let viewport = Viewport::new(self.offset, self.visible_height);
        self.offset = scroll_into_view(self.extent_of(index), viewport);
    }

    /// Clamps the offset to a list of `len` entries.
    pub fn clamp_to(&mut self, len: usize) {
        self.offset = clamp_offset(self.offset, len * self.item_height, self.visible_height);
    }

    /// Returns to the top of the list.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Range of 0-based entry indices at least partly inside the window.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = (self.offset / self.item_height).min(len);
        let end = (self.offset + self.visible_height)
            .div_ceil(self.item_height)
            .min(len);
        start..end.max(start)
    }

    /// Returns true if the entry at 0-based `index` is fully visible.
    pub fn is_visible(&self, index: usize) -> bool {
        Viewport::new(self.offset, self.visible_height).contains(self.extent_of(index))
    }
}
