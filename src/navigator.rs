// navigator.rs: 滑动手势对应的图片切换

use log::debug;

use crate::gesture::Swipe;

/// Receives swipe gestures recognised by the controller.
pub trait Navigator {
    fn navigate(&mut self, swipe: Swipe);
}

impl<F: FnMut(Swipe)> Navigator for F {
    fn navigate(&mut self, swipe: Swipe) {
        self(swipe)
    }
}

/// An ordered list of panoramas with a cursor that wraps at both ends.
#[derive(Debug, Clone)]
pub struct Gallery<T> {
    items: Vec<T>,
    index: usize,
}

impl<T> Default for Gallery<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: 0,
        }
    }
}

impl<T> Gallery<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, index: 0 }
    }

    /// Appends more images without moving the cursor.
    pub fn extend(&mut self, more: impl IntoIterator<Item = T>) {
        self.items.extend(more);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    /// `(1-based index, total)` for a counter such as "2 / 5".
    pub fn position(&self) -> Option<(usize, usize)> {
        (!self.items.is_empty()).then(|| (self.index + 1, self.items.len()))
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.index = index;
        true
    }

    /// Returns `false` when there is nothing to switch to.
    pub fn prev(&mut self) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        self.index = self.index.checked_sub(1).unwrap_or(self.items.len() - 1);
        true
    }

    pub fn next(&mut self) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        self.index = (self.index + 1) % self.items.len();
        true
    }
}

impl<T> Navigator for Gallery<T> {
    fn navigate(&mut self, swipe: Swipe) {
        let moved = match swipe {
            Swipe::Prev => self.prev(),
            Swipe::Next => self.next(),
        };
        if moved {
            debug!("gallery at {}/{}", self.index + 1, self.items.len());
        }
    }
}
