//! Edge insets plus the inter-cell gutter.
//!
//! The four edges run in one of two modes. Unlinked, every setter touches
//! only its own field. Linked, the edges are kept numerically equal: any
//! single-edge setter broadcasts to all four.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Margin {
    top: u32,
    left: u32,
    bottom: u32,
    right: u32,
    gutter: u32,
    linked: bool,
}

impl Margin {
    pub fn new(top: u32, left: u32, bottom: u32, right: u32, gutter: u32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
            gutter,
            linked: false,
        }
    }

    /// Same inset on every edge, already linked.
    pub fn uniform(value: u32, gutter: u32) -> Self {
        Self {
            linked: true,
            ..Self::new(value, value, value, value, gutter)
        }
    }

    // ─── Edges ──────────────────────────────────────────────────────────

    pub fn top(&self) -> u32 {
        self.top
    }

    pub fn set_top(&mut self, value: u32) {
        self.set_edge(value, |m| &mut m.top);
    }

    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn set_left(&mut self, value: u32) {
        self.set_edge(value, |m| &mut m.left);
    }

    pub fn bottom(&self) -> u32 {
        self.bottom
    }

    pub fn set_bottom(&mut self, value: u32) {
        self.set_edge(value, |m| &mut m.bottom);
    }

    pub fn right(&self) -> u32 {
        self.right
    }

    pub fn set_right(&mut self, value: u32) {
        self.set_edge(value, |m| &mut m.right);
    }

    fn set_edge(&mut self, value: u32, field: impl FnOnce(&mut Self) -> &mut u32) {
        if self.linked {
            self.set_all(value);
        } else {
            *field(self) = value;
        }
    }

    /// The shared inset when all four edges agree, `None` otherwise.
    pub fn all(&self) -> Option<u32> {
        let [top, left, bottom, right] = self.edges();
        (top == left && top == bottom && top == right).then_some(top)
    }

    /// Force all four edges to `value`, whatever the link mode.
    pub fn set_all(&mut self, value: u32) {
        self.top = value;
        self.left = value;
        self.bottom = value;
        self.right = value;
    }

    /// `[top, left, bottom, right]`.
    pub fn edges(&self) -> [u32; 4] {
        [self.top, self.left, self.bottom, self.right]
    }

    // ─── Gutter ─────────────────────────────────────────────────────────

    pub fn gutter(&self) -> u32 {
        self.gutter
    }

    pub fn set_gutter(&mut self, value: u32) {
        self.gutter = value;
    }

    // ─── Link mode ──────────────────────────────────────────────────────

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Broadcast `top` to the other edges and enter linked mode.
    pub fn link(&mut self) {
        self.set_all(self.top);
        self.linked = true;
    }

    /// Leave linked mode. The current values stay as four independent fields.
    pub fn unlink(&mut self) {
        self.linked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlinked_setters_touch_one_edge() {
        let mut margin = Margin::new(10, 20, 30, 40, 5);
        margin.set_left(7);
        assert_eq!(margin.edges(), [10, 7, 30, 40]);
        assert_eq!(margin.all(), None);
    }

    #[test]
    fn link_broadcasts_top() {
        let mut margin = Margin::new(10, 20, 30, 40, 5);
        margin.link();
        assert!(margin.is_linked());
        assert_eq!(margin.left(), margin.top());
        assert_eq!(margin.bottom(), margin.top());
        assert_eq!(margin.right(), margin.top());
        assert_eq!(margin.all(), Some(10));
    }

    #[test]
    fn linked_single_edge_setter_broadcasts() {
        let mut margin = Margin::new(0, 0, 0, 0, 0);
        margin.link();
        margin.set_right(12);
        assert_eq!(margin.edges(), [12, 12, 12, 12]);
    }

    #[test]
    fn unlink_freezes_values() {
        let mut margin = Margin::uniform(15, 0);
        margin.unlink();
        margin.set_top(40);
        assert_eq!(margin.edges(), [40, 15, 15, 15]);
    }

    #[test]
    fn set_all_ignores_link_mode() {
        let mut margin = Margin::new(1, 2, 3, 4, 0);
        margin.set_all(9);
        assert!(!margin.is_linked());
        assert_eq!(margin.all(), Some(9));
    }

    #[test]
    fn gutter_is_independent_of_edges() {
        let mut margin = Margin::uniform(10, 4);
        margin.set_gutter(8);
        margin.set_top(3);
        assert_eq!(margin.gutter(), 8);
    }
}
