//! Per-slot click debouncing.
//!
//! The rendering layer does the hit testing and reports a slot index; this
//! module only decides whether that click is new enough to count.

/// Remembers the last accepted click time of every slot.
#[derive(Clone, Debug)]
pub struct ClickTracker {
    last_click: Vec<Option<f32>>,
    cooldown: f32,
}

impl ClickTracker {
    pub fn new(capacity: usize, cooldown: f32) -> Self {
        Self {
            last_click: vec![None; capacity],
            cooldown,
        }
    }

    /// Accept the click if the slot has not been clicked within the cooldown.
    ///
    /// Returns `false` for out-of-range indices and for clicks still inside
    /// the window. An accepted click restarts the window. A clock that went
    /// backwards (host reset) never blocks a click.
    pub fn try_accept(&mut self, index: usize, now: f32) -> bool {
        let Some(last) = self.last_click.get_mut(index) else {
            return false;
        };
        if let Some(t) = *last {
            if now >= t && now - t < self.cooldown {
                return false;
            }
        }
        *last = Some(now);
        true
    }

    /// Time of the last accepted click on `index`.
    pub fn last_click(&self, index: usize) -> Option<f32> {
        self.last_click.get(index).copied().flatten()
    }
}
