use crate::geometry::{Delta, Point};

/// Identifies one press/release gesture.
///
/// Changes on every press so a grace timer left over from an earlier gesture
/// cannot settle a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureId(pub u64);

/// Lifecycle of the launcher drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer is down; document-level move/up listeners are installed.
    Tracking { gesture: GestureId, last: Point },
    /// Pointer was released; waiting out the grace delay before going idle.
    Settling { gesture: GestureId },
}

/// What a click on the launcher should do given the gesture that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickDisposition {
    Toggle,
    /// The click is the trailing event of a drag and must not toggle the panel.
    Suppressed,
}

/// Per-instance drag state machine for the launcher.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    phase: DragPhase,
    moved: bool,
    next_gesture: u64,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, DragPhase::Tracking { .. })
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Starts a gesture at `cursor`.
    ///
    /// Returns `None` when a gesture is already being tracked, so at most one
    /// session exists at a time.
    pub fn press(&mut self, cursor: Point) -> Option<GestureId> {
        if self.is_tracking() {
            tracing::debug!("ignoring launcher press while a drag is already tracked");
            return None;
        }

        self.next_gesture += 1;
        let gesture = GestureId(self.next_gesture);
        self.phase = DragPhase::Tracking {
            gesture,
            last: cursor,
        };
        self.moved = false;
        Some(gesture)
    }

    /// Records a pointer move and returns the delta to apply to the launcher.
    ///
    /// Any move while tracking marks the gesture as a drag, even a zero delta.
    pub fn move_to(&mut self, cursor: Point) -> Option<Delta> {
        let DragPhase::Tracking { gesture, last } = self.phase else {
            return None;
        };

        self.phase = DragPhase::Tracking {
            gesture,
            last: cursor,
        };
        self.moved = true;
        Some(last.delta_to(cursor))
    }

    /// Ends tracking. The caller schedules [`settle`](Self::settle) with the
    /// returned gesture after the grace delay.
    pub fn release(&mut self) -> Option<GestureId> {
        let DragPhase::Tracking { gesture, .. } = self.phase else {
            return None;
        };

        self.phase = DragPhase::Settling { gesture };
        tracing::debug!(gesture = gesture.0, moved = self.moved, "launcher released");
        Some(gesture)
    }

    /// Finishes the grace delay. A stale gesture id is ignored.
    ///
    /// If no click consumed the moved flag during the delay it is cleared here.
    pub fn settle(&mut self, gesture: GestureId) -> bool {
        match self.phase {
            DragPhase::Settling { gesture: active } if active == gesture => {
                self.phase = DragPhase::Idle;
                self.moved = false;
                true
            }
            _ => false,
        }
    }

    /// Classifies a launcher click, consuming the moved flag.
    pub fn take_click(&mut self) -> ClickDisposition {
        if self.moved {
            self.moved = false;
            ClickDisposition::Suppressed
        } else {
            ClickDisposition::Toggle
        }
    }
}
