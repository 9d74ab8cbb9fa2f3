/// Input event types the engine understands.
/// Raw platform callbacks get normalized into these; nothing here knows about
/// puzzle semantics.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A touch/click began at viewport coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at viewport coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The pointer moved to (x, y) by (dx, dy). `touch` marks movement that
    /// can drag-scroll (touch contact or a pressed pen), as opposed to a
    /// hovering mouse.
    PointerMove {
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        touch: bool,
    },
    /// Wheel scroll deltas.
    Wheel { dx: f32, dy: f32 },
    /// A key press, already mapped to puzzle-relevant keys.
    Key(KeyInput),
    /// The viewport was resized.
    Resize { width: f32, height: f32 },
}

/// The keyboard subset the puzzle reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A letter key (stored uppercase).
    Letter(char),
    /// Submit the word buffer.
    Enter,
    /// Delete the last buffered letter.
    Backspace,
    /// Shuffle the outer letters.
    Space,
}

/// A queue of input events.
/// The platform layer writes events in; the engine drains them once per tick,
/// so ordering and consumption are enforced in one place.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from the platform shell).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Key(KeyInput::Enter));
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn letter_key_round_trips() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Key(KeyInput::Letter('N')));
        let events = q.drain();
        match events[0] {
            InputEvent::Key(KeyInput::Letter(ch)) => assert_eq!(ch, 'N'),
            _ => panic!("expected a letter key"),
        }
    }
}
