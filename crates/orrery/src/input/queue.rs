/// Pointer buttons, numbered the way the DOM numbers `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u32),
}

impl PointerButton {
    pub fn from_dom(button: u32) -> Self {
        match button {
            0 => PointerButton::Primary,
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            n => PointerButton::Other(n),
        }
    }
}

/// Input event types the engine understands.
/// No game-specific semantics. Coordinates are canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button was pressed at (x, y).
    PointerDown { x: f32, y: f32, button: PointerButton },
    /// A button was released at (x, y).
    PointerUp { x: f32, y: f32, button: PointerButton },
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// Wheel scrolled; positive `delta_y` scrolls away from the user.
    Wheel { delta_y: f32 },
    /// A primary click completed at (x, y).
    /// `over_overlay` is set when the click landed on a DOM overlay element.
    Click { x: f32, y: f32, over_overlay: bool },
    /// A custom event from the UI layer (buttons, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them once per frame, in arrival order.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
