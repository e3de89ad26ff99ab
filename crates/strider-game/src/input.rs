//! Input system with action-based mapping
//!
//! Turns raw window events into the per-frame intent snapshot the controller
//! reads: a move axis, a look vector, and the sprint/jump/aim flags.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
    /// Sprint modifier (Shift by default)
    Sprint,
    /// Aim mode (Right mouse button by default)
    Aim,
}

/// Class of the device that produced the latest look input.
///
/// Pointer deltas are already per-frame; rate devices report per-second
/// values that must be scaled by the frame time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    /// Mouse, trackpad, pen
    #[default]
    Pointer,
    /// Gamepad stick or other rate-based axis
    Rate,
}

/// Intent sampled for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Movement axis, each component in `[-1, 1]`; +y is forward
    pub move_axis: Vec2,
    /// Look delta (pointer) or rate (stick)
    pub look: Vec2,
    /// Sprint held
    pub sprint: bool,
    /// Jump held
    pub jump: bool,
    /// Aim held
    pub aim: bool,
    /// Whether `move_axis` carries analog magnitude
    pub analog_movement: bool,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any movement is requested
    pub fn is_moving(&self) -> bool {
        self.move_axis != Vec2::ZERO
    }
}

/// Binding of a physical key to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    /// Keyboard key
    Key(KeyCode),
    /// Mouse button
    Mouse(u32), // 0 = left, 1 = right, 2 = middle
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

/// Maps physical inputs to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<InputBinding, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Sprint);
        bindings.bind(KeyCode::ShiftRight, InputAction::Sprint);
        bindings.bind_mouse(1, InputAction::Aim);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(InputBinding::Key(key), action);
    }

    /// Bind a mouse button to an action
    pub fn bind_mouse(&mut self, button: u32, action: InputAction) {
        self.bindings.insert(InputBinding::Mouse(button), action);
    }

    /// Get the action for a binding, if any
    pub fn get_action(&self, binding: &InputBinding) -> Option<InputAction> {
        self.bindings.get(binding).copied()
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.get_action(&InputBinding::Key(key))
    }

    /// All bindings that trigger `action`
    pub fn bindings_for(&self, action: InputAction) -> Vec<InputBinding> {
        self.bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(b, _)| *b)
            .collect()
    }
}

/// Input handler that processes raw events and produces per-frame snapshots
#[derive(Debug)]
pub struct InputHandler {
    /// Input bindings
    pub bindings: InputBindings,
    /// Mouse sensitivity multiplier
    pub mouse_sensitivity: f32,
    /// Invert Y axis
    pub invert_y: bool,
    /// Whether the cursor is captured (invisible, locked)
    pub cursor_captured: bool,
    held: HashSet<InputAction>,
    pointer_delta: Vec2,
    stick_move: Vec2,
    stick_look: Vec2,
    device: DeviceClass,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self {
            bindings: InputBindings::default(),
            mouse_sensitivity: 1.0,
            invert_y: false,
            cursor_captured: false,
            held: HashSet::new(),
            pointer_delta: Vec2::ZERO,
            stick_move: Vec2::ZERO,
            stick_look: Vec2::ZERO,
            device: DeviceClass::Pointer,
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        if let PhysicalKey::Code(key_code) = physical_key {
            if let Some(action) = self.bindings.get_key_action(key_code) {
                self.apply(action, element_state);
            }
        }
    }

    /// Handle a mouse button event
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let button_id = match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(id) => id as u32,
        };

        if let Some(action) = self.bindings.get_action(&InputBinding::Mouse(button_id)) {
            self.apply(action, state);
        }
    }

    /// Handle raw mouse motion
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if !self.cursor_captured {
            return;
        }
        let y_mult = if self.invert_y { -1.0 } else { 1.0 };
        self.pointer_delta += Vec2::new(
            delta.0 as f32 * self.mouse_sensitivity,
            delta.1 as f32 * self.mouse_sensitivity * y_mult,
        );
        self.device = DeviceClass::Pointer;
    }

    /// Handle stick levels from a rate device
    pub fn handle_stick(&mut self, move_axis: Vec2, look_rate: Vec2) {
        self.stick_move = move_axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
        self.stick_look = look_rate;
        if look_rate != Vec2::ZERO || move_axis != Vec2::ZERO {
            self.device = DeviceClass::Rate;
        }
    }

    /// Class of the device that last produced input
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Build the intent snapshot for this frame
    pub fn snapshot(&self) -> InputState {
        let analog = self.stick_move != Vec2::ZERO;
        let move_axis = if analog {
            self.stick_move
        } else {
            self.digital_move()
        };
        let look = match self.device {
            DeviceClass::Pointer => self.pointer_delta,
            DeviceClass::Rate => self.stick_look,
        };

        InputState {
            move_axis,
            look,
            sprint: self.held.contains(&InputAction::Sprint),
            jump: self.held.contains(&InputAction::Jump),
            aim: self.held.contains(&InputAction::Aim),
            analog_movement: analog,
        }
    }

    /// Clear frame-specific input data (call at end of frame)
    pub fn end_frame(&mut self) {
        self.pointer_delta = Vec2::ZERO;
    }

    /// Set cursor capture state
    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
    }

    fn apply(&mut self, action: InputAction, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.held.insert(action);
            }
            ElementState::Released => {
                self.held.remove(&action);
            }
        }
    }

    fn digital_move(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.held.contains(&InputAction::MoveForward) {
            axis.y += 1.0;
        }
        if self.held.contains(&InputAction::MoveBackward) {
            axis.y -= 1.0;
        }
        if self.held.contains(&InputAction::MoveLeft) {
            axis.x -= 1.0;
        }
        if self.held.contains(&InputAction::MoveRight) {
            axis.x += 1.0;
        }
        // Diagonals stay unit length
        if axis.length_squared() > 1.0 {
            axis.normalize()
        } else {
            axis
        }
    }
}
