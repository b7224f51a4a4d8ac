//! Touch gesture recognition for the card viewer.
//!
//! Converts raw touch events coming out of the embedded content view
//! (position, deltas, scroll offset, zoom scale) into a symbolic
//! [`Gesture`], and maps gestures to reviewer commands via
//! [`GestureBindings`].
//!
//! Classification is pure and synchronous, so it can run on whichever
//! thread receives touch events.

pub mod bindings;
pub mod classifier;
pub mod gesture;

pub use bindings::GestureBindings;
pub use classifier::{
    GestureClassifier, GestureError, ScrollAxes, TapGridMode, TouchEvent,
    DEFAULT_SWIPE_THRESHOLD,
};
pub use gesture::{Gesture, ParseGestureError, ViewerCommand};
