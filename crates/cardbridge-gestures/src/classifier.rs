//! Touch event to gesture classification.
//!
//! Scrolling suppresses everything, a double tap short-circuits the
//! coordinate math, movement past the swipe threshold is a swipe, and
//! anything else is a tap mapped onto a four- or nine-zone layout.

use cardbridge_config::schema::{GestureConfig, TapModeSetting};

use crate::gesture::Gesture;

/// Swipe threshold in unscaled content pixels.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 18.0;

const NINE_ZONE_GRID: [[Gesture; 3]; 3] = [
    [Gesture::TapTopLeft, Gesture::TapTop, Gesture::TapTopRight],
    [Gesture::TapLeft, Gesture::TapCenter, Gesture::TapRight],
    [
        Gesture::TapBottomLeft,
        Gesture::TapBottom,
        Gesture::TapBottomRight,
    ],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GestureError {
    /// A tap landed outside the 3x3 grid (e.g. exactly on the far edge,
    /// or above/left of the viewport after scroll adjustment).
    #[error("tap zone index out of range: row {row}, col {col}")]
    ZoneOutOfRange { row: i64, col: i64 },
}

/// How taps are divided into zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TapGridMode {
    #[default]
    NineZone,
    FourZone,
}

impl From<TapModeSetting> for TapGridMode {
    fn from(setting: TapModeSetting) -> Self {
        match setting {
            TapModeSetting::Nine => TapGridMode::NineZone,
            TapModeSetting::Four => TapGridMode::FourZone,
        }
    }
}

/// Axes on which the content scrolls natively.
///
/// Native scrolling wins over a custom swipe along the same axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollAxes {
    pub horizontal: bool,
    pub vertical: bool,
}

impl ScrollAxes {
    pub const NONE: ScrollAxes = ScrollAxes {
        horizontal: false,
        vertical: false,
    };

    /// Parse the hint string reported by the content (`"h"`, `"v"`, `"hv"`).
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some(h) => Self {
                horizontal: h.contains('h'),
                vertical: h.contains('v'),
            },
            None => Self::NONE,
        }
    }
}

/// A single touch event plus the viewport state it happened in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub x: f64,
    pub y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Current zoom factor of the content.
    pub scale: f64,
    pub native_scroll: ScrollAxes,
    pub is_double_tap: bool,
    pub is_scrolling: bool,
}

impl Default for TouchEvent {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            delta_x: 0.0,
            delta_y: 0.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            viewport_width: 0.0,
            viewport_height: 0.0,
            scale: 1.0,
            native_scroll: ScrollAxes::NONE,
            is_double_tap: false,
            is_scrolling: false,
        }
    }
}

impl TouchEvent {
    /// A stationary tap at `(x, y)` in a `width` x `height` viewport.
    pub fn tap(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            viewport_width: width,
            viewport_height: height,
            ..Default::default()
        }
    }

    /// A movement of `(delta_x, delta_y)` in a `width` x `height` viewport.
    pub fn swipe(delta_x: f64, delta_y: f64, width: f64, height: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            viewport_width: width,
            viewport_height: height,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_scroll(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    pub fn with_native_scroll(mut self, axes: ScrollAxes) -> Self {
        self.native_scroll = axes;
        self
    }

    pub fn double_tap(mut self) -> Self {
        self.is_double_tap = true;
        self
    }

    pub fn scrolling(mut self) -> Self {
        self.is_scrolling = true;
        self
    }

    /// Zoom factor, with unusable values treated as 1.0.
    fn effective_scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }
}

/// Maps touch events to gestures for a fixed zone layout and threshold.
#[derive(Debug, Clone, Copy)]
pub struct GestureClassifier {
    mode: TapGridMode,
    base_threshold: f64,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(TapGridMode::NineZone)
    }
}

impl GestureClassifier {
    pub fn new(mode: TapGridMode) -> Self {
        Self {
            mode,
            base_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self {
            mode: config.tap_mode.into(),
            base_threshold: config.swipe_threshold,
        }
    }

    pub fn mode(&self) -> TapGridMode {
        self.mode
    }

    /// Swipe threshold for the given zoom factor. Zooming in shrinks it.
    pub fn swipe_threshold(&self, scale: f64) -> f64 {
        self.base_threshold / scale
    }

    /// Classify one touch event.
    ///
    /// Returns `Ok(None)` when the event produces no gesture (active
    /// scrolling, or a swipe along an axis the content scrolls natively).
    pub fn classify(&self, event: &TouchEvent) -> Result<Option<Gesture>, GestureError> {
        if event.is_scrolling {
            return Ok(None);
        }
        if event.is_double_tap {
            return Ok(Some(Gesture::DoubleTap));
        }

        let scale = event.effective_scale();
        let threshold = self.swipe_threshold(scale);
        let (dx, dy) = (event.delta_x, event.delta_y);

        if dx.abs() > threshold || dy.abs() > threshold {
            return Ok(swipe(dx, dy, event.native_scroll));
        }

        let x = event.x * scale - event.scroll_x;
        let y = event.y * scale - event.scroll_y;
        let (width, height) = (event.viewport_width, event.viewport_height);

        match self.mode {
            TapGridMode::FourZone => Ok(Some(four_zone(
                normalize(x, width),
                normalize(y, height),
            ))),
            TapGridMode::NineZone => nine_zone(band(x, width), band(y, height)).map(Some),
        }
    }
}

fn swipe(dx: f64, dy: f64, native_scroll: ScrollAxes) -> Option<Gesture> {
    if dx.abs() > dy.abs() {
        if native_scroll.horizontal {
            return None;
        }
        Some(if dx > 0.0 {
            Gesture::SwipeRight
        } else {
            Gesture::SwipeLeft
        })
    } else {
        if native_scroll.vertical {
            return None;
        }
        Some(if dy > 0.0 {
            Gesture::SwipeDown
        } else {
            Gesture::SwipeUp
        })
    }
}

/// Position as a fraction of the viewport dimension; 0 for an empty viewport.
fn normalize(position: f64, size: f64) -> f64 {
    if size > 0.0 {
        position / size
    } else {
        0.0
    }
}

/// Which third of the viewport a position falls in; 0 for an empty viewport.
///
/// Truncates toward zero, so a position less than a third of the viewport
/// above or left of the origin still lands in band 0.
fn band(position: f64, size: f64) -> i64 {
    if size > 0.0 {
        (position / (size / 3.0)) as i64
    } else {
        0
    }
}

fn four_zone(nx: f64, ny: f64) -> Gesture {
    let below_anti_diagonal = nx > 1.0 - ny;
    if nx > ny {
        if below_anti_diagonal {
            Gesture::TapRight
        } else {
            Gesture::TapTop
        }
    } else if below_anti_diagonal {
        Gesture::TapBottom
    } else {
        Gesture::TapLeft
    }
}

fn nine_zone(col: i64, row: i64) -> Result<Gesture, GestureError> {
    match (usize::try_from(row), usize::try_from(col)) {
        (Ok(r), Ok(c)) if r < 3 && c < 3 => Ok(NINE_ZONE_GRID[r][c]),
        _ => {
            tracing::warn!(row, col, "tap outside nine-zone grid");
            Err(GestureError::ZoneOutOfRange { row, col })
        }
    }
}
