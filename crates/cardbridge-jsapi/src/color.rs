//! CSS colour validation for `study-screen/set-background-color`.

use regex::Regex;
use std::sync::LazyLock;

/// `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

/// `rgb(r,g,b)` or `rgba(r,g,b,a)`.
static RGBA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
    )
    .unwrap()
});

/// Whether `s` is a colour the web view will accept as a background.
pub fn is_valid_color(s: &str) -> bool {
    let s = s.trim();
    if HEX_RE.is_match(s) {
        return true;
    }
    let Some(caps) = RGBA_RE.captures(s) else {
        return false;
    };
    let channels_ok = (1..=3).all(|i| caps[i].parse::<u8>().is_ok());
    let alpha_ok = match caps.get(4) {
        None => true,
        Some(a) => a
            .as_str()
            .parse::<f64>()
            .map(|a| (0.0..=1.0).contains(&a))
            .unwrap_or(false),
    };
    channels_ok && alpha_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hex_forms() {
        assert!(is_valid_color("#fff"));
        assert!(is_valid_color("#1e1e2e"));
        assert!(is_valid_color("#1E1E2EFF"));
        assert!(is_valid_color("  #000000 "));
    }

    #[test]
    fn accepts_rgb_and_rgba() {
        assert!(is_valid_color("rgb(0, 0, 0)"));
        assert!(is_valid_color("rgba(255,255,255,0.5)"));
        assert!(is_valid_color("rgba(10, 20, 30, 1)"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(!is_valid_color(""));
        assert!(!is_valid_color("red; background-image: url(x)"));
        assert!(!is_valid_color("#12"));
        assert!(!is_valid_color("#gggggg"));
        assert!(!is_valid_color("rgba(256, 0, 0, 0.5)"));
        assert!(!is_valid_color("rgba(0, 0, 0, 1.5)"));
    }
}
