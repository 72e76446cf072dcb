//! Console Style
//!
//! Colors and status glyphs for the runner's console report. Colors are
//! controlled globally through `colored::control`; glyphs fall back to plain
//! ASCII when [`set_ascii_mode`] is enabled.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::{Colorize, CustomColor};

/// When true, all glyphs use plain ASCII instead of emoji.
static ASCII_MODE: AtomicBool = AtomicBool::new(false);

/// Enable ASCII-only mode (no emoji).
pub fn set_ascii_mode(enabled: bool) {
    ASCII_MODE.store(enabled, Ordering::Relaxed);
}

/// Check if ASCII mode is active.
pub fn is_ascii_mode() -> bool {
    ASCII_MODE.load(Ordering::Relaxed)
}

/// Enable or disable colored output for the whole process.
pub fn set_color_enabled(enabled: bool) {
    colored::control::set_override(enabled);
}

pub struct Palette;

impl Palette {
    pub const TITLE: CustomColor = CustomColor {
        r: 86,
        g: 156,
        b: 214,
    }; // #569CD6
    pub const PASS: CustomColor = CustomColor {
        r: 144,
        g: 190,
        b: 109,
    }; // #90BE6D
    pub const FAIL: CustomColor = CustomColor {
        r: 214,
        g: 96,
        b: 86,
    }; // #D66056
    pub const WARN: CustomColor = CustomColor {
        r: 212,
        g: 163,
        b: 115,
    }; // #D4A373
    pub const MUTED: CustomColor = CustomColor {
        r: 128,
        g: 128,
        b: 128,
    };
}

/// Semantic styling for report lines
pub trait ReportStyle {
    fn title(self) -> colored::ColoredString;
    fn pass(self) -> colored::ColoredString;
    fn fail(self) -> colored::ColoredString;
    fn warn(self) -> colored::ColoredString;
    fn muted(self) -> colored::ColoredString;
}

impl ReportStyle for &str {
    fn title(self) -> colored::ColoredString {
        self.custom_color(Palette::TITLE).bold()
    }

    fn pass(self) -> colored::ColoredString {
        self.custom_color(Palette::PASS)
    }

    fn fail(self) -> colored::ColoredString {
        self.custom_color(Palette::FAIL)
    }

    fn warn(self) -> colored::ColoredString {
        self.custom_color(Palette::WARN)
    }

    fn muted(self) -> colored::ColoredString {
        self.custom_color(Palette::MUTED)
    }
}

impl ReportStyle for String {
    fn title(self) -> colored::ColoredString {
        self.as_str().title()
    }

    fn pass(self) -> colored::ColoredString {
        self.as_str().pass()
    }

    fn fail(self) -> colored::ColoredString {
        self.as_str().fail()
    }

    fn warn(self) -> colored::ColoredString {
        self.as_str().warn()
    }

    fn muted(self) -> colored::ColoredString {
        self.as_str().muted()
    }
}

/// Status glyphs.
///
/// Each glyph returns the emoji by default, or a plain-ASCII fallback when
/// [`set_ascii_mode`] has been called.
pub struct Glyphs;

impl Glyphs {
    pub fn check() -> &'static str {
        if is_ascii_mode() {
            "[OK]"
        } else {
            "✅"
        }
    }
    pub fn cross() -> &'static str {
        if is_ascii_mode() {
            "[FAIL]"
        } else {
            "❌"
        }
    }
    pub fn rocket() -> &'static str {
        if is_ascii_mode() {
            "[>]"
        } else {
            "🚀"
        }
    }
    pub fn party() -> &'static str {
        if is_ascii_mode() {
            "[*]"
        } else {
            "🎉"
        }
    }
    pub fn warning() -> &'static str {
        if is_ascii_mode() {
            "[!]"
        } else {
            "⚠️ "
        }
    }
    pub fn gamepad() -> &'static str {
        if is_ascii_mode() {
            "[#]"
        } else {
            "🎮"
        }
    }
}
