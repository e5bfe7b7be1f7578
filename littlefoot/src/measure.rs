// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Natural size of popover content.

use kurbo::Size;

/// Measures footnote content laid out at a maximum width.
///
/// The engine calls this when a popover is created and again when the viewport is resized.
/// Any `Fn(&str, f64) -> Size` closure is a measure:
///
/// ```
/// use kurbo::Size;
/// use littlefoot::Measure;
///
/// let fixed = |_html: &str, max_width: f64| Size::new(max_width.min(300.0), 120.0);
/// assert_eq!(fixed.measure("<p>Hi</p>", 800.0), Size::new(300.0, 120.0));
/// ```
pub trait Measure {
    /// Size of `html` wrapped at `max_width`.
    fn measure(&self, html: &str, max_width: f64) -> Size;
}

impl<F: Fn(&str, f64) -> Size> Measure for F {
    fn measure(&self, html: &str, max_width: f64) -> Size {
        self(html, max_width)
    }
}

/// Fixed-pitch text measure: every visible character is `glyph_width` wide, lines wrap at the
/// maximum width and are `line_height` tall.
///
/// Tags are skipped and runs of whitespace count as one character.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextMeasure {
    /// Advance of one character.
    pub glyph_width: f64,
    /// Height of one line.
    pub line_height: f64,
}

impl Default for TextMeasure {
    fn default() -> Self {
        Self {
            glyph_width: 8.0,
            line_height: 20.0,
        }
    }
}

fn visible_chars(html: &str) -> usize {
    let mut count = 0;
    let mut in_tag = false;
    let mut in_space = true;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            c if c.is_whitespace() => {
                if !in_space {
                    count += 1;
                    in_space = true;
                }
            }
            _ => {
                count += 1;
                in_space = false;
            }
        }
    }
    // A trailing run of whitespace was counted once.
    if in_space && count > 0 {
        count -= 1;
    }
    count
}

impl Measure for TextMeasure {
    fn measure(&self, html: &str, max_width: f64) -> Size {
        let chars = visible_chars(html);
        if chars == 0 {
            return Size::ZERO;
        }
        let line = chars as f64 * self.glyph_width;
        if max_width.is_nan() || max_width <= 0.0 {
            return Size::new(line, self.line_height);
        }
        let lines = (line / max_width).ceil().max(1.0);
        Size::new(line.min(max_width), lines * self.line_height)
    }
}
