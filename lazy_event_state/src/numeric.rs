// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The numeric slider input state machine.
//!
//! [`NumericInput`] owns a slider's value, its optional bounds, its [`PrecisionLadder`] and
//! the keyboard [`NumpadBuffer`]. Events are fed in by the owning control; every method
//! reports what happened through [`Response`] flags.
//!
//! ## States
//!
//! - `Idle → Dragging` on [`press`](NumericInput::press).
//! - `Dragging → Idle` on [`release`](NumericInput::release), which ends an action.
//! - `Idle | Dragging → NumpadActive` when a digit or decimal separator is typed.
//! - `NumpadActive → Idle` in [`update`](NumericInput::update) once the buffer delay has
//!   elapsed: the buffer is parsed and committed and the precision is re-derived from the
//!   number of fractional digits typed.
//!
//! ## Keys
//!
//! | key | effect |
//! |---|---|
//! | `0`-`9` | start a fresh entry (replace mode) or append; a non-zero fresh digit selects whole-number precision |
//! | `.` `,` | insert a decimal point once, prefixing `0` on an empty entry |
//! | `+` `-` | negate the value when no entry is in progress |
//! | `*` | coarser step |
//! | `/` | finer step |
//! | `r` | reset to the default value |
//! | Escape | discard the entry in progress |

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;

use kurbo::Vec2;

use crate::event::{KeyCode, KeyEvent, Response};
use crate::numpad::NumpadBuffer;
use crate::precision::{PrecisionLadder, fraction_digits};

/// Externally visible phase of a [`NumericInput`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputState {
    /// Nothing in progress.
    Idle,
    /// The pointer is pressed on the control.
    Dragging,
    /// Typed characters are being buffered.
    NumpadActive,
}

/// Text that could not be read as a number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseNumberError {
    input: String,
}

impl ParseNumberError {
    /// The rejected text.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse a number from {:?}", self.input)
    }
}

impl core::error::Error for ParseNumberError {}

/// Parse user-provided text as a finite number. Both `.` and `,` are accepted as decimal
/// separators.
pub fn parse_number(text: &str) -> Result<f32, ParseNumberError> {
    let normalized = text.trim().replace(',', ".");
    match normalized.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseNumberError {
            input: text.to_string(),
        }),
    }
}

/// Inclusive value bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

/// Value, precision and keyboard state of one numeric control.
#[derive(Clone, Debug)]
pub struct NumericInput {
    value: f32,
    default: f32,
    bounds: Option<Bounds>,
    ladder: PrecisionLadder,
    precision_index: usize,
    integral: bool,
    /// Drag along the vertical axis instead of the horizontal one.
    pub vertical: bool,
    dragging: bool,
    buffer: NumpadBuffer,
    show_committed_buffer: bool,
}

impl NumericInput {
    /// Create an unbounded control starting at `default`.
    ///
    /// A non-finite default starts the value at `0` and disables [`reset`](Self::reset).
    pub fn new(default: f32) -> Self {
        let value = if default.is_finite() { default } else { 0.0 };
        let mut input = Self {
            value,
            default,
            bounds: None,
            ladder: PrecisionLadder::default(),
            precision_index: 0,
            integral: false,
            vertical: false,
            dragging: false,
            buffer: NumpadBuffer::default(),
            show_committed_buffer: false,
        };
        input.derive_precision_from_value();
        input
    }

    /// Clip the value to `[min, max]` after every change.
    ///
    /// Bounds that are not both finite leave the control unconstrained. Reversed bounds are
    /// swapped.
    pub fn with_bounds(mut self, min: f32, max: f32) -> Self {
        self.bounds = if min.is_finite() && max.is_finite() {
            Some(Bounds {
                min: min.min(max),
                max: max.max(min),
            })
        } else {
            None
        };
        self.constrain();
        self
    }

    /// Use a custom precision ladder.
    pub fn with_ladder(mut self, ladder: PrecisionLadder) -> Self {
        self.ladder = ladder;
        self.derive_precision_from_value();
        self
    }

    /// Restrict the control to whole numbers.
    pub fn integral(mut self) -> Self {
        self.integral = true;
        self.value = round_f32(self.value);
        self.ladder = PrecisionLadder::whole_numbers();
        self.derive_precision_from_value();
        self
    }

    /// Use a custom keyboard buffer delay.
    pub fn with_buffer_delay(mut self, delay_ms: u64) -> Self {
        self.buffer.delay_ms = delay_ms;
        self
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current value rounded down to a whole number.
    pub fn int_value(&self) -> i32 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "floor_f32 keeps the value within i32 range or returns it unchanged; `as` saturates."
        )]
        let v = floor_f32(self.value) as i32;
        v
    }

    /// Default value given at construction.
    pub fn default_value(&self) -> f32 {
        self.default
    }

    /// Bounds, if the control is constrained.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// True for whole-number controls.
    pub fn is_integral(&self) -> bool {
        self.integral
    }

    /// The ladder in use.
    pub fn ladder(&self) -> &PrecisionLadder {
        &self.ladder
    }

    /// Selected ladder index.
    pub fn precision_index(&self) -> usize {
        self.precision_index
    }

    /// Step size at the selected index.
    pub fn step(&self) -> f32 {
        self.ladder.step(self.precision_index)
    }

    /// Current phase.
    pub fn state(&self, now_ms: u64) -> InputState {
        if self.is_numpad_active(now_ms) || self.buffer.is_ready_to_commit(now_ms) {
            InputState::NumpadActive
        } else if self.dragging {
            InputState::Dragging
        } else {
            InputState::Idle
        }
    }

    /// True while the pointer is pressed on the control.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// True while typed input is still being buffered.
    pub fn is_numpad_active(&self, now_ms: u64) -> bool {
        self.buffer.is_active(now_ms)
    }

    /// Set the value, clipping it to the bounds. Whole-number controls round to the nearest
    /// whole number.
    ///
    /// Infinite and `NaN` values are ignored and leave the value unchanged.
    pub fn set_value(&mut self, value: f32) -> Response {
        if !value.is_finite() {
            log::warn!("ignoring non-finite value {value}");
            return Response::empty();
        }
        self.value = if self.integral {
            round_f32(value)
        } else {
            value
        };
        let mut response = Response::VALUE_CHANGED;
        if self.constrain() {
            response |= Response::CONSTRAINED;
        }
        response
    }

    /// Select a ladder index, clamped to the ladder and to whole steps for integral controls.
    pub fn set_precision_index(&mut self, index: usize) {
        let mut index = index.min(self.ladder.len() - 1);
        if self.integral {
            index = index.max(self.ladder.first_whole_index());
        }
        self.precision_index = index;
    }

    /// One step finer.
    pub fn finer(&mut self) {
        self.set_precision_index(self.precision_index.saturating_sub(1));
    }

    /// One step coarser.
    pub fn coarser(&mut self) {
        self.set_precision_index(self.precision_index + 1);
    }

    /// Move the precision by exactly one step per wheel event.
    ///
    /// Positive notches (wheel down) select a finer step, negative notches a coarser one.
    pub fn wheel(&mut self, notches: i32) -> Response {
        match notches.signum() {
            1 => self.finer(),
            -1 => self.coarser(),
            _ => return Response::empty(),
        }
        Response::CONSUMED
    }

    /// Pointer pressed on the control.
    pub fn press(&mut self) -> Response {
        self.dragging = true;
        Response::CONSUMED
    }

    /// Pointer moved by `movement` while pressed.
    ///
    /// The value moves by the movement along the active axis times the current step.
    pub fn drag(&mut self, movement: Vec2) -> Response {
        if !self.dragging {
            return Response::empty();
        }
        let along = if self.vertical { movement.y } else { movement.x };
        if along == 0.0 {
            return Response::CONSUMED;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Pointer deltas are small; f32 precision is what the value is stored in."
        )]
        let along = along as f32;
        Response::CONSUMED | self.set_value(self.value + along * self.step())
    }

    /// Pointer released. Ends an action if a drag was in progress.
    pub fn release(&mut self) -> Response {
        if core::mem::take(&mut self.dragging) {
            Response::CONSUMED | Response::ACTION_ENDED
        } else {
            Response::empty()
        }
    }

    /// Handle a key typed while the control is hovered.
    pub fn key(&mut self, key: &KeyEvent, now_ms: u64) -> Response {
        if key.code == KeyCode::Escape {
            if self.state(now_ms) != InputState::NumpadActive {
                return Response::empty();
            }
            self.buffer.cancel();
            return Response::CONSUMED;
        }
        let Some(ch) = key.typed_char() else {
            return Response::empty();
        };
        let replace = self.buffer.is_replace_mode(now_ms);
        match ch {
            '0'..='9' => {
                self.buffer.touch(now_ms);
                if replace {
                    self.buffer.replace(ch);
                    if ch != '0' {
                        self.set_precision_index(self.ladder.first_whole_index());
                    }
                } else {
                    self.buffer.push(ch);
                }
                Response::CONSUMED
            }
            '.' | ',' if !self.integral => {
                if replace {
                    self.buffer.clear();
                }
                self.buffer.touch(now_ms);
                self.buffer.push_decimal_separator();
                Response::CONSUMED
            }
            '+' | '-' => {
                if replace {
                    Response::CONSUMED | Response::ACTION_ENDED | self.set_value(-self.value)
                } else {
                    Response::empty()
                }
            }
            '*' => {
                self.coarser();
                Response::CONSUMED
            }
            '/' => {
                self.finer();
                Response::CONSUMED
            }
            'r' => self.reset(),
            _ => Response::empty(),
        }
    }

    /// Per-frame tick. Commits a buffered entry once the buffer delay has elapsed.
    ///
    /// A parse failure leaves the value unchanged and is logged.
    pub fn update(&mut self, now_ms: u64) -> Response {
        self.show_committed_buffer = false;
        if !self.buffer.is_ready_to_commit(now_ms) {
            return Response::empty();
        }
        let text = self.buffer.take_for_commit();
        self.show_committed_buffer = true;
        match parse_number(&text) {
            Ok(parsed) => {
                let response = self.set_value(parsed);
                self.derive_precision_from_text(&text);
                response | Response::ACTION_ENDED
            }
            Err(err) => {
                log::warn!("numeric entry ignored: {err}");
                Response::empty()
            }
        }
    }

    /// Reset to the default value, if there is one.
    pub fn reset(&mut self) -> Response {
        if !self.default.is_finite() {
            return Response::empty();
        }
        Response::CONSUMED | Response::ACTION_ENDED | self.set_value(self.default)
    }

    /// Set the value from pasted text.
    pub fn paste(&mut self, text: &str) -> Result<Response, ParseNumberError> {
        let parsed = parse_number(text)?;
        Ok(Response::CONSUMED | Response::ACTION_ENDED | self.set_value(parsed))
    }

    /// Text placed on the clipboard by a copy: the displayed value, with a trailing `.`
    /// completed to `.0`.
    pub fn copy_text(&self, now_ms: u64) -> String {
        let mut text = self.display_value(now_ms);
        if text.ends_with('.') {
            text.push('0');
        }
        text
    }

    /// Value as displayed.
    ///
    /// Shows the keyboard buffer while it is active and for one update after commit, so the
    /// display does not flicker back to the old value.
    pub fn display_value(&self, now_ms: u64) -> String {
        if self.is_numpad_active(now_ms) || self.show_committed_buffer {
            return self.buffer.text().to_string();
        }
        format_value(self.value, self.step(), self.integral)
    }

    /// Display value with a cursor marker while typing.
    pub fn display_with_cursor(&self, now_ms: u64) -> String {
        let mut text = self.display_value(now_ms);
        if self.is_numpad_active(now_ms) {
            text.push('_');
        }
        text
    }

    /// Normalized position of the value within its bounds, or `None` when unconstrained.
    pub fn normalized(&self) -> Option<f32> {
        let b = self.bounds?;
        if b.max <= b.min {
            return Some(1.0);
        }
        Some(((self.value - b.min) / (b.max - b.min)).clamp(0.0, 1.0))
    }

    fn constrain(&mut self) -> bool {
        let Some(b) = self.bounds else {
            return false;
        };
        let clipped = self.value > b.max || self.value < b.min;
        self.value = self.value.clamp(b.min, b.max);
        clipped
    }

    fn derive_precision_from_value(&mut self) {
        let text = format!("{}", self.value);
        self.derive_precision_from_text(&text);
    }

    fn derive_precision_from_text(&mut self, text: &str) {
        let text = text.trim();
        let index = if text == "0" || text == "0.0" {
            self.ladder
                .index_of(0.1)
                .unwrap_or_else(|| self.ladder.first_whole_index())
        } else if let Some((_, fraction)) = text.split_once(['.', ',']) {
            self.ladder.index_for_fraction_digits(fraction.len())
        } else {
            self.ladder.first_whole_index()
        };
        self.set_precision_index(index);
    }
}

/// Format `value` with the fractional digits of `step`; whole steps show the value rounded
/// down.
pub fn format_value(value: f32, step: f32, integral: bool) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let digits = fraction_digits(step);
    if digits > 0 && !integral {
        format!("{value:.digits$}")
    } else {
        format!("{:.0}", floor_f32(value))
    }
}

/// Nearest whole number, halves rounding up.
fn round_f32(value: f32) -> f32 {
    floor_f32(value + 0.5)
}

/// `f32::floor` without `std`.
fn floor_f32(value: f32) -> f32 {
    // Beyond 2^23 every f32 is already a whole number.
    if !(value > -8_388_608.0 && value < 8_388_608.0) {
        return value;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Range checked above; the value fits in i32."
    )]
    let truncated = value as i32 as f32;
    if truncated > value {
        truncated - 1.0
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Modifiers;

    fn type_keys(input: &mut NumericInput, keys: &str, start_ms: u64) -> u64 {
        let mut t = start_ms;
        for ch in keys.chars() {
            input.key(&KeyEvent::char(ch), t);
            t += 100;
        }
        t
    }

    #[test]
    fn typed_whole_number_commits_after_delay() {
        let mut input = NumericInput::new(0.25);
        let t = type_keys(&mut input, "123", 0);
        assert_eq!(input.state(t), InputState::NumpadActive);
        assert!(input.update(t).is_empty());
        assert_eq!(input.value(), 0.25);

        let response = input.update(t + 600);
        assert!(response.contains(Response::ACTION_ENDED));
        assert_eq!(input.value(), 123.0);
        assert_eq!(input.step(), 1.0);
        assert_eq!(input.state(t + 600), InputState::Idle);
    }

    #[test]
    fn typed_fraction_selects_matching_precision() {
        let mut input = NumericInput::new(0.0);
        let t = type_keys(&mut input, "1.5", 0);
        input.update(t + 1000);
        assert_eq!(input.value(), 1.5);
        assert_eq!(input.step(), 0.1);
        assert_eq!(input.display_value(t + 2000), "1.5");
    }

    #[test]
    fn key_after_delay_replaces_buffer() {
        let mut input = NumericInput::new(0.0);
        input.key(&KeyEvent::char('5'), 0);
        input.key(&KeyEvent::char('6'), 1000);
        assert_eq!(input.display_value(1000), "6");
        input.update(2000);
        assert_eq!(input.value(), 6.0);
    }

    #[test]
    fn leading_zero_keeps_precision() {
        let mut input = NumericInput::new(0.25);
        assert_eq!(input.step(), 0.01);
        input.key(&KeyEvent::char('0'), 0);
        assert_eq!(input.step(), 0.01);
        input.key(&KeyEvent::char('7'), 100);
        assert_eq!(input.step(), 0.01);
        input.update(1000);
        assert_eq!(input.value(), 7.0);
        assert_eq!(input.step(), 1.0);
    }

    #[test]
    fn decimal_separator_prefixes_zero_and_is_not_duplicated() {
        let mut input = NumericInput::new(3.0);
        let t = type_keys(&mut input, ".5.,", 0);
        assert_eq!(input.display_value(t), "0.5");
        input.update(t + 1000);
        assert_eq!(input.value(), 0.5);
    }

    #[test]
    fn dangling_separator_commits_as_whole_value() {
        let mut input = NumericInput::new(0.0);
        let t = type_keys(&mut input, "4.", 0);
        input.update(t + 1000);
        assert_eq!(input.value(), 4.0);
        assert_eq!(input.step(), 0.1);
    }

    #[test]
    fn committed_buffer_shows_for_one_more_update() {
        let mut input = NumericInput::new(0.0);
        let t = type_keys(&mut input, "2.50", 0);
        input.update(t + 1000);
        assert_eq!(input.display_value(t + 1000), "2.50");
        input.update(t + 1100);
        assert_eq!(input.display_value(t + 1100), "2.50");
        assert_eq!(input.step(), 0.01);
    }

    #[test]
    fn sign_keys_negate_when_not_typing() {
        let mut input = NumericInput::new(2.5);
        let response = input.key(&KeyEvent::char('-'), 0);
        assert!(response.contains(Response::ACTION_ENDED));
        assert_eq!(input.value(), -2.5);
        input.key(&KeyEvent::char('+'), 1000);
        assert_eq!(input.value(), 2.5);

        input.key(&KeyEvent::char('1'), 2000);
        assert!(input.key(&KeyEvent::char('-'), 2100).is_empty());
        assert_eq!(input.value(), 2.5);
    }

    #[test]
    fn multiply_and_divide_step_precision_within_bounds() {
        let mut input = NumericInput::new(1.0);
        assert_eq!(input.precision_index(), 4);
        for _ in 0..10 {
            input.key(&KeyEvent::char('*'), 0);
        }
        assert_eq!(input.precision_index(), 6);
        for _ in 0..10 {
            input.key(&KeyEvent::char('/'), 0);
        }
        assert_eq!(input.precision_index(), 0);
    }

    #[test]
    fn wheel_moves_one_step_per_event() {
        let mut input = NumericInput::new(1.0);
        assert_eq!(input.step(), 1.0);
        for _ in 0..3 {
            input.wheel(1);
        }
        assert_eq!(input.precision_index(), 1);
        assert_eq!(input.step(), 0.001);

        input.wheel(-5);
        assert_eq!(input.precision_index(), 2);
        for notches in [1, 1, 1, 1, -1, 3, 3, 3, -9, -9, -9, -9, -9, -9, -9, -9] {
            input.wheel(notches);
            assert!(input.precision_index() < input.ladder().len());
        }
        assert_eq!(input.precision_index(), 6);
    }

    #[test]
    fn drag_is_clipped_to_bounds() {
        let mut input = NumericInput::new(0.9).with_bounds(0.0, 1.0);
        assert_eq!(input.step(), 0.1);
        input.press();
        assert_eq!(input.state(0), InputState::Dragging);
        let response = input.drag(Vec2::new(5.0, 0.0));
        assert!(response.contains(Response::CONSTRAINED));
        assert_eq!(input.value(), 1.0);

        let response = input.drag(Vec2::new(-1.0, 0.0));
        assert!(!response.contains(Response::CONSTRAINED));

        assert!(input.release().contains(Response::ACTION_ENDED));
        assert_eq!(input.state(0), InputState::Idle);
        assert!(input.release().is_empty());
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut input = NumericInput::new(1.0);
        assert!(input.drag(Vec2::new(10.0, 0.0)).is_empty());
        assert_eq!(input.value(), 1.0);
    }

    #[test]
    fn vertical_mode_uses_y_axis() {
        let mut input = NumericInput::new(10.0);
        input.vertical = true;
        input.press();
        input.drag(Vec2::new(100.0, 2.0));
        assert_eq!(input.value(), 12.0);
    }

    #[test]
    fn unbounded_infinite_limits_do_not_constrain() {
        let input = NumericInput::new(5.0).with_bounds(f32::NEG_INFINITY, f32::MAX);
        assert!(input.bounds().is_none());
        assert!(input.normalized().is_none());
    }

    #[test]
    fn paste_rejects_garbage_and_keeps_value() {
        let mut input = NumericInput::new(1.0);
        let err = input.paste("twelve").unwrap_err();
        assert_eq!(err.input(), "twelve");
        assert_eq!(input.value(), 1.0);
        assert!(input.paste("nan").is_err());

        let response = input.paste(" 3,25 ").unwrap();
        assert!(response.contains(Response::ACTION_ENDED));
        assert_eq!(input.value(), 3.25);
    }

    #[test]
    fn control_shortcuts_are_not_numpad_input() {
        let mut input = NumericInput::new(1.0);
        let ev = KeyEvent::char('5').with_modifiers(Modifiers::CONTROL);
        assert!(input.key(&ev, 0).is_empty());
        assert_eq!(input.state(0), InputState::Idle);
    }

    #[test]
    fn reset_restores_default() {
        let mut input = NumericInput::new(2.0);
        input.set_value(7.0);
        input.key(&KeyEvent::char('r'), 0);
        assert_eq!(input.value(), 2.0);

        let mut no_default = NumericInput::new(f32::NAN);
        assert_eq!(no_default.value(), 0.0);
        assert!(no_default.reset().is_empty());
    }

    #[test]
    fn integral_controls_stay_whole() {
        let mut input = NumericInput::new(36.0).integral();
        assert_eq!(input.step(), 1.0);
        input.finer();
        assert_eq!(input.step(), 1.0);
        assert!(input.key(&KeyEvent::char('.'), 0).is_empty());
        input.set_value(12.7);
        assert_eq!(input.value(), 13.0);
        assert_eq!(input.int_value(), 13);
        assert_eq!(input.display_value(0), "13");
    }

    #[test]
    fn sub_step_drag_keeps_whole_numbers() {
        let mut input = NumericInput::new(12.0).integral();
        input.press();
        input.drag(Vec2::new(0.4, 0.0));
        assert_eq!(input.value(), 12.0);
        input.drag(Vec2::new(0.5, 0.0));
        assert_eq!(input.value(), 13.0);
        input.drag(Vec2::new(-0.6, 0.0));
        assert_eq!(input.value(), 12.0);
        assert_eq!(NumericInput::new(2.5).integral().value(), 3.0);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let mut input = NumericInput::new(4.0).with_bounds(0.0, 10.0);
        assert!(input.set_value(f32::NAN).is_empty());
        assert!(input.set_value(f32::INFINITY).is_empty());
        assert!(input.set_value(f32::NEG_INFINITY).is_empty());
        assert_eq!(input.value(), 4.0);
        assert!(input.set_value(11.0).contains(Response::CONSTRAINED));
        assert_eq!(input.value(), 10.0);
    }

    #[test]
    fn escape_discards_typed_entry() {
        let mut input = NumericInput::new(1.5);
        assert!(input.key(&KeyEvent::named(KeyCode::Escape), 0).is_empty());

        let t = type_keys(&mut input, "42", 0);
        assert!(input.is_numpad_active(t));
        assert_eq!(input.display_with_cursor(t), "42_");
        let response = input.key(&KeyEvent::named(KeyCode::Escape), t);
        assert_eq!(response, Response::CONSUMED);
        assert!(!input.is_numpad_active(t));
        assert_eq!(input.state(t), InputState::Idle);
        assert!(input.update(t + 1000).is_empty());
        assert_eq!(input.value(), 1.5);
        assert_eq!(input.display_value(t + 1000), "1.5");
    }

    #[test]
    fn display_formats_by_step() {
        assert_eq!(format_value(1.23456, 0.01, false), "1.23");
        assert_eq!(format_value(-1.5, 1.0, false), "-2");
        assert_eq!(format_value(f32::NAN, 1.0, false), "NaN");
        assert_eq!(format_value(7.9, 0.1, true), "7");
    }

    #[test]
    fn copy_completes_trailing_separator() {
        let mut input = NumericInput::new(0.0);
        input.key(&KeyEvent::char('3'), 0);
        input.key(&KeyEvent::char('.'), 10);
        assert_eq!(input.copy_text(20), "3.0");
    }
}
