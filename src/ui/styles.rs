use std::sync::atomic::Ordering;

use atomic::Atomic;
use ratatui::style::{Color, Modifier, Style};
use rust_decimal::Decimal;

use crate::helper::Sign;

/// Which direction is painted green
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    bytemuck::NoUninit,
    strum::EnumString,
    strum::Display,
)]
#[repr(u8)]
#[strum(serialize_all = "kebab-case")]
pub enum ColorMode {
    RedUp,
    #[default]
    GreenUp,
}

static COLOR_MODE: Atomic<ColorMode> = Atomic::new(ColorMode::GreenUp);

pub fn set_color_mode(mode: ColorMode) {
    COLOR_MODE.store(mode, Ordering::Relaxed);
}

#[inline]
pub fn color_mode() -> ColorMode {
    COLOR_MODE.load(Ordering::Relaxed)
}

#[inline]
pub fn gray() -> Style {
    Style::default().fg(Color::Gray)
}

#[inline]
pub fn dark_gray() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[inline]
pub fn label() -> Style {
    Style::default().fg(Color::Gray)
}

#[inline]
pub fn text() -> Style {
    Style::default().fg(Color::Reset)
}

#[inline]
pub fn primary() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

#[inline]
pub fn border() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[inline]
pub fn error() -> Style {
    Style::default().fg(Color::LightRed)
}

#[inline]
pub fn button() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD)
}

#[inline]
pub fn badge() -> Style {
    Style::default().fg(Color::Yellow)
}

#[inline]
pub fn favorable_unfavorable() -> (Style, Style) {
    let red = Style::default().fg(Color::LightRed);
    let green = Style::default().fg(Color::LightGreen);
    match color_mode() {
        ColorMode::RedUp => (red, green),
        ColorMode::GreenUp => (green, red),
    }
}

/// Style for a 24h change; only a strictly positive change is favorable
#[inline]
pub fn change(value: Decimal) -> Style {
    let (favorable, unfavorable) = favorable_unfavorable();
    if value.positive() {
        favorable
    } else {
        unfavorable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn change_treatment_follows_sign() {
        let (favorable, unfavorable) = favorable_unfavorable();
        assert_eq!(change(dec!(5.67)), favorable);
        assert_eq!(change(dec!(-3.21)), unfavorable);
        assert_eq!(change(dec!(0)), unfavorable);
    }

    #[test]
    fn parses_color_mode() {
        assert_eq!("red-up".parse::<ColorMode>(), Ok(ColorMode::RedUp));
        assert_eq!("green-up".parse::<ColorMode>(), Ok(ColorMode::GreenUp));
        assert!("blue-up".parse::<ColorMode>().is_err());
        assert_eq!(ColorMode::RedUp.to_string(), "red-up");
    }
}
