pub mod number;

pub use number::{format_currency, format_grouped, format_percent, Sign};

/// Serializes tests that touch the global `rust_i18n` locale
#[cfg(test)]
pub(crate) static TEST_LOCALE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
