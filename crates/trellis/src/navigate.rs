//! Clicked-node text to item-key matching.
//!
//! Rendered nodes display more than the key (status lines, placeholder
//! text), and click handlers hand back whatever the display text was. Only
//! text that actually looks like an item key should become a navigation.

/// Upper bound on an item key's length; anything longer is display text.
const MAX_KEY_LENGTH: usize = 32;

/// Extract the item key from clicked display text, if there is one.
///
/// Accepts exactly `LETTERS '-' DIGITS` (ASCII) within the length bound,
/// after trimming whitespace. Everything else yields `None`.
///
/// Explicit character checks instead of a regex keep the dependency
/// footprint down and the error surface obvious.
pub fn item_key(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.is_empty() || text.len() > MAX_KEY_LENGTH {
        return None;
    }

    let (prefix, digits) = text.split_once('-')?;
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(text)
}
