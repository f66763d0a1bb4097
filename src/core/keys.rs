use super::pose::SECTIONS;

/// Global keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    CycleMascot,
    CloseContact,
    JumpTo(&'static str),
}

/// Section anchor for digit keys `1`..=`6`, in document order.
#[inline]
pub fn section_for_digit(key: &str) -> Option<&'static str> {
    let digit: usize = key.parse().ok()?;
    let index = digit.checked_sub(1)?;
    SECTIONS.get(index).map(|s| s.id)
}

pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    match key {
        "m" | "M" => Some(KeyCommand::CycleMascot),
        "Escape" => Some(KeyCommand::CloseContact),
        _ => section_for_digit(key).map(KeyCommand::JumpTo),
    }
}
