use strum::{Display as StrumDisplay, EnumString};

/// Raw touch lifecycle events, the whole input surface of the control.
/// Parseable from the spellings accepted on the control socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum TouchPhase {
    #[strum(serialize = "press", serialize = "down", serialize = "began")]
    Began,
    #[strum(serialize = "release", serialize = "up", serialize = "ended")]
    Ended,
    #[strum(serialize = "cancel", serialize = "cancelled")]
    Cancelled,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Tick,
    Touch(TouchPhase),
    Tap(usize),
    ConfigReload,
    Quit,
}
