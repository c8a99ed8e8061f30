/// Outcome of the most recent send, shown in the panel's status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connected,
    Sending,
    Error,
    DemoMode,
}

impl ConnectionStatus {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Connected => "CONNECTED",
            Self::Sending => "SENDING...",
            Self::Error => "ERROR",
            Self::DemoMode => "DEMO MODE",
        }
    }
}
