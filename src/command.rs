use crate::schema::RawValue;

/// Represents user actions queued by the panels and applied by the host in order
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Switch to the catalog entry with this id
    Select(String),
    /// A settings control produced a new value
    ParameterInput {
        key: String,
        value: RawValue,
    },
    /// A button parameter was pressed
    Trigger(String),
    ToggleTheme,
    OpenExport,
    CopyExport,
    CloseExport,
    ToggleFullscreen,
}

impl HostCommand {
    pub fn input(key: &str, value: impl Into<RawValue>) -> Self {
        HostCommand::ParameterInput {
            key: key.to_owned(),
            value: value.into(),
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            HostCommand::Select(_) => "select",
            HostCommand::ParameterInput { .. } => "parameter input",
            HostCommand::Trigger(_) => "trigger",
            HostCommand::ToggleTheme => "toggle theme",
            HostCommand::OpenExport => "open export",
            HostCommand::CopyExport => "copy export",
            HostCommand::CloseExport => "close export",
            HostCommand::ToggleFullscreen => "toggle fullscreen",
        }
    }
}
