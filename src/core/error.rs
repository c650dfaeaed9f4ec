use thiserror::Error;

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("No free deployment cells left (requested cell #{requested})")]
    CellPoolExhausted { requested: usize },

    #[error("Preset generation needs {expected} unit templates, got {found}")]
    PresetTemplatesMissing { expected: usize, found: usize },

    #[error("Battle interrupted during round {round}")]
    Interrupted { round: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl BattleError {
    /// Setup bugs that must never be retried
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BattleError::CellPoolExhausted { .. }
                | BattleError::PresetTemplatesMissing { .. }
                | BattleError::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BattleError>;
