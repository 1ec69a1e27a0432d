use wallcat_platformer::level::LevelError;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("usage: wallcat-headless <level.txt> [script.toml]")]
    Usage,
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse input script {path}: {source}")]
    Script {
        path: String,
        source: toml::de::Error,
    },
    #[error("failed to write frame: {0}")]
    Output(std::io::Error),
    #[error("failed to encode frame: {0}")]
    Frame(#[from] serde_json::Error),
}
