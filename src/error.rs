pub mod prelude {
    pub use super::EngineError;
}

/// Errors reported by the engine's construction and parsing paths.
///
/// Runtime scheduling events (missed deadlines, idle ticks, exhausted
/// budgets) are never represented here — they are data, recorded on the
/// scheduler, not errors. `EngineError` only covers failures that keep a
/// simulation from starting.
#[derive(Debug)]
pub enum EngineError {
    IoOpenFailed { path: String, source: std::io::Error },
    ParseError { line: usize, text: String, detail: String },
    UnknownAlgorithm(String),
    MissingServerConfig(String),
    UnknownPolicy(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use EngineError::*;

        match self {
            IoOpenFailed { path, source } =>
                write!(f, "could not open input file '{path}': {source}"),
            ParseError { line, text, detail } =>
                write!(f, "parse error at line {line} ('{text}'): {detail}"),
            UnknownAlgorithm(name) =>
                write!(f, "unknown algorithm: '{name}'"),
            MissingServerConfig(name) =>
                write!(f, "{name} requires a server config ('D' line in the input file)"),
            UnknownPolicy(name) =>
                write!(f, "unknown priority policy: '{name}'"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::IoOpenFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
