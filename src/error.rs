use std::fmt;

#[derive(Debug)]
pub enum SetBenchError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    Memory(String),
    Other(String),
}

impl fmt::Display for SetBenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetBenchError::Io(e) => write!(f, "IO error: {}", e),
            SetBenchError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SetBenchError::Memory(e) => write!(f, "Memory snapshot error: {}", e),
            SetBenchError::Other(e) => write!(f, "Error: {}", e),
        }
    }
}

impl std::error::Error for SetBenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetBenchError::Io(e) => Some(e),
            SetBenchError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SetBenchError {
    fn from(err: std::io::Error) -> Self {
        SetBenchError::Io(err)
    }
}

impl From<serde_json::Error> for SetBenchError {
    fn from(err: serde_json::Error) -> Self {
        SetBenchError::Serialization(err)
    }
}

impl From<String> for SetBenchError {
    fn from(err: String) -> Self {
        SetBenchError::Other(err)
    }
}

impl From<&str> for SetBenchError {
    fn from(err: &str) -> Self {
        SetBenchError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(SetBenchError::from("boom").to_string(), "Error: boom");
        assert_eq!(
            SetBenchError::Memory("no pid".to_string()).to_string(),
            "Memory snapshot error: no pid"
        );
    }

    #[test]
    fn test_from_io_keeps_source() {
        let err: SetBenchError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
