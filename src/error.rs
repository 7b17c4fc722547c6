use std::fmt;

/// The main error type for value decoding and typed extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    /// Raised when a codec position matches none of the known kinds,
    /// or when nesting exceeds the configured depth.
    DecodeError {
        message: String,
        depth: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a value is extracted as a type its kind cannot produce.
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl ValueError {
    /// Decode failure for a position that satisfied none of the probes.
    pub fn undecodable(depth: usize) -> Self {
        ValueError::DecodeError {
            message: "value cannot be decoded into any known kind".into(),
            depth,
            hint: Some("Expected null, integer, float, boolean, string, sequence or string-keyed map".into()),
            code: Some(500),
        }
    }

    /// Decode failure for input nested deeper than `max_depth`.
    pub fn depth_exceeded(max_depth: usize) -> Self {
        ValueError::DecodeError {
            message: format!("nesting exceeds maximum depth of {}", max_depth),
            depth: max_depth,
            hint: Some("Raise DecodeOptions::max_depth if the input is trusted".into()),
            code: Some(501),
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            ValueError::DecodeError { code, .. } | ValueError::TypeError { code, .. } => *code,
        }
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::DecodeError { message, depth, hint, code } =>
                write!(f, "[VALUE] Decode Error at depth {}: {}{}{}",
                    depth, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ValueError::TypeError { message, hint, code } =>
                write!(f, "[VALUE] Type Error: {}{}{}",
                    message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
        }
    }
}

impl std::error::Error for ValueError {}
