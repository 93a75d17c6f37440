use std::fmt;

/// The quote character wrapping a pair's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Quote {
    #[default]
    None,
    Single,
    Double,
}

impl Quote {
    pub fn as_str(self) -> &'static str {
        match self {
            Quote::None => "",
            Quote::Single => "'",
            Quote::Double => "\"",
        }
    }

    /// The quote to write `value` with so that parsing the line back gives
    /// the same value. Quoted styles always do; an unquoted value with
    /// surrounding whitespace or its own wrapping quotes is written double
    /// quoted instead.
    pub fn fitting(self, value: &str) -> Self {
        match self {
            Quote::None if value.trim() != value || Quote::wrapping(value) != Quote::None => {
                Quote::Double
            }
            quote => quote,
        }
    }

    /// The quote wrapping `value`, if both its first and last characters are
    /// the same quote character. A lone quote character does not wrap itself.
    fn wrapping(value: &str) -> Self {
        let bytes = value.as_bytes();
        if bytes.len() < 2 || bytes[0] != bytes[bytes.len() - 1] {
            return Quote::None;
        }
        match bytes[0] {
            b'\'' => Quote::Single,
            b'"' => Quote::Double,
            _ => Quote::None,
        }
    }
}

/// A single physical line of a `.env` file.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// Blank line, comment, or anything that is not a definition. Kept as-is.
    Passthrough(String),
    /// `KEY=VALUE`, with the value stored unquoted.
    Pair {
        key: String,
        value: String,
        quote: Quote,
        /// Text the pair was parsed from. `None` for pairs built in memory.
        source: Option<String>,
    },
}

impl Line {
    /// Parse one line of text.
    ///
    /// The text is split once at the first `=` and both sides are trimmed.
    /// Lines with no `=` or an empty key pass through untouched.
    pub fn parse(text: &str) -> Self {
        let Some((key, raw_value)) = text.split_once('=') else {
            return Line::Passthrough(text.to_string());
        };

        let key = key.trim();
        if key.is_empty() {
            return Line::Passthrough(text.to_string());
        }

        let raw_value = raw_value.trim();
        let quote = Quote::wrapping(raw_value);
        let value = match quote {
            Quote::None => raw_value,
            _ => &raw_value[1..raw_value.len() - 1],
        };

        Line::Pair {
            key: key.to_string(),
            value: value.to_string(),
            quote,
            source: Some(text.to_string()),
        }
    }

    pub fn from_pair(key: &str, value: &str, quote: Quote) -> Self {
        Line::Pair {
            key: key.to_string(),
            value: value.to_string(),
            quote,
            source: None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Line::Pair { key, .. } => Some(key),
            Line::Passthrough(_) => None,
        }
    }

    /// The unquoted value. Empty for pass-through lines.
    pub fn value(&self) -> &str {
        match self {
            Line::Pair { value, .. } => value,
            Line::Passthrough(_) => "",
        }
    }

    pub fn quote(&self) -> Quote {
        match self {
            Line::Pair { quote, .. } => *quote,
            Line::Passthrough(_) => Quote::None,
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Line::Pair { .. })
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.key() == Some(key)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Passthrough(text) => f.write_str(text),
            Line::Pair {
                source: Some(text), ..
            } => f.write_str(text),
            Line::Pair {
                key,
                value,
                quote,
                source: None,
            } => write!(f, "{}={}{}{}", key, quote.as_str(), value, quote.as_str()),
        }
    }
}
