use serde::Deserialize;
use serde::Serialize;

/// Layout settings consumed by the printer and carried for builder callers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FormatSettings {
    /// Maximum line width that the printer will try to stay within.
    ///
    /// Default: 80
    #[serde(default = "default_print_width")]
    pub print_width: usize,

    /// Number of columns added per indentation level.
    ///
    /// Default: 2
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Quote style preferred by the caller when it emits string literals.
    ///
    /// The engine never inspects this value; it is stored so that the
    /// driver of a [`Builder`](crate::builder::Builder) can consult it
    /// without threading its own configuration alongside.
    ///
    /// Default: double
    #[serde(default)]
    pub preferred_quote: Quote,

    /// Whether the caller should emit trailing commas in multi-line
    /// delimited constructs. Carried, never interpreted.
    ///
    /// Default: true
    #[serde(default = "default_true")]
    pub trailing_comma: bool,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            print_width: default_print_width(),
            indent_width: default_indent_width(),
            preferred_quote: Quote::default(),
            trailing_comma: default_true(),
        }
    }
}

/// String quote style carried for builder callers.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quote {
    #[default]
    Double,
    Single,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }
}

fn default_print_width() -> usize {
    80
}

fn default_indent_width() -> usize {
    2
}

fn default_true() -> bool {
    true
}
