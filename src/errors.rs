//! Tailless Error Handling
//!
//! Every stage of the pipeline fails through the single `TaillessError` type.
//! Errors are fail-fast: the first one raised aborts the run.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Source text attached to an error so diagnostics can point at the line.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }

    pub fn line_span(&self, line: usize) -> Option<SourceSpan> {
        line_span(&self.content, line)
    }
}

/// Byte span of a 1-based line, excluding its terminator.
fn line_span(content: &str, line: usize) -> Option<SourceSpan> {
    let mut offset = 0;
    for (index, text) in content.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let len = text.trim_end_matches(['\n', '\r']).len();
            return Some((offset, len).into());
        }
        offset += text.len();
    }
    None
}

// ============================================================================
// ERROR KINDS
// ============================================================================

/// Everything that can go wrong while compiling a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    // Syntax errors - brace structure
    #[error("Unexpected brace")]
    UnexpectedBrace,
    #[error("Missing opening brace")]
    MissingOpeningBrace,
    #[error("Invalid opening brace")]
    InvalidOpeningBrace,
    #[error("Missing braces at end of file")]
    MissingBraces,

    // Reference errors - name resolution
    #[error("Mixin '{name}' not found")]
    MixinNotFound { name: String },
    #[error("Invalid parent mixin '{name}'")]
    InvalidParentMixin { name: String },
    #[error("Variable '{name}' not found")]
    VariableNotFound { name: String },
    #[error("Variable '{name}' expands recursively")]
    RecursiveVariable { name: String },

    // IO errors
    #[error("Cannot read '{path}': {message}")]
    Read { path: String, message: String },
    #[error("Cannot write '{path}': {message}")]
    Write { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Syntax,
    Reference,
    Io,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Reference => "reference",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnexpectedBrace
            | Self::MissingOpeningBrace
            | Self::InvalidOpeningBrace
            | Self::MissingBraces => ErrorCategory::Syntax,

            Self::MixinNotFound { .. }
            | Self::InvalidParentMixin { .. }
            | Self::VariableNotFound { .. }
            | Self::RecursiveVariable { .. } => ErrorCategory::Reference,

            Self::Read { .. } | Self::Write { .. } => ErrorCategory::Io,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::UnexpectedBrace => "unexpected_brace",
            Self::MissingOpeningBrace => "missing_opening_brace",
            Self::InvalidOpeningBrace => "invalid_opening_brace",
            Self::MissingBraces => "missing_braces",
            Self::MixinNotFound { .. } => "mixin_not_found",
            Self::InvalidParentMixin { .. } => "invalid_parent_mixin",
            Self::VariableNotFound { .. } => "variable_not_found",
            Self::RecursiveVariable { .. } => "recursive_variable",
            Self::Read { .. } => "read",
            Self::Write { .. } => "write",
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            Self::MissingOpeningBrace => Some("selectors and at-rules must be followed by a `{` block"),
            Self::InvalidOpeningBrace => Some("only a selector or an at-rule may open a block"),
            Self::MissingBraces => Some("every `{` needs a matching `}`"),
            Self::MixinNotFound { .. } => {
                Some("define the mixin as `name() { ... }` in this block or an enclosing one")
            }
            Self::InvalidParentMixin { .. } => Some("a mixin cannot be called from inside its own body"),
            Self::VariableNotFound { .. } => {
                Some("declare it as `@name: value;` in this block or an enclosing one")
            }
            Self::RecursiveVariable { .. } => Some("a variable's value keeps referring back to itself"),
            _ => None,
        }
    }

    fn primary_label(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Syntax => "malformed block structure",
            ErrorCategory::Reference => "unresolved reference",
            ErrorCategory::Io => "io failure",
        }
    }
}

// ============================================================================
// THE ERROR TYPE
// ============================================================================

#[derive(Debug, Clone)]
pub struct TaillessError {
    /// What went wrong
    pub kind: ErrorKind,
    /// 1-based source line, when the error is tied to one
    pub line: Option<usize>,
    source: Option<Arc<NamedSource<String>>>,
}

impl TaillessError {
    pub fn new(kind: ErrorKind, line: Option<usize>) -> Self {
        Self {
            kind,
            line,
            source: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn code(&self) -> String {
        format!("tailless::{}::{}", self.category(), self.kind.code_suffix())
    }

    /// Attaches source text for rich diagnostics.
    pub fn with_source(mut self, source: SourceContext) -> Self {
        self.source = Some(source.to_named_source());
        self
    }

    pub fn read_failed(path: &Path, err: &std::io::Error) -> Self {
        Self::new(
            ErrorKind::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            },
            None,
        )
    }

    pub fn write_failed(path: &Path, err: &std::io::Error) -> Self {
        Self::new(
            ErrorKind::Write {
                path: path.display().to_string(),
                message: err.to_string(),
            },
            None,
        )
    }
}

impl std::error::Error for TaillessError {}

impl fmt::Display for TaillessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Diagnostic for TaillessError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = line_span(self.source.as_ref()?.inner(), self.line?)?;
        let label = LabeledSpan::new_with_span(Some(self.kind.primary_label().into()), span);
        Some(Box::new(std::iter::once(label)))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source
            .as_ref()
            .map(|s| &**s as &dyn miette::SourceCode)
    }
}

// ============================================================================
// CONTEXT-AWARE CONSTRUCTION
// ============================================================================

/// Anything that knows its own source line can report errors against it.
pub trait ErrorReporting {
    fn source_line(&self) -> usize;

    fn report(&self, kind: ErrorKind) -> TaillessError {
        TaillessError::new(kind, Some(self.source_line()))
    }

    fn mixin_not_found(&self, name: &str) -> TaillessError {
        self.report(ErrorKind::MixinNotFound { name: name.into() })
    }

    fn invalid_parent_mixin(&self, name: &str) -> TaillessError {
        self.report(ErrorKind::InvalidParentMixin { name: name.into() })
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints a TaillessError with full miette diagnostics
pub fn print_error(error: TaillessError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
