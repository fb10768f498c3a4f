//! Parser and formatter for Modelfiles.
//!
//! A Modelfile is a line-oriented list of directives (`FROM`, `LICENSE`,
//! `TEMPLATE`, `SYSTEM`, `PROMPT`, `ADAPTER`, `PARAMETER`) describing how
//! to assemble a runnable model.  Arguments may be wrapped in `"…"` or
//! `"""…"""` to span several lines.
//!
//! * **scanner** — quote-aware, incremental line splitting over any
//!   [`std::io::Read`].
//! * **parser** — turns scanner tokens into an ordered [`Directive`] list.
//! * **format** — writes a directive list back out in canonical form.

pub mod diagnostics;
pub mod error;
pub mod format;
pub mod parser;
pub mod scanner;
pub mod types;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
pub use error::{ModelfileError, Result};
pub use format::{format, to_string};
pub use parser::{parse, parse_with};
pub use scanner::{Scan, Scanner, Token, scan_modelfile};
pub use types::{DEFAULT_MAX_TOKEN_SIZE, Directive, Keyword, ParseOptions};
