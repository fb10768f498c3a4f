//! Canonical Modelfile output.

use std::fmt;
use std::io::Write;

use crate::error::Result;
use crate::types::{Directive, Keyword};

const MULTILINE_QUOTE: &str = "\"\"\"";

/// Write `directives` one per line in canonical form.
///
/// Arguments containing a newline are wrapped in triple quotes; anything
/// else is written bare.  Re-parsing the output yields the same list as
/// long as no argument contains `"` (a bare `"` is read back as a quote
/// opener, and `"""` inside a multi-line value closes it early) or `\r`.
pub fn format<W: Write>(w: &mut W, directives: &[Directive]) -> Result<()> {
    for directive in directives {
        writeln!(w, "{directive}")?;
    }
    Ok(())
}

/// [`format`] into a `String`.
pub fn to_string(directives: &[Directive]) -> String {
    directives.iter().map(|d| format!("{d}\n")).collect()
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = if self.args.contains('\n') {
            MULTILINE_QUOTE
        } else {
            ""
        };

        match Keyword::from_name(&self.name) {
            Some(
                keyword @ (Keyword::From
                | Keyword::Adapter
                | Keyword::License
                | Keyword::Template
                | Keyword::System),
            ) => write!(f, "{} {quote}{}{quote}", keyword.as_upper(), self.args),
            _ => write!(f, "PARAMETER {} {quote}{}{quote}", self.name, self.args),
        }
    }
}
