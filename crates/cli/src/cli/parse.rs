use modelfile::{Diagnostic, ParseOptions};
use tracing::{info, warn};

use crate::cli::{ParseArgs, read_input};

pub fn execute(args: ParseArgs, options: &ParseOptions, strict: bool) -> anyhow::Result<()> {
    let data = read_input(&args.path)?;

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let directives = modelfile::parse_with(data.as_slice(), options, &mut diagnostics)?;

    for diagnostic in &diagnostics {
        warn!(path = %args.path.display(), "{diagnostic}");
    }
    if (args.strict || strict) && !diagnostics.is_empty() {
        anyhow::bail!(
            "{}: {} unknown command(s) in strict mode",
            args.path.display(),
            diagnostics.len()
        );
    }

    info!(path = %args.path.display(), directives = directives.len(), "parsed");
    println!("{}", serde_json::to_string_pretty(&directives)?);
    Ok(())
}
