use modelfile::{Diagnostic, ParseOptions};
use tracing::{info, warn};

use crate::cli::{FmtArgs, is_stdin, read_input};

pub fn execute(args: FmtArgs, options: &ParseOptions) -> anyhow::Result<()> {
    let data = read_input(&args.path)?;
    let formatted = canonicalize(&data, options)?;

    if args.check {
        if formatted.as_bytes() != data.as_slice() {
            anyhow::bail!("{} is not in canonical form", args.path.display());
        }
        info!(path = %args.path.display(), "already canonical");
        return Ok(());
    }

    if args.write {
        if is_stdin(&args.path) {
            anyhow::bail!("--write needs a file path, not stdin");
        }
        std::fs::write(&args.path, formatted)?;
        info!(path = %args.path.display(), "rewritten");
        return Ok(());
    }

    print!("{formatted}");
    Ok(())
}

/// Parse `data` and render it back in canonical form.
///
/// Unknown commands and comments do not survive the round trip.
fn canonicalize(data: &[u8], options: &ParseOptions) -> anyhow::Result<String> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let directives = modelfile::parse_with(data, options, &mut diagnostics)?;
    for diagnostic in &diagnostics {
        warn!("dropping {diagnostic}");
    }
    Ok(modelfile::to_string(&directives))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_normalizes_quoting() {
        let input = b"# base\nfrom llama2\nsystem \"be brief\"\nparameter stop \"\"\"###\"\"\"\n";
        let out = canonicalize(input, &ParseOptions::default()).unwrap();
        assert_eq!(out, "FROM llama2\nSYSTEM be brief\nPARAMETER stop ###\n");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let input = b"FROM llama2\nTEMPLATE \"{{ .System }}\n{{ .Prompt }}\"\n";
        let once = canonicalize(input, &ParseOptions::default()).unwrap();
        let twice = canonicalize(once.as_bytes(), &ParseOptions::default()).unwrap();
        assert_eq!(once, "FROM llama2\nTEMPLATE \"\"\"{{ .System }}\n{{ .Prompt }}\"\"\"\n");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_canonicalize_propagates_errors() {
        let err = canonicalize(b"LICENSE MIT\n", &ParseOptions::default()).unwrap_err();
        assert!(err.to_string().contains("no FROM line"));
    }

    #[test]
    fn test_write_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Modelfile");
        std::fs::write(&path, "from llama2\nparameter top_k 40\n").unwrap();

        execute(
            FmtArgs {
                path: path.clone(),
                check: false,
                write: true,
            },
            &ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "FROM llama2\nPARAMETER top_k 40\n"
        );

        // Now canonical, so --check passes.
        execute(
            FmtArgs {
                path,
                check: true,
                write: false,
            },
            &ParseOptions::default(),
        )
        .unwrap();
    }
}
