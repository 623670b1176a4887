//! PDF compilation — delegates entirely to the external `typst` executable.
//! Pagination, fonts, and page breaking are its job, not ours.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::errors::AppError;

const TYPST_BIN: &str = "typst";

/// Compiles `typst_path` to `pdf_path` with `typst compile`.
///
/// A missing executable and a failed compile both surface as `Render` errors
/// with the underlying detail attached.
pub fn compile_pdf(typst_path: &Path, pdf_path: &Path) -> Result<(), AppError> {
    debug!(
        "Invoking `{TYPST_BIN} compile {} {}`",
        typst_path.display(),
        pdf_path.display()
    );

    let output = Command::new(TYPST_BIN)
        .arg("compile")
        .arg(typst_path)
        .arg(pdf_path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::Render(format!(
                    "the `{TYPST_BIN}` executable was not found on PATH. Install Typst \
                    (https://typst.app) or pass --no-pdf to skip PDF generation."
                ))
            } else {
                AppError::Render(format!("failed to run `{TYPST_BIN}`: {e}"))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::Render(format!(
            "`{TYPST_BIN} compile` failed for `{}`:\n{}",
            typst_path.display(),
            stderr.trim()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The typst binary is an external collaborator and may not exist in the
    // test environment, so only the error paths are exercised here.

    #[test]
    fn test_missing_input_fails_with_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = compile_pdf(
            &dir.path().join("missing.typ"),
            &dir.path().join("out.pdf"),
        );
        // Either the binary is absent (NotFound branch) or the compile fails
        // on the missing input — both must be Render errors, never a panic.
        assert!(matches!(result, Err(AppError::Render(_))));
    }
}
