//! Generated letter commands.

use std::path::PathBuf;

use crate::cli::PdfCommand;
use crate::output::{output_single, success};

use super::App;

/// Runs a PDF command.
pub async fn run_pdf(app: &App, cmd: PdfCommand) -> crate::CliResult<()> {
    app.require_user()?;

    match cmd {
        PdfCommand::Generate { request_id } => {
            let pdf = app.api().generate_pdf(request_id).await?;
            success(&format!(
                "Generated {} (reference {})",
                pdf.file_name, pdf.reference_number
            ));
            output_single(&pdf, app.format())
        }
        PdfCommand::Download { reference, file } => {
            let bytes = app.api().download_pdf(&reference).await?;
            let path = file.unwrap_or_else(|| default_file_name(&reference));
            std::fs::write(&path, &bytes)?;
            success(&format!("Saved {} bytes to {}", bytes.len(), path.display()));
            Ok(())
        }
    }
}

/// File name used when none is given: the reference with path separators
/// replaced.
fn default_file_name(reference: &str) -> PathBuf {
    let safe: String = reference
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    PathBuf::from(format!("{safe}.pdf"))
}
