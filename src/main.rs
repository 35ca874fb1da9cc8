// Entrypoint for the bulk import CLI.
// - Usage errors and an unreadable documents directory exit with code 1.
// - Per-file upload failures are reported but still exit with code 0.

use clap::error::ErrorKind;
use clap::Parser;
use log::debug;
use doc_bulk_import::{api::ApiClient, importer};
use std::path::PathBuf;
use std::process::ExitCode;

/// Upload every matching file under a directory to a document project.
#[derive(Parser, Debug)]
#[command(name = "doc-bulk-import", version, about)]
struct Cli {
    /// Target project identifier
    #[arg(allow_hyphen_values = true)]
    project_id: String,
    /// Directory to scan recursively
    #[arg(allow_hyphen_values = true)]
    documents_dir: PathBuf,
    /// Comma separated extensions, e.g. `md,pdf` or `txt=md` to upload .txt files as .md
    #[arg(allow_hyphen_values = true)]
    file_extensions: Option<String>,
    /// Anything after the extension list is ignored.
    #[arg(hide = true, num_args = 0.., allow_hyphen_values = true)]
    extra: Vec<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if !cli.extra.is_empty() {
        debug!("ignoring extra arguments: {:?}", cli.extra);
    }

    // API base URL comes from `BULK_IMPORT_API_URL` or defaults to
    // http://localhost:1717. See `api::ApiClient::from_env`.
    let api = match ApiClient::from_env() {
        Ok(api) => api,
        Err(e) => {
            eprintln!("bulk import failed: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let args = importer::ImportArgs {
        project_id: cli.project_id,
        documents_dir: cli.documents_dir,
        extensions: cli.file_extensions,
    };

    match importer::run(&args, &api) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("bulk import failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
