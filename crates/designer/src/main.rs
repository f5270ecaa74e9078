use std::path::{Path, PathBuf};
use std::process::ExitCode;

use solar_designer_lib::command::execute_json_batch;
use solar_designer_lib::state::{EditorSettings, Session};

/// Command line options
#[derive(Default)]
struct Args {
    document: Option<PathBuf>,
    script: Option<PathBuf>,
    output: Option<PathBuf>,
    /// Start from the autosaved document when no `--document` is given
    restore: bool,
    /// Write the resulting document to the autosave file
    autosave: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solar_designer=info".into()),
        )
        .init();

    let args = parse_args();
    let mut session = Session::new(EditorSettings::load());

    if let Some(path) = &args.document {
        if let Err(e) = session.open_file(path) {
            tracing::error!("Failed to open document {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    } else if args.restore {
        match Session::load_autosave() {
            Some(document) => session.open_document(document),
            None => tracing::warn!("No autosave to restore"),
        }
    }

    if let Some(path) = &args.script {
        if let Err(e) = run_script(&mut session, path) {
            tracing::error!("Failed to run script {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = &args.output {
        if let Err(e) = session.save_file(path) {
            tracing::error!("Failed to save document {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    } else if args.script.is_none() && !args.autosave {
        println!("{}", session.export_document_json());
    }

    if args.autosave {
        session.autosave();
    }

    ExitCode::SUCCESS
}

fn run_script(session: &mut Session, path: &Path) -> solar_designer_lib::error::Result<()> {
    let json = std::fs::read_to_string(path)?;
    let responses = execute_json_batch(session, &json)?;
    let failed = responses.iter().filter(|r| !r.success).count();
    tracing::info!(
        "Ran {} commands from {} ({failed} failed)",
        responses.len(),
        path.display()
    );
    println!("{}", serde_json::to_string_pretty(&responses)?);
    Ok(())
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--document" => &mut args.document,
            "--script" => &mut args.script,
            "--output" => &mut args.output,
            "--restore" => {
                args.restore = true;
                continue;
            }
            "--autosave" => {
                args.autosave = true;
                continue;
            }
            other => {
                tracing::warn!("Ignoring unknown argument {other}");
                continue;
            }
        };
        match iter.next() {
            Some(value) => *slot = Some(PathBuf::from(value)),
            None => tracing::warn!("Missing value for {arg}"),
        }
    }
    args
}
