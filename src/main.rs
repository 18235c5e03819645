use std::path::PathBuf;
use std::process::ExitCode;

use tileboard::config::BoardConfig;
use tileboard::decode::{DataUrlDecoder, FileEntry};
use tileboard::editor::EditorCore;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let Some(dir) = std::env::args_os().nth(1).map(PathBuf::from) else {
        tracing::error!("usage: tileboard <image-dir>");
        return ExitCode::FAILURE;
    };

    let config = match BoardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let files = match list_files(&dir).await {
        Ok(files) => files,
        Err(e) => {
            tracing::error!(error = %e, dir = %dir.display(), "failed to read import directory");
            return ExitCode::FAILURE;
        }
    };

    let mut editor = EditorCore::new(config);
    let plan = editor.plan_import(files);
    tracing::info!(pairs = plan.len(), skipped = plan.skipped().len(), dir = %dir.display(), "importing tiles");
    let batch = plan.decode(&DataUrlDecoder).await;
    editor.commit_import(batch);

    match serde_json::to_string_pretty(&editor.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize board");
            ExitCode::FAILURE
        }
    }
}

async fn list_files(dir: &std::path::Path) -> std::io::Result<Vec<FileEntry>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(FileEntry::from_path(&entry.path()));
        }
    }
    Ok(files)
}
