use super::{found, require_task};
use crate::cli::ImageAction;
use crate::output;
use futures::stream::{FuturesUnordered, StreamExt};
use taskboard_core::TaskboardError;
use taskboard_domain::{Task, TaskBoardOperations};
use taskboard_tui::{FileDataUriDecoder, ImageDecoder};

pub async fn handle<O: TaskBoardOperations>(ops: &O, action: ImageAction) -> anyhow::Result<()> {
    match action {
        ImageAction::Add { task, paths } => {
            let mut latest: Option<Task> = Some(require_task(ops, task).await?);
            let decoder = FileDataUriDecoder;

            let mut pending: FuturesUnordered<_> = paths
                .into_iter()
                .map(move |path| async move {
                    let result = match decoder.decode(&path).await {
                        Ok(image) => ops.add_image(task, &image.name, &image.data_uri).await,
                        Err(e) => Err(e),
                    };
                    (path, result)
                })
                .collect();

            let mut attached = 0;
            let mut skipped = Vec::new();
            while let Some((path, result)) = pending.next().await {
                match result {
                    Ok(Some(updated)) => {
                        attached += 1;
                        latest = Some(updated);
                    }
                    Ok(None) => skipped.push(path.display().to_string()),
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", path.display(), e);
                        skipped.push(format!("{}: {}", path.display(), e));
                    }
                }
            }

            if attached == 0 {
                return Err(TaskboardError::Decode {
                    name: skipped.join(", "),
                    reason: "no image could be attached".to_string(),
                }
                .into());
            }
            // Re-read so every completed upload is in the reported task
            let task = ops.get_task(task).await?.or(latest);
            output::output_success(serde_json::json!({
                "task": task,
                "attached": attached,
                "skipped": skipped,
            }));
        }
        ImageAction::Delete { task, image } => {
            let current = require_task(ops, task).await?;
            if !current.images.iter().any(|i| i.id == image) {
                return Err(TaskboardError::not_found("Image", image).into());
            }
            let updated = found(ops.delete_image(task, image).await?, task)?;
            output::output_success(&updated);
        }
    }
    Ok(())
}
