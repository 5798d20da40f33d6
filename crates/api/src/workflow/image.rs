//! Side effects of the image lifecycle: records in the store, files on disk.

use vidya_core::types::DbId;
use vidya_db::models::image::{CreateImage, Image};
use vidya_db::store::CatalogStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::storage::{ImageStorage, UploadedFile};

/// Keeps image records and their backing files in step.
pub struct ImageLifecycle<'a> {
    store: &'a dyn CatalogStore,
    files: &'a ImageStorage,
}

impl<'a> ImageLifecycle<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            store: state.store.as_ref(),
            files: &state.images,
        }
    }

    /// Write the upload to disk and record it. The file is removed again if
    /// the record cannot be created.
    pub async fn store_upload(&self, upload: &UploadedFile) -> AppResult<Image> {
        let filename = self
            .files
            .write(upload)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write image file: {e}")))?;

        let input = CreateImage {
            filename: filename.clone(),
            content_type: upload.content_type.clone(),
        };
        match self.store.create_image(&input).await {
            Ok(image) => {
                tracing::info!(image_id = image.id, filename = %image.filename, "Image stored");
                Ok(image)
            }
            Err(err) => {
                self.remove_file(&filename).await;
                Err(err.into())
            }
        }
    }

    /// Delete the image record, then its file. A file that cannot be removed
    /// is logged and otherwise ignored.
    pub async fn discard(&self, id: DbId) -> AppResult<()> {
        let Some(image) = self.store.find_image(id).await? else {
            return Ok(());
        };
        self.store.delete_image(id).await?;
        self.remove_file(&image.filename).await;
        tracing::info!(image_id = id, filename = %image.filename, "Image discarded");
        Ok(())
    }

    /// [`discard`](Self::discard) for use once the owning game has already
    /// been saved: the response no longer depends on it, so errors are only
    /// logged.
    pub async fn discard_after_save(&self, id: DbId) {
        if let Err(err) = self.discard(id).await {
            tracing::warn!(image_id = id, error = %err, "Failed to discard image");
        }
    }

    async fn remove_file(&self, filename: &str) {
        if let Err(failure) = self.files.remove(filename).await {
            tracing::warn!(error = %failure, "Image file left behind");
        }
    }
}
