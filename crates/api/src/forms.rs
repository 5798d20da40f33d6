//! Request body extraction for the catalog forms.

use axum::extract::Multipart;
use serde::Deserialize;
use vidya_core::forms::{GameSubmission, GenreSubmission};
use vidya_core::image_lifecycle::is_remove_requested;

use crate::error::{AppError, AppResult};
use crate::storage::UploadedFile;

/// Everything a game create/update form posts.
#[derive(Debug, Default)]
pub struct GameMultipart {
    pub submission: GameSubmission,
    pub upload: Option<UploadedFile>,
    pub password: Option<String>,
    pub remove_image: bool,
}

impl GameMultipart {
    /// Drain a `multipart/form-data` body.
    ///
    /// A file part with an empty file name or an empty body is the browser's
    /// "nothing selected" and yields no upload. Unknown fields are ignored.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = GameMultipart::default();
        let mut remove_image: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "image" => {
                    let file_name = field.file_name().unwrap_or("").to_string();
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    if !file_name.is_empty() && !bytes.is_empty() {
                        form.upload = Some(UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        });
                    }
                }
                "title" | "description" | "stock" | "price" | "genre" | "password"
                | "removeImage" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    let submission = &mut form.submission;
                    match name.as_str() {
                        "title" => submission.title = text,
                        "description" => submission.description = text,
                        "stock" => submission.stock = text,
                        "price" => submission.price = text,
                        // First non-empty selection wins.
                        "genre" => {
                            if submission.genre.is_none() && !text.trim().is_empty() {
                                submission.genre = Some(text);
                            }
                        }
                        "password" => form.password = Some(text),
                        _ => remove_image = Some(text),
                    }
                }
                _ => {}
            }
        }

        form.remove_image = is_remove_requested(remove_image.as_deref());
        Ok(form)
    }
}

/// Genre create/update body (`application/x-www-form-urlencoded`).
#[derive(Debug, Default, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub password: Option<String>,
}

impl GenreForm {
    pub fn submission(&self) -> GenreSubmission {
        GenreSubmission {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Body of a delete confirmation.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub password: Option<String>,
}
