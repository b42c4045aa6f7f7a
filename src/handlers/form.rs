use axum::extract::Multipart;
use bytes::Bytes;

use crate::error::{AppError, Result};

/// A file part pulled out of a multipart body
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// Fields accepted by the post create/update forms and the upload endpoint
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub remove_image: bool,
    pub image: Option<UploadedFile>,
}

impl PostForm {
    /// Drain a multipart body. Unknown fields are ignored and a file part
    /// without a filename counts as "no image".
    pub async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = PostForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::multipart("Failed to process multipart", e))?
        {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "image" => {
                    let file_name = field.file_name().unwrap_or("").to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::multipart("Failed to read file", e))?;

                    if !file_name.is_empty() {
                        form.image = Some(UploadedFile { file_name, data });
                    }
                }
                "title" | "content" | "remove_image" => {
                    let text = field.text().await.map_err(|e| {
                        AppError::multipart(&format!("Failed to read field {}", name), e)
                    })?;

                    match name.as_str() {
                        "title" => form.title = Some(text),
                        "content" => form.content = Some(text),
                        _ => form.remove_image = parse_flag(&text),
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

fn parse_flag(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Unwrap a required text field or answer 422
pub fn required(value: Option<String>, field: &str) -> Result<String> {
    value.ok_or_else(|| AppError::Unprocessable(format!("Field required: {}", field)))
}
