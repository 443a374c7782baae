use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use bytes::Bytes;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    storage::StorageClient,
};

pub const IMAGE_FIELD: &str = "image";

pub struct ImagePart {
    pub body: Bytes,
    pub content_type: String,
}

/// A multipart form split into text fields and the optional `image` file.
#[derive(Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    image: Option<ImagePart>,
}

impl MultipartForm {
    pub async fn read(mut mp: Multipart) -> AppResult<Self> {
        let mut form = MultipartForm::default();
        while let Some(field) = mp.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if field.file_name().is_some() || name == IMAGE_FIELD {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let body = field.bytes().await?;
                if name != IMAGE_FIELD {
                    warn!(field = %name, "ignoring unexpected file field");
                    continue;
                }
                // browsers send an empty part when no file was picked
                if !body.is_empty() {
                    form.image = Some(ImagePart { body, content_type });
                }
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn take_image(&mut self) -> Option<ImagePart> {
        self.image.take()
    }

    #[cfg(test)]
    pub(crate) fn from_parts(fields: &[(&str, &str)], image: Option<ImagePart>) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            image,
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mp = Multipart::from_request(req, state).await?;
        Self::read(mp).await
    }
}

/// Extension for an accepted image type. Case and parameters such as
/// `; charset=binary` are ignored.
pub(crate) fn ext_from_mime(ct: &str) -> Option<&'static str> {
    let essence = ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

/// Uploads the image under `folder/` and returns its public URL.
pub async fn upload_image(
    storage: &dyn StorageClient,
    folder: &str,
    image: ImagePart,
) -> AppResult<String> {
    let ext = ext_from_mime(&image.content_type).ok_or_else(|| {
        AppError::validation(format!("unsupported image type {}", image.content_type))
    })?;
    let key = format!("{}/{}.{}", folder, Uuid::new_v4(), ext);
    storage
        .put_object(&key, image.body, &image.content_type)
        .await
        .map_err(AppError::Storage)?;
    debug!(%key, "image uploaded");
    Ok(storage.public_url(&key))
}

/// Best-effort removal of a previously uploaded image.
pub async fn discard_image(storage: &dyn StorageClient, url: &str) {
    let Some(key) = storage.key_from_url(url) else {
        return;
    };
    if let Err(e) = storage.delete_object(&key).await {
        warn!(error = %e, %key, "failed to delete stale image");
    }
}
