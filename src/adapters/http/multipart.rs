//! Buffered multipart forms.
//!
//! Upload endpoints mix text fields with files. The whole form is read
//! first so handlers can look fields up by name in any order.

use std::collections::HashMap;

use axum::extract::Multipart;

use super::envelope::{multipart_error, ApiError};
use crate::ports::MediaUpload;

/// Text fields and files of one multipart request.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, MediaUpload>,
}

impl MultipartForm {
    /// Reads every part. Parts sent with a file name are files; a part
    /// repeated under the same name keeps its last value.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    if bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        MediaUpload::new(Some(file_name), content_type, bytes.to_vec()),
                    );
                }
                None => {
                    let text = field.text().await.map_err(multipart_error)?;
                    form.fields.insert(name, text);
                }
            }
        }
        tracing::debug!(
            fields = form.fields.len(),
            files = form.files.len(),
            "multipart form read"
        );
        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Text field or an empty string.
    pub fn text_or_empty(&self, name: &str) -> String {
        self.text(name).unwrap_or_default().to_string()
    }

    pub fn take_file(&mut self, name: &str) -> Option<MediaUpload> {
        self.files.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;

    const BOUNDARY: &str = "XBOUNDARY";

    fn request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn separates_text_fields_from_files() {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nIntro\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"videoFile\"; filename=\"clip.mp4\"\r\n\
             Content-Type: video/mp4\r\n\r\nDATA\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"thumbnail\"; filename=\"t.png\"\r\n\r\n\r\n\
             --{b}--\r\n",
            b = BOUNDARY
        );
        let multipart = Multipart::from_request(request(body), &()).await.unwrap();
        let mut form = MultipartForm::read(multipart).await.unwrap();

        assert_eq!(form.text("title"), Some("Intro"));
        assert_eq!(form.text_or_empty("description"), "");
        let file = form.take_file("videoFile").unwrap();
        assert_eq!(file.file_name.as_deref(), Some("clip.mp4"));
        assert_eq!(file.content_type.as_deref(), Some("video/mp4"));
        assert_eq!(file.bytes, b"DATA");
        // empty file parts count as missing
        assert!(form.take_file("thumbnail").is_none());
        assert!(form.take_file("videoFile").is_none());
    }
}
