//! `MessageTransport` implementation over HTTP.

use async_trait::async_trait;
use tracing::debug;

use crate::image::mime_for;
use crate::{MessageTransport, TransportError, TransportReply};

use super::client::{map_reqwest_error, HttpTransport, CHAT_PATH, IMAGE_PATH};
use super::decode::{decode_image_reply, decode_text_reply, error_detail};

impl HttpTransport {
    /// Return the body of a 2xx response, or a `Status` error carrying
    /// whatever detail the backend put in the error body.
    async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "backend returned error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                detail: error_detail(&text),
            });
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(map_reqwest_error)
    }
}

#[async_trait]
impl MessageTransport for HttpTransport {
    async fn post_text(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<TransportReply, TransportError> {
        debug!(chars = content.len(), "chat request");

        let body = serde_json::json!({
            "threadID": thread_id,
            "content": content,
        });

        let response = self
            .http
            .post(self.endpoint(CHAT_PATH))
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let bytes = Self::read_body(response).await?;
        decode_text_reply(&bytes)
    }

    async fn post_image(
        &self,
        thread_id: &str,
        image: Vec<u8>,
        filename: &str,
        prompt: Option<&str>,
    ) -> Result<TransportReply, TransportError> {
        debug!(
            size = image.len(),
            filename,
            with_prompt = prompt.is_some(),
            "image analysis request"
        );

        let file_part = reqwest::multipart::Part::bytes(image)
            .file_name(filename.to_string())
            .mime_str(mime_for(filename))
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        let mut form = reqwest::multipart::Form::new()
            .part("image", file_part)
            .text("threadID", thread_id.to_string());
        if let Some(prompt) = prompt {
            form = form.text("content", prompt.to_string());
        }

        let response = self
            .http
            .post(self.endpoint(IMAGE_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let bytes = Self::read_body(response).await?;
        decode_image_reply(&bytes)
    }
}
