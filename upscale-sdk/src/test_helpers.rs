// ABOUTME: Test helper utilities for mocking Gemini API responses, servers, and transports
// ABOUTME: Provides mockito-based helpers plus in-process fake transports for client tests

#[cfg(test)]
use crate::error::UpscaleError;
#[cfg(test)]
use crate::transport::ImageGenerationTransport;
#[cfg(test)]
use crate::wire::{GenerateContentRequest, GenerateContentResponse};
#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use mockito::{Server, ServerGuard};
#[cfg(test)]
use secrecy::SecretString;
#[cfg(test)]
use serde_json::json;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use std::sync::{Arc, Mutex};

#[cfg(test)]
pub async fn mock_gemini_server() -> ServerGuard {
    Server::new_async().await
}

#[cfg(test)]
pub fn test_api_key() -> SecretString {
    SecretString::new("test-api-key".to_string().into_boxed_str())
}

#[cfg(test)]
pub fn mock_image_response(mime_type: &str, data: &str) -> serde_json::Value {
    json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [
                        {
                            "inlineData": {
                                "mimeType": mime_type,
                                "data": data
                            }
                        }
                    ]
                },
                "finishReason": "STOP",
                "index": 0
            }
        ],
        "usageMetadata": {
            "promptTokenCount": 1341,
            "candidatesTokenCount": 1290,
            "totalTokenCount": 2631
        },
        "modelVersion": "gemini-2.5-flash-image"
    })
}

#[cfg(test)]
pub fn mock_empty_candidates_response() -> serde_json::Value {
    json!({
        "candidates": [],
        "promptFeedback": {
            "blockReason": "OTHER"
        }
    })
}

#[cfg(test)]
pub fn mock_no_parts_response() -> serde_json::Value {
    json!({
        "candidates": [
            {
                "content": {
                    "role": "model"
                },
                "finishReason": "IMAGE_SAFETY"
            }
        ]
    })
}

#[cfg(test)]
pub fn mock_text_only_response() -> serde_json::Value {
    json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [
                        {
                            "text": "I can't upscale this image."
                        }
                    ]
                },
                "finishReason": "STOP"
            }
        ]
    })
}

#[cfg(test)]
pub fn mock_api_error_response(code: u16, message: &str) -> serde_json::Value {
    json!({
        "error": {
            "code": code,
            "message": message,
            "status": "INVALID_ARGUMENT"
        }
    })
}

#[cfg(test)]
type RecordedRequests = Arc<Mutex<Vec<(String, GenerateContentRequest)>>>;

#[cfg(test)]
enum FakeReply {
    Response(GenerateContentResponse),
    Failure(Box<dyn Fn() -> UpscaleError + Send + Sync>),
}

/// Transport that counts calls, records requests, and replies with a canned outcome
#[cfg(test)]
pub struct FakeTransport {
    reply: FakeReply,
    calls: Arc<AtomicUsize>,
    requests: RecordedRequests,
}

#[cfg(test)]
impl FakeTransport {
    pub fn with(response: GenerateContentResponse) -> Self {
        Self {
            reply: FakeReply::Response(response),
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(body: serde_json::Value) -> Self {
        Self::with(serde_json::from_value(body).expect("fixture should deserialize"))
    }

    pub fn failing(error: impl Fn() -> UpscaleError + Send + Sync + 'static) -> Self {
        Self {
            reply: FakeReply::Failure(Box::new(error)),
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    pub fn requests(&self) -> RecordedRequests {
        self.requests.clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ImageGenerationTransport for FakeTransport {
    async fn generate_content(
        &self,
        _api_key: &SecretString,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpscaleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));

        match &self.reply {
            FakeReply::Response(response) => Ok(response.clone()),
            FakeReply::Failure(make_error) => Err(make_error()),
        }
    }
}

/// Transport that answers with the request's own inline image, after yielding once
#[cfg(test)]
#[derive(Default)]
pub struct EchoTransport;

#[cfg(test)]
#[async_trait]
impl ImageGenerationTransport for EchoTransport {
    async fn generate_content(
        &self,
        _api_key: &SecretString,
        _model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpscaleError> {
        tokio::task::yield_now().await;

        let inline = request.contents[0].parts[0]
            .inline_data
            .clone()
            .expect("request should carry inline data");

        Ok(serde_json::from_value(mock_image_response(&inline.mime_type, &inline.data))
            .expect("fixture should deserialize"))
    }
}
