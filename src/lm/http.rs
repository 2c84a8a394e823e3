use serde::{Deserialize, Serialize};

use crate::lm::{GenerationParams, LanguageModel, ModelError};

/// Blocking JSON client for an inference sidecar exposing the model
/// capability as `POST {base}/generate` and `POST {base}/score`.
#[derive(Debug)]
pub struct HttpModelClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompts: &'a [String],
    max_new_tokens: usize,
    top_k: usize,
    top_p: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    texts: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    avg_nll: f64,
}

impl HttpModelClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ModelError> {
        let base_url = base_url.into();
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl LanguageModel for HttpModelClient {
    fn generate(
        &self,
        prompts: &[String],
        params: &GenerationParams,
    ) -> Result<Vec<String>, ModelError> {
        let request = GenerateRequest {
            prompts,
            max_new_tokens: params.max_new_tokens,
            top_k: params.top_k,
            top_p: params.top_p,
        };
        let response: GenerateResponse = self
            .http
            .post(format!("{}/generate", self.base_url))
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;
        if response.texts.len() != prompts.len() {
            return Err(ModelError::Malformed(format!(
                "expected {} texts, got {}",
                prompts.len(),
                response.texts.len()
            )));
        }
        Ok(response.texts)
    }

    fn avg_negative_log_likelihood(&self, text: &str) -> Result<f64, ModelError> {
        let response: ScoreResponse = self
            .http
            .post(format!("{}/score", self.base_url))
            .json(&ScoreRequest { text })
            .send()?
            .error_for_status()?
            .json()?;
        if !response.avg_nll.is_finite() {
            return Err(ModelError::Malformed(format!(
                "non-finite avg_nll {}",
                response.avg_nll
            )));
        }
        Ok(response.avg_nll)
    }
}
