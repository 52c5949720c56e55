use anyhow::Context;
use sentimation_core::ErrorBody;
use sentimation_core::api::{Method, RequestError, RequestOptions, Transport};
use serde_json::Value;
use tracing::{trace, warn};

/// [`Transport`] over `reqwest`, rooted at the backend base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("failed building HTTP client for the task backend")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Transport for HttpTransport {
    async fn call(&self, path: &str, options: RequestOptions) -> Result<Value, RequestError> {
        let method = match options.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut request = self.client.request(method, self.url(path));
        for (name, value) in options.headers() {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            request = request.body(body.encode(path)?);
        }

        let network = |err: reqwest::Error| RequestError::Network {
            path: path.to_string(),
            message: err.to_string(),
        };

        let response = request.send().await.map_err(network)?;
        let status = response.status();
        let body = response.text().await.map_err(network)?;
        trace!(
            path,
            status = status.as_u16(),
            bytes = body.len(),
            "backend responded"
        );

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|parsed| parsed.error);
            warn!(
                path,
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or(""),
                "backend returned an error status"
            );
            return Err(RequestError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|err| RequestError::Decode {
            path: path.to_string(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::HttpTransport;

    #[test]
    fn joins_base_url_and_path() {
        let transport = HttpTransport::new("http://studio:5000/").expect("client");
        assert_eq!(transport.url("/tasks"), "http://studio:5000/tasks");
    }
}
