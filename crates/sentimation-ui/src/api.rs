use gloo::net::http::{
  Method as HttpMethod,
  RequestBuilder
};
use sentimation_core::ErrorBody;
use sentimation_core::api::{
  Method,
  RequestError,
  RequestOptions,
  Transport
};
use serde_json::Value;

/// [`Transport`] over the browser `fetch`, relative to the page origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchTransport {
  base_url: String
}

impl Transport for FetchTransport {
  async fn call(
    &self,
    path: &str,
    options: RequestOptions
  ) -> Result<Value, RequestError> {
    let network = |message: String| {
      RequestError::Network {
        path: path.to_string(),
        message
      }
    };

    let method = match options.method {
      | Method::Get => HttpMethod::GET,
      | Method::Post => HttpMethod::POST
    };
    let mut builder = RequestBuilder::new(
      &format!("{}{path}", self.base_url)
    )
    .method(method);
    for (name, value) in options.headers() {
      builder = builder.header(name, value);
    }

    let request = match &options.body {
      | Some(body) => {
        builder.body(body.encode(path)?)
      }
      | None => builder.build()
    }
    .map_err(|err| network(err.to_string()))?;

    let response = request
      .send()
      .await
      .map_err(|err| network(err.to_string()))?;
    let status = response.status();
    let text = response
      .text()
      .await
      .map_err(|err| network(err.to_string()))?;

    if !response.ok() {
      let detail =
        serde_json::from_str::<ErrorBody>(&text)
          .ok()
          .map(|parsed| parsed.error);
      tracing::warn!(
        path,
        status,
        detail = detail.as_deref().unwrap_or(""),
        "backend returned an error status"
      );
      return Err(RequestError::Status {
        path: path.to_string(),
        status,
        detail
      });
    }

    serde_json::from_str(&text).map_err(|err| {
      RequestError::Decode {
        path:    path.to_string(),
        message: err.to_string()
      }
    })
  }
}
