use std::future::Future;

use sentimation_shared::{
  MessageAck,
  ScheduleAck,
  ScheduleRequest,
  TaskDto
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub const CONTENT_TYPE: &str =
  "Content-Type";
pub const JSON_CONTENT_TYPE: &str =
  "application/json";
pub const FORM_CONTENT_TYPE: &str =
  "application/x-www-form-urlencoded";
pub const GENERATED_ASSET_PREFIX: &str =
  "/static/generated";

pub mod paths {
  use super::encode_segment;

  pub const TASKS: &str = "/tasks";
  pub const SCHEDULE: &str = "/schedule";
  pub const GENERATORS: &str =
    "/generators";

  pub fn task(id: &str) -> String {
    format!("/task/{}", encode_segment(id))
  }

  pub fn cancel(id: &str) -> String {
    format!(
      "/cancel/{}",
      encode_segment(id)
    )
  }

  pub fn run_now(id: &str) -> String {
    format!(
      "/run_now/{}",
      encode_segment(id)
    )
  }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
  #[error(
    "request to {path} failed: {message}"
  )]
  Network {
    path:    String,
    message: String
  },
  #[error("HTTP error! status: {status}")]
  Status {
    path:   String,
    status: u16,
    detail: Option<String>
  },
  #[error(
    "unexpected response from {path}: \
     {message}"
  )]
  Decode {
    path:    String,
    message: String
  }
}

impl RequestError {
  #[must_use]
  pub fn path(&self) -> &str {
    match self {
      | Self::Network { path, .. }
      | Self::Status { path, .. }
      | Self::Decode { path, .. } => path
    }
  }

  /// The backend's own explanation, when a non-success response carried
  /// one.
  #[must_use]
  pub fn detail(&self) -> Option<&str> {
    match self {
      | Self::Status {
        detail, ..
      } => detail.as_deref(),
      | _ => None
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Method {
  Get,
  Post
}

impl Method {
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Get => "GET",
      | Self::Post => "POST"
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
  Json(Value),
  Form(Vec<(String, String)>)
}

/// Per-request knobs for [`Transport::call`].
///
/// Starts out as a `GET` with a JSON content type. Setting a header that
/// already exists (compared case-insensitively) replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
  pub method: Method,
  headers:    Vec<(String, String)>,
  pub body:   Option<Body>
}

impl Default for RequestOptions {
  fn default() -> Self {
    Self {
      method:  Method::Get,
      headers: vec![(
        CONTENT_TYPE.to_string(),
        JSON_CONTENT_TYPE.to_string()
      )],
      body:    None
    }
  }
}

impl RequestOptions {
  #[must_use]
  pub fn get() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn post() -> Self {
    Self {
      method: Method::Post,
      ..Self::default()
    }
  }

  #[must_use]
  pub fn with_header(
    mut self,
    name: &str,
    value: &str
  ) -> Self {
    self.set_header(name, value);
    self
  }

  #[must_use]
  pub fn with_json(
    mut self,
    body: Value
  ) -> Self {
    self.body = Some(Body::Json(body));
    self
  }

  #[must_use]
  pub fn with_form(
    mut self,
    fields: Vec<(String, String)>
  ) -> Self {
    self.set_header(
      CONTENT_TYPE,
      FORM_CONTENT_TYPE
    );
    self.body = Some(Body::Form(fields));
    self
  }

  pub fn set_header(
    &mut self,
    name: &str,
    value: &str
  ) {
    if let Some(slot) =
      self.headers.iter_mut().find(
        |(existing, _)| {
          existing
            .eq_ignore_ascii_case(name)
        }
      )
    {
      slot.1 = value.to_string();
    } else {
      self.headers.push((
        name.to_string(),
        value.to_string()
      ));
    }
  }

  #[must_use]
  pub fn header(
    &self,
    name: &str
  ) -> Option<&str> {
    self
      .headers
      .iter()
      .find(|(existing, _)| {
        existing.eq_ignore_ascii_case(name)
      })
      .map(|(_, value)| value.as_str())
  }

  #[must_use]
  pub fn headers(
    &self
  ) -> &[(String, String)] {
    &self.headers
  }
}

/// One round trip to the task backend.
///
/// Implementations resolve `path` against their base URL, send the
/// request, and hand back the decoded JSON body. A transport failure or a
/// status outside 200..=299 is an error; there is no retry and no timeout.
pub trait Transport {
  fn call(
    &self,
    path: &str,
    options: RequestOptions
  ) -> impl Future<
    Output = Result<Value, RequestError>
  >;
}

/// Typed operations over a [`Transport`].
#[derive(Debug, Clone)]
pub struct TaskClient<T> {
  transport: T
}

impl<T: Transport> TaskClient<T> {
  pub fn new(transport: T) -> Self {
    Self { transport }
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  pub async fn list_tasks(
    &self
  ) -> Result<Vec<TaskDto>, RequestError>
  {
    self
      .fetch(
        paths::TASKS.to_string(),
        RequestOptions::get()
      )
      .await
  }

  pub async fn get_task(
    &self,
    id: &str
  ) -> Result<TaskDto, RequestError> {
    self
      .fetch(
        paths::task(id),
        RequestOptions::get()
      )
      .await
  }

  /// Asks the backend to cancel a task. Nothing changes locally; the next
  /// poll shows the outcome.
  pub async fn cancel_task(
    &self,
    id: &str
  ) -> Result<MessageAck, RequestError>
  {
    self
      .fetch(
        paths::cancel(id),
        RequestOptions::get()
      )
      .await
  }

  pub async fn run_now(
    &self,
    id: &str
  ) -> Result<MessageAck, RequestError>
  {
    self
      .fetch(
        paths::run_now(id),
        RequestOptions::get()
      )
      .await
  }

  pub async fn schedule(
    &self,
    request: &ScheduleRequest
  ) -> Result<ScheduleAck, RequestError>
  {
    let options = RequestOptions::post()
      .with_header(
        "X-Requested-With",
        "XMLHttpRequest"
      )
      .with_form(vec![
        (
          "generator_type".to_string(),
          request.generator_type.clone()
        ),
        (
          "prompt".to_string(),
          request.prompt.clone()
        ),
        (
          "scheduled_time".to_string(),
          request.scheduled_time.clone()
        ),
      ]);

    self
      .fetch(
        paths::SCHEDULE.to_string(),
        options
      )
      .await
  }

  pub async fn generators(
    &self
  ) -> Result<Vec<String>, RequestError>
  {
    self
      .fetch(
        paths::GENERATORS.to_string(),
        RequestOptions::get()
      )
      .await
  }

  async fn fetch<R: DeserializeOwned>(
    &self,
    path: String,
    options: RequestOptions
  ) -> Result<R, RequestError> {
    debug!(
      path = %path,
      method = options.method.as_str(),
      "calling task backend"
    );
    let value = self
      .transport
      .call(&path, options)
      .await?;

    serde_json::from_value(value).map_err(
      |err| RequestError::Decode {
        path,
        message: err.to_string()
      }
    )
  }
}

/// Last `/`-separated segment of a result path.
#[must_use]
pub fn result_file_name(
  result_path: &str
) -> &str {
  result_path
    .rsplit('/')
    .next()
    .unwrap_or(result_path)
}

/// Where the backend serves a finished video.
#[must_use]
pub fn generated_asset_url(
  result_path: &str
) -> String {
  format!(
    "{GENERATED_ASSET_PREFIX}/{}",
    result_file_name(result_path)
  )
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
#[must_use]
pub fn encode_segment(raw: &str) -> String {
  let mut out =
    String::with_capacity(raw.len());
  for byte in raw.bytes() {
    if byte.is_ascii_alphanumeric()
      || matches!(
        byte,
        b'-' | b'.' | b'_' | b'~'
      )
    {
      out.push(char::from(byte));
    } else {
      out.push_str(&format!(
        "%{byte:02X}"
      ));
    }
  }
  out
}

/// `application/x-www-form-urlencoded` body for a field list.
#[must_use]
pub fn encode_form(
  fields: &[(String, String)]
) -> String {
  fields
    .iter()
    .map(|(name, value)| {
      format!(
        "{}={}",
        encode_segment(name),
        encode_segment(value)
      )
    })
    .collect::<Vec<_>>()
    .join("&")
}

impl Body {
  /// Wire form of the body, ready to send as-is.
  pub fn encode(
    &self,
    path: &str
  ) -> Result<String, RequestError> {
    match self {
      | Self::Json(value) => {
        serde_json::to_string(value).map_err(
          |err| RequestError::Decode {
            path:    path.to_string(),
            message: err.to_string()
          }
        )
      }
      | Self::Form(fields) => {
        Ok(encode_form(fields))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    Body,
    CONTENT_TYPE,
    FORM_CONTENT_TYPE,
    JSON_CONTENT_TYPE,
    RequestOptions,
    encode_form,
    encode_segment,
    generated_asset_url,
    paths,
    result_file_name
  };

  #[test]
  fn defaults_to_json_content_type() {
    let options = RequestOptions::get();
    assert_eq!(
      options.header("content-type"),
      Some(JSON_CONTENT_TYPE)
    );
  }

  #[test]
  fn caller_header_replaces_default() {
    let options = RequestOptions::get()
      .with_header(
        "content-type",
        "text/plain"
      );
    assert_eq!(options.headers().len(), 1);
    assert_eq!(
      options.header(CONTENT_TYPE),
      Some("text/plain")
    );

    let form = RequestOptions::post()
      .with_form(vec![]);
    assert_eq!(
      form.header(CONTENT_TYPE),
      Some(FORM_CONTENT_TYPE)
    );
  }

  #[test]
  fn task_ids_are_encoded_in_paths() {
    assert_eq!(
      paths::task("task_12"),
      "/task/task_12"
    );
    assert_eq!(
      paths::cancel("a/b c"),
      "/cancel/a%2Fb%20c"
    );
    assert_eq!(
      encode_segment("ü"),
      "%C3%BC"
    );
  }

  #[test]
  fn form_bodies_are_url_encoded() {
    let fields = vec![
      (
        "prompt".to_string(),
        "cats & dogs".to_string()
      ),
      (
        "scheduled_time".to_string(),
        "2030-01-01T09:00".to_string()
      ),
    ];
    assert_eq!(
      encode_form(&fields),
      "prompt=cats%20%26%20dogs&\
       scheduled_time=2030-01-01T09%3A00"
    );
    assert_eq!(
      Body::Form(fields)
        .encode("/schedule")
        .expect("encode form"),
      encode_form(&[
        (
          "prompt".to_string(),
          "cats & dogs".to_string()
        ),
        (
          "scheduled_time".to_string(),
          "2030-01-01T09:00".to_string()
        )
      ])
    );
  }

  #[test]
  fn asset_url_uses_last_segment() {
    assert_eq!(
      result_file_name(
        "output/final/rave_7.mp4"
      ),
      "rave_7.mp4"
    );
    assert_eq!(
      result_file_name("plain.mp4"),
      "plain.mp4"
    );
    assert_eq!(
      generated_asset_url(
        "/abs/dir/clip.mp4"
      ),
      "/static/generated/clip.mp4"
    );
  }
}
