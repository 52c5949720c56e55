use sentimation_shared::TaskStatus;

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct StatusBadge {
  pub class: &'static str,
  pub icon:  Option<&'static str>,
  pub label: String
}

#[must_use]
pub fn status_badge(
  status: &TaskStatus
) -> StatusBadge {
  let (class, icon, label) = match status
  {
    | TaskStatus::Pending => {
      ("bg-warning", "fa-clock", "Pending")
    }
    | TaskStatus::Running => (
      "bg-info",
      "fa-spinner fa-spin",
      "Running"
    ),
    | TaskStatus::Completed => {
      ("bg-success", "fa-check", "Completed")
    }
    | TaskStatus::Failed => (
      "bg-danger",
      "fa-exclamation-triangle",
      "Failed"
    ),
    | TaskStatus::Cancelled => {
      ("bg-secondary", "fa-ban", "Cancelled")
    }
    | TaskStatus::Other(raw) => {
      return StatusBadge {
        class: "bg-secondary",
        icon:  None,
        label: raw.clone()
      };
    }
  };

  StatusBadge {
    class,
    icon: Some(icon),
    label: label.to_string()
  }
}

impl StatusBadge {
  #[must_use]
  pub fn css_class(&self) -> String {
    format!("badge {}", self.class)
  }

  #[must_use]
  pub fn icon_class(
    &self
  ) -> Option<String> {
    self
      .icon
      .map(|icon| format!("fas {icon} me-1"))
  }

  /// Bootstrap markup for places that take raw HTML. The label is escaped.
  #[must_use]
  pub fn to_markup(&self) -> String {
    let icon = self
      .icon_class()
      .map(|class| {
        format!("<i class=\"{class}\"></i>")
      })
      .unwrap_or_default();
    format!(
      "<span class=\"{}\">{icon}{}</span>",
      self.css_class(),
      escape_html(&self.label)
    )
  }
}

#[must_use]
pub fn escape_html(raw: &str) -> String {
  let mut out =
    String::with_capacity(raw.len());
  for ch in raw.chars() {
    match ch {
      | '&' => out.push_str("&amp;"),
      | '<' => out.push_str("&lt;"),
      | '>' => out.push_str("&gt;"),
      | '"' => out.push_str("&quot;"),
      | '\'' => out.push_str("&#39;"),
      | other => out.push(other)
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use sentimation_shared::TaskStatus;

  use super::status_badge;

  #[test]
  fn known_statuses_have_fixed_markup() {
    let expected = [
      (
        "pending",
        "<span class=\"badge \
         bg-warning\"><i class=\"fas \
         fa-clock me-1\"></i>Pending</span>"
      ),
      (
        "running",
        "<span class=\"badge bg-info\"><i \
         class=\"fas fa-spinner fa-spin \
         me-1\"></i>Running</span>"
      ),
      (
        "completed",
        "<span class=\"badge \
         bg-success\"><i class=\"fas \
         fa-check me-1\"></i>Completed</span>"
      ),
      (
        "failed",
        "<span class=\"badge \
         bg-danger\"><i class=\"fas \
         fa-exclamation-triangle \
         me-1\"></i>Failed</span>"
      ),
      (
        "cancelled",
        "<span class=\"badge \
         bg-secondary\"><i class=\"fas \
         fa-ban me-1\"></i>Cancelled</span>"
      )
    ];

    for (raw, markup) in expected {
      let badge = status_badge(
        &TaskStatus::parse(raw)
      );
      assert_eq!(badge.to_markup(), markup);
    }
  }

  #[test]
  fn unknown_status_shows_raw_value() {
    for raw in
      ["queued", "PENDING", "", "on hold"]
    {
      let badge = status_badge(
        &TaskStatus::parse(raw)
      );
      assert_eq!(badge.label, raw);
      assert_eq!(badge.icon, None);
      assert_eq!(
        badge.to_markup(),
        format!(
          "<span class=\"badge \
           bg-secondary\">{raw}</span>"
        )
      );
    }
  }

  #[test]
  fn markup_escapes_label() {
    let badge = status_badge(
      &TaskStatus::parse("<b>")
    );
    assert!(
      badge.to_markup().contains("&lt;b&gt;")
    );
  }
}
