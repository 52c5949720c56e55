use sentimation_core::view::RenderSurface;
use web_sys::{
  Document,
  Element
};

const STAT_CARD_SELECTOR: &str =
  ".stat-card";

/// The host page, addressed by element id.
pub struct DocumentSurface {
  document: Option<Document>
}

impl DocumentSurface {
  pub fn current() -> Self {
    Self {
      document: web_sys::window()
        .and_then(|window| window.document())
    }
  }

  fn element(
    &self,
    target: &str
  ) -> Option<Element> {
    self
      .document
      .as_ref()?
      .get_element_by_id(target)
  }
}

impl RenderSurface for DocumentSurface {
  fn set_text(
    &mut self,
    target: &str,
    text: &str
  ) -> bool {
    let Some(element) = self.element(target)
    else {
      return false;
    };
    element.set_text_content(Some(text));
    true
  }

  /// Hides the enclosing stat card when there is one, so the label goes
  /// with the number.
  fn set_visible(
    &mut self,
    target: &str,
    visible: bool
  ) -> bool {
    let Some(element) = self.element(target)
    else {
      return false;
    };
    let container = element
      .closest(STAT_CARD_SELECTOR)
      .ok()
      .flatten()
      .unwrap_or(element);

    let result = if visible {
      container.remove_attribute("hidden")
    } else {
      container.set_attribute("hidden", "")
    };
    if let Err(err) = result {
      tracing::warn!(
        element_id = target,
        error = ?err,
        "failed toggling visibility"
      );
    }
    true
  }
}
