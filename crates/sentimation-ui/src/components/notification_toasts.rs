use sentimation_core::notify::Notification;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct NotificationToastsProps {
  pub notifications: Vec<Notification>,
  pub on_dismiss:    Callback<u64>
}

#[function_component(NotificationToasts)]
pub fn notification_toasts(
  props: &NotificationToastsProps
) -> Html {
  html! {
      <div
          class="position-fixed top-0 end-0 p-3"
          style="z-index: 1080; min-width: 300px;"
      >
          {
              for props.notifications.iter().map(|notification| {
                  let on_dismiss = props.on_dismiss.clone();
                  let id = notification.id;
                  html! {
                      <div
                          key={id}
                          class={format!("{} alert-dismissible fade show", notification.severity.alert_class())}
                          role="alert"
                      >
                          { &notification.message }
                          <button
                              type="button"
                              class="btn-close"
                              onclick={move |_| on_dismiss.emit(id)}
                          ></button>
                      </div>
                  }
              })
          }
      </div>
  }
}
