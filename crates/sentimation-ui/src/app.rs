mod dashboard;
mod schedule;
mod toasts;

use gloo::console::log;
use gloo::timers::future::TimeoutFuture;
use sentimation_core::notify::{
  AUTO_DISMISS_MS,
  Notification
};
use yew::{
  Callback,
  ContextProvider,
  Html,
  function_component,
  html,
  use_memo,
  use_reducer
};
use yew_router::prelude::{
  BrowserRouter,
  Link,
  Routable,
  Switch
};

use self::dashboard::Dashboard;
use self::schedule::SchedulePage;
pub use self::toasts::Notifier;
use self::toasts::{
  ToastAction,
  ToastQueue
};
use crate::components::NotificationToasts;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
  #[at("/")]
  Dashboard,
  #[at("/schedule")]
  Schedule,
  #[not_found]
  #[at("/404")]
  NotFound
}

fn switch(route: Route) -> Html {
  match route {
    | Route::Dashboard => {
      html! { <Dashboard /> }
    }
    | Route::Schedule => {
      html! { <SchedulePage /> }
    }
    | Route::NotFound => html! {
        <div class="alert alert-secondary">{ "Page not found." }</div>
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let toasts =
    use_reducer(ToastQueue::default);

  let notify = {
    let dispatcher = toasts.dispatcher();
    use_memo((), move |_| {
      Notifier::from(
        move |notification: Notification| {
          let id = notification.id;
          dispatcher.dispatch(
            ToastAction::Push(notification)
          );
          let dispatcher = dispatcher.clone();
          wasm_bindgen_futures::spawn_local(
            async move {
              TimeoutFuture::new(
                AUTO_DISMISS_MS
              )
              .await;
              dispatcher.dispatch(
                ToastAction::Dismiss(id)
              );
            }
          );
        }
      )
    })
  };

  let on_dismiss = {
    let dispatcher = toasts.dispatcher();
    Callback::from(move |id: u64| {
      ui_debug(
        "toast.dismiss.click",
        &id.to_string()
      );
      dispatcher
        .dispatch(ToastAction::Dismiss(id));
    })
  };

  html! {
      <ContextProvider<Notifier> context={(*notify).clone()}>
          <BrowserRouter>
              <nav class="nav nav-pills mb-3">
                  <Link<Route> classes="nav-link" to={Route::Dashboard}>{ "Dashboard" }</Link<Route>>
                  <Link<Route> classes="nav-link" to={Route::Schedule}>{ "Schedule task" }</Link<Route>>
              </nav>
              <Switch<Route> render={switch} />
          </BrowserRouter>
          <NotificationToasts
              notifications={toasts.visible().to_vec()}
              on_dismiss={on_dismiss}
          />
      </ContextProvider<Notifier>>
  }
}

fn ui_debug(event: &str, detail: &str) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
