mod components;
mod hooks;
mod services;

use gloo::events::EventListener;
use shared::{City, LeadSubmissionFlow};
use web_sys::Element;
use yew::prelude::*;

use components::{CustomPackage, HeroBooking, LocationSection};
use services::config::AppConfig;
use services::element_watch::{ElementWatch, WatchBudget};
use services::logging::Logger;
use services::telegram::TelegramClient;
use services::{date_utils, location, visitor};

/// Reply button of the third-party consultant widget, inserted some time after load
const CONSULTANT_REPLY_SELECTOR: &str = ".consultant-reply-btn";

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AppConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let config = &props.config;
    let city = use_state(location::initial_city);
    let today = use_state(date_utils::today);
    let visitor_id = use_memo((), |_| visitor::visitor_id().map(AttrValue::from));
    let flow = use_memo(config.clone(), |config| {
        if !config.is_configured() {
            Logger::warn_with_component("app", "messaging is not configured, leads will not be delivered");
        }
        LeadSubmissionFlow::new(
            TelegramClient::new(config),
            config.chat_id.clone().unwrap_or_default(),
        )
    });

    // Hero tiles and the location toggle share this one handler
    let on_city_change = {
        let city = city.clone();
        Callback::from(move |next: City| {
            if next != *city {
                log::info!("city switched to {}", next.key());
                location::push_city(next);
                city.set(next);
            }
        })
    };

    {
        let budget = WatchBudget::new(config.widget_watch_interval_ms, config.widget_watch_timeout_ms);
        use_effect_with(budget, |budget| {
            let watch = ElementWatch::start(CONSULTANT_REPLY_SELECTOR, *budget, |button: Element| {
                EventListener::new(&button, "click", |_| {
                    Logger::info_with_component("consultant", "reply button clicked");
                })
                .forget();
            });
            move || drop(watch)
        });
    }

    html! {
        <>
            <HeroBooking
                city={*city}
                on_city_change={on_city_change.clone()}
                today={*today}
                flow={(*flow).clone()}
                visitor_id={(*visitor_id).clone()}
                stable_avatars={config.stable_avatars}
            />
            <CustomPackage
                flow={(*flow).clone()}
                visitor_id={(*visitor_id).clone()}
            />
            <LocationSection city={*city} {on_city_change} />
        </>
    }
}

fn mount_point(selector: &str) -> Option<Element> {
    web_sys::window()?
        .document()?
        .query_selector(selector)
        .ok()
        .flatten()
}

fn main() {
    let config = AppConfig::from_env();
    Logger::install(config.log_level);

    match mount_point(&config.mount_selector) {
        Some(root) => {
            log::info!("mounting booking widget into {}", config.mount_selector);
            yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
        }
        None => log::debug!("{} not on this page, nothing to mount", config.mount_selector),
    }
}
