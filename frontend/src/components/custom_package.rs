use shared::discount::estimate_rooms;
use shared::lead::{business_now, validate_custom_package};
use shared::{
    AdditionalService, CleaningType, CustomPackageRequest, LeadSubmissionFlow, PhoneField,
    PropertyType,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::phone_input::PhoneInput;
use crate::hooks::{use_discount, use_submission};
use crate::services::telegram::TelegramClient;

#[derive(Properties, PartialEq)]
pub struct CustomPackageProps {
    pub flow: LeadSubmissionFlow<TelegramClient>,
    pub visitor_id: Option<AttrValue>,
}

/// Checked services in catalog order, whatever order they were clicked in
fn toggle_service(current: &[AdditionalService], service: AdditionalService) -> Vec<AdditionalService> {
    AdditionalService::ALL
        .iter()
        .copied()
        .filter(|candidate| {
            let checked = current.contains(candidate);
            if *candidate == service {
                !checked
            } else {
                checked
            }
        })
        .collect()
}

#[function_component(CustomPackage)]
pub fn custom_package(props: &CustomPackageProps) -> Html {
    let property_type = use_state(|| Option::<PropertyType>::None);
    let cleaning_type = use_state(|| Option::<CleaningType>::None);
    let services = use_state(Vec::<AdditionalService>::new);
    let area = use_state(String::new);
    let phone = use_state(PhoneField::new);

    let discount = use_discount(*property_type, *cleaning_type, services.len());

    let on_reset = {
        let property_type = property_type.clone();
        let cleaning_type = cleaning_type.clone();
        let services = services.clone();
        let area = area.clone();
        let phone = phone.clone();
        use_callback((), move |_: (), _| {
            property_type.set(None);
            cleaning_type.set(None);
            services.set(Vec::new());
            area.set(String::new());
            phone.set(PhoneField::new());
        })
    };
    let submission = use_submission(on_reset);

    let on_area_input = {
        let area = area.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            area.set(input.value());
        })
    };

    let on_phone_change = {
        let phone = phone.clone();
        Callback::from(move |field: PhoneField| phone.set(field))
    };

    let onsubmit = {
        let property_type = *property_type;
        let cleaning_type = *cleaning_type;
        let services = (*services).clone();
        let area = (*area).clone();
        let phone = phone.clone();
        let flow = props.flow.clone();
        let visitor_id = props.visitor_id.clone();
        let status = submission.status.clone();
        let actions = submission.actions.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if status.is_sending() || status.is_sent() {
                return;
            }

            let phone_value = phone.value().to_string();
            let visitor_id = visitor_id.as_ref().map(|id| id.to_string());
            let check = CustomPackageRequest {
                phone: &phone_value,
                area: &area,
                property_type,
                cleaning_type,
                services: &services,
                visitor_id: visitor_id.as_deref(),
                submitted_at: business_now(),
            };
            if let Err(error) = validate_custom_package(&check) {
                actions.finish.emit(Err(error));
                return;
            }

            actions.start.emit(());
            let flow = flow.clone();
            let area = area.clone();
            let services = services.clone();
            let finish = actions.finish.clone();
            spawn_local(async move {
                let request = CustomPackageRequest {
                    phone: &phone_value,
                    area: &area,
                    property_type,
                    cleaning_type,
                    services: &services,
                    visitor_id: visitor_id.as_deref(),
                    submitted_at: business_now(),
                };
                let result = flow.submit_custom_package(&request).await;
                finish.emit(result);
            });
        })
    };

    let status = &submission.status;
    let quote = &discount.quote;

    html! {
        <section class="custom-package" id="custom-package">
            <h2>{"Соберите свой пакет"}</h2>
            <form class="custom-package-form" {onsubmit}>
                <div class="option-group property-types">
                    {for PropertyType::ALL.iter().map(|option| {
                        let option = *option;
                        let active = *property_type == Some(option);
                        let onclick = {
                            let property_type = property_type.clone();
                            Callback::from(move |_: MouseEvent| property_type.set(Some(option)))
                        };
                        html! {
                            <button
                                type="button"
                                class={classes!("option-btn", active.then_some("active"))}
                                data-type={option.key()}
                                {onclick}
                            >
                                {option.label()}
                            </button>
                        }
                    })}
                </div>

                <div class="option-group cleaning-types">
                    {for CleaningType::ALL.iter().map(|option| {
                        let option = *option;
                        let active = *cleaning_type == Some(option);
                        let onclick = {
                            let cleaning_type = cleaning_type.clone();
                            Callback::from(move |_: MouseEvent| cleaning_type.set(Some(option)))
                        };
                        html! {
                            <button
                                type="button"
                                class={classes!("option-btn", active.then_some("active"))}
                                data-type={option.key()}
                                {onclick}
                            >
                                {option.label()}
                            </button>
                        }
                    })}
                </div>

                <div class="additional-services">
                    {for AdditionalService::ALL.iter().map(|service| {
                        let service = *service;
                        let onchange = {
                            let services = services.clone();
                            Callback::from(move |_: Event| services.set(toggle_service(&services, service)))
                        };
                        html! {
                            <label class="service-option">
                                <input
                                    type="checkbox"
                                    id={service.id()}
                                    checked={services.contains(&service)}
                                    {onchange}
                                />
                                {service.name()}
                            </label>
                        }
                    })}
                </div>

                <div class="area-field">
                    <input
                        type="number"
                        min="1"
                        name="area"
                        placeholder="Площадь, м²"
                        class={classes!("area-input", status.area_invalid().then_some("input-error"))}
                        value={(*area).clone()}
                        oninput={on_area_input}
                    />
                    {if let Some(estimate) = estimate_rooms(&area) {
                        html! { <span class="room-estimate">{estimate}</span> }
                    } else { html! {} }}
                </div>

                <div class={classes!("discount-display", quote.tier().css_class())}>
                    <span class="discount-value">{format!("{}%", discount.displayed)}</span>
                    <ul class="discount-breakdown">
                        {for quote.breakdown.iter().map(|item| html! {
                            <li>
                                <span class="breakdown-label">{&item.label}</span>
                                <span class="breakdown-value">{&item.value}</span>
                            </li>
                        })}
                    </ul>
                </div>

                <PhoneInput
                    field={(*phone).clone()}
                    on_change={on_phone_change}
                    invalid={status.phone_invalid()}
                    id="package-phone"
                />

                {if let Some(message) = status.error_message() {
                    html! { <div class="form-message error">{message}</div> }
                } else { html! {} }}

                <button
                    type="submit"
                    class={classes!("package-submit", status.is_sent().then_some("success"))}
                    disabled={status.is_sending()}
                >
                    {if status.is_sending() {
                        "Отправляем...".to_string()
                    } else if status.is_sent() {
                        "Отправлено".to_string()
                    } else {
                        quote.lock_in_label()
                    }}
                </button>
            </form>
        </section>
    }
}
