use chrono::NaiveDate;
use shared::lead::{business_now, validate_slot_booking};
use shared::{City, LeadSubmissionFlow, PhoneField, SlotBookingRequest};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::city_toggle::CityToggle;
use crate::components::phone_input::PhoneInput;
use crate::components::slot_grid::SlotGrid;
use crate::hooks::{use_day_rollover, use_slot_selection, use_submission};
use crate::services::telegram::TelegramClient;

#[derive(Properties, PartialEq)]
pub struct HeroBookingProps {
    pub city: City,
    pub on_city_change: Callback<City>,
    pub today: NaiveDate,
    pub flow: LeadSubmissionFlow<TelegramClient>,
    pub visitor_id: Option<AttrValue>,
    #[prop_or_default]
    pub stable_avatars: bool,
}

#[function_component(HeroBooking)]
pub fn hero_booking(props: &HeroBookingProps) -> Html {
    let slots = use_slot_selection(props.city, props.today);
    let phone = use_state(PhoneField::new);

    use_day_rollover(slots.actions.new_day.clone());

    let on_reset = {
        let phone = phone.clone();
        let reset_slots = slots.actions.reset.clone();
        use_callback((), move |_: (), _| {
            phone.set(PhoneField::new());
            reset_slots.emit(());
        })
    };
    let submission = use_submission(on_reset);

    let on_phone_change = {
        let phone = phone.clone();
        Callback::from(move |field: PhoneField| phone.set(field))
    };

    let onsubmit = {
        let phone = phone.clone();
        let selected = slots.state.selected.clone();
        let city = slots.state.city;
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
            let check = SlotBookingRequest {
                phone: &phone_value,
                city,
                slot: selected.as_ref(),
                visitor_id: visitor_id.as_deref(),
                submitted_at: business_now(),
            };
            if let Err(error) = validate_slot_booking(&check) {
                actions.finish.emit(Err(error));
                return;
            }

            actions.start.emit(());
            let flow = flow.clone();
            let selected = selected.clone();
            let finish = actions.finish.clone();
            spawn_local(async move {
                let request = SlotBookingRequest {
                    phone: &phone_value,
                    city,
                    slot: selected.as_ref(),
                    visitor_id: visitor_id.as_deref(),
                    submitted_at: business_now(),
                };
                let result = flow.submit_slot_booking(&request).await;
                finish.emit(result);
            });
        })
    };

    let status = &submission.status;
    let cta = &slots.state.cta;

    html! {
        <section class="hero-booking" id="hero-booking">
            <CityToggle
                city={slots.state.city}
                on_change={props.on_city_change.clone()}
                class="hero-city-tiles"
            />

            <SlotGrid
                city={slots.state.city}
                day_labels={slots.state.day_labels.clone()}
                rows={slots.state.rows.clone()}
                stable_avatars={props.stable_avatars}
                on_select={slots.actions.select.clone()}
            />

            {if let Some(selected) = slots.state.selected.as_ref() {
                html! {
                    <p class="selected-slot-info">
                        {"Выбрано: "}<strong>{&selected.formatted}</strong>
                    </p>
                }
            } else { html! {} }}

            <form class="hero-booking-form" {onsubmit}>
                <input
                    type="hidden"
                    name="selected_slot"
                    value={slots.state.hidden_field.clone().unwrap_or_default()}
                />
                <PhoneInput
                    field={(*phone).clone()}
                    on_change={on_phone_change}
                    invalid={status.phone_invalid()}
                    id="hero-phone"
                />

                {if let Some(message) = status.error_message() {
                    html! { <div class="form-message error">{message}</div> }
                } else { html! {} }}

                <button
                    type="submit"
                    class={classes!("cta-button", status.is_sent().then_some("success"))}
                    disabled={status.is_sending()}
                >
                    {if status.is_sending() {
                        html! { {"Отправляем..."} }
                    } else if status.is_sent() {
                        html! { {"✓ Заявка принята!"} }
                    } else {
                        html! {
                            <>
                                {cta.text}
                                {if let Some(note) = cta.discount_note.as_ref() {
                                    html! { <span class="cta-discount">{" "}{note}</span> }
                                } else { html! {} }}
                            </>
                        }
                    }}
                </button>
            </form>
        </section>
    }
}
