use shared::City;
use yew::prelude::*;

use crate::components::city_toggle::CityToggle;

#[derive(Properties, PartialEq)]
pub struct LocationSectionProps {
    pub city: City,
    pub on_city_change: Callback<City>,
}

#[function_component(LocationSection)]
pub fn location_section(props: &LocationSectionProps) -> Html {
    let office = props.city.office();

    html! {
        <section class="location-section" id="location" data-city={props.city.key()}>
            <CityToggle
                city={props.city}
                on_change={props.on_city_change.clone()}
                class="location-city-toggle"
            />
            <div class="office-info">
                <h3>{office.title}</h3>
                <p class="office-address">{office.address}</p>
            </div>
            <iframe
                class="office-map"
                src={office.map_url}
                title={office.title}
                loading="lazy"
            ></iframe>
            <div class="masters-gallery">
                {for props.city.master_photos().into_iter().map(|src| html! {
                    <img class="master-photo" {src} alt="Мастер" loading="lazy" />
                })}
            </div>
        </section>
    }
}
