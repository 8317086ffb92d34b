use shared::City;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CityToggleProps {
    pub city: City,
    pub on_change: Callback<City>,
    #[prop_or(AttrValue::Static("city-toggle"))]
    pub class: AttrValue,
}

/// One button per city; the hero and the location section both render it
/// against the same city value
#[function_component(CityToggle)]
pub fn city_toggle(props: &CityToggleProps) -> Html {
    html! {
        <div class={props.class.clone()} role="tablist">
            {for City::ALL.iter().map(|city| {
                let city = *city;
                let active = city == props.city;
                let onclick = {
                    let on_change = props.on_change.clone();
                    Callback::from(move |_: MouseEvent| {
                        if !active {
                            on_change.emit(city);
                        }
                    })
                };
                html! {
                    <button
                        type="button"
                        role="tab"
                        class={classes!("city-btn", active.then_some("active"))}
                        data-city={city.key()}
                        aria-selected={active.to_string()}
                        {onclick}
                    >
                        {city.display_name()}
                    </button>
                }
            })}
        </div>
    }
}
