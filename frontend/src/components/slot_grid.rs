use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::schedule::{avatar_seed, pick_avatars, DAY_COUNT};
use shared::{City, DayLabel, SlotId, SlotView, TimeBucket};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SlotGridProps {
    pub city: City,
    pub day_labels: [DayLabel; DAY_COUNT],
    pub rows: Vec<Vec<SlotView>>,
    #[prop_or_default]
    pub stable_avatars: bool,
    pub on_select: Callback<SlotId>,
}

/// Generator for one render pass, seeded from the browser's Math.random
fn fresh_rng() -> StdRng {
    StdRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
}

fn avatars_for(city: City, view: &SlotView, stable: bool, fresh: &mut StdRng) -> Vec<&'static str> {
    let count = view.slot.avatar_count();
    if stable {
        let mut seeded = StdRng::seed_from_u64(avatar_seed(city, view.slot.id));
        pick_avatars(city, count, &mut seeded)
    } else {
        pick_avatars(city, count, fresh)
    }
}

#[function_component(SlotGrid)]
pub fn slot_grid(props: &SlotGridProps) -> Html {
    let mut rng = fresh_rng();
    let avatars: Vec<Vec<Vec<&'static str>>> = props
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|view| avatars_for(props.city, view, props.stable_avatars, &mut rng))
                .collect()
        })
        .collect();

    html! {
        <div class="slot-grid" data-city={props.city.key()}>
            <div class="slot-grid-header">
                <span class="slot-grid-corner"></span>
                {for TimeBucket::ALL.iter().map(|bucket| html! {
                    <span class="time-header">{bucket.label()}</span>
                })}
            </div>
            {for props.rows.iter().zip(props.day_labels.iter()).zip(avatars).map(|((row, label), row_avatars)| html! {
                <div class="day-row" data-day={label.day_index.to_string()} data-date={label.iso()}>
                    <div class="day-label">
                        <span class="day-number">{label.number()}</span>
                        <span class="day-month">{label.month_abbr()}</span>
                    </div>
                    {for row.iter().zip(row_avatars).map(|(view, avatars)| {
                        let id = view.slot.id;
                        let onclick = {
                            let on_select = props.on_select.clone();
                            Callback::from(move |_: MouseEvent| on_select.emit(id))
                        };
                        html! {
                            <div
                                class={view.css_class()}
                                data-day={id.day.to_string()}
                                data-time={id.time.label()}
                                data-discount={view.data_discount()}
                                role="button"
                                {onclick}
                            >
                                <div class="slot-avatars">
                                    {for avatars.into_iter().map(|src| html! {
                                        <img class="slot-avatar" src={src} alt="Мастер" loading="lazy" />
                                    })}
                                </div>
                                <span class="slot-caption">{view.caption()}</span>
                                {if let Some(badge) = view.badge() {
                                    html! { <span class="discount-badge">{badge}</span> }
                                } else { html! {} }}
                            </div>
                        }
                    })}
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::SlotSelection;

    fn views(city: City) -> Vec<SlotView> {
        let selection = SlotSelection::new(city, NaiveDate::from_ymd_opt(2025, 10, 18).unwrap());
        selection.render().into_iter().flatten().collect()
    }

    #[test]
    fn test_stable_avatars_repeat_across_renders() {
        for view in views(City::Astana) {
            let first = avatars_for(City::Astana, &view, true, &mut StdRng::seed_from_u64(1));
            let second = avatars_for(City::Astana, &view, true, &mut StdRng::seed_from_u64(2));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_avatar_count_follows_status() {
        let mut rng = StdRng::seed_from_u64(3);
        for view in views(City::Almaty) {
            let avatars = avatars_for(City::Almaty, &view, false, &mut rng);
            assert_eq!(avatars.len(), view.slot.avatar_count());
            assert!(avatars.iter().all(|src| src.contains("almaty")));
        }
    }
}
