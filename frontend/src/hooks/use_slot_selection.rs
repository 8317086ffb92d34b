use chrono::NaiveDate;
use shared::schedule::DAY_COUNT;
use shared::{City, CtaLabel, DayLabel, SelectedSlot, SlotId, SlotSelection, SlotView};
use std::rc::Rc;
use yew::prelude::*;

pub enum SlotAction {
    Select(SlotId),
    CityChanged(City),
    AutoSelect,
    /// Drop the selection after a successful booking
    Reset,
    NewDay(NaiveDate),
}

/// Reducer state around the pure selection model. `generation` moves whenever
/// the selection is dropped so the auto-select effect runs again.
#[derive(Clone, PartialEq)]
struct SlotSelectionStore {
    selection: SlotSelection,
    generation: u32,
}

impl Reducible for SlotSelectionStore {
    type Action = SlotAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SlotAction::Select(id) => {
                if next.selection.select(id).is_none() {
                    log::warn!("ignored selection outside the grid: {:?}", id);
                    return self;
                }
            }
            SlotAction::CityChanged(city) => {
                if city == next.selection.city() {
                    return self;
                }
                next.selection.on_city_changed(city);
                next.generation = next.generation.wrapping_add(1);
            }
            SlotAction::AutoSelect => {
                if !next.selection.auto_select_best_discount() {
                    return self;
                }
            }
            SlotAction::Reset => {
                next.selection.clear();
                next.generation = next.generation.wrapping_add(1);
            }
            SlotAction::NewDay(today) => {
                if today == next.selection.today() {
                    return self;
                }
                next.selection.refresh(today);
                next.generation = next.generation.wrapping_add(1);
            }
        }
        Rc::new(next)
    }
}

/// The selection as it looks once `city` is applied. `None` when the store
/// already shows that city.
fn switched_selection(store: &SlotSelectionStore, city: City) -> Option<SlotSelection> {
    if city == store.selection.city() {
        return None;
    }
    let mut selection = store.selection.clone();
    selection.on_city_changed(city);
    Some(selection)
}

#[derive(Clone, PartialEq)]
pub struct SlotSelectionState {
    pub city: City,
    pub day_labels: [DayLabel; DAY_COUNT],
    pub rows: Vec<Vec<SlotView>>,
    pub selected: Option<SelectedSlot>,
    pub cta: CtaLabel,
    /// Serialized selection for the hidden `selected_slot` field
    pub hidden_field: Option<String>,
}

#[derive(Clone)]
pub struct SlotSelectionActions {
    pub select: Callback<SlotId>,
    pub reset: Callback<()>,
    pub new_day: Callback<NaiveDate>,
}

pub struct UseSlotSelectionResult {
    pub state: SlotSelectionState,
    pub actions: SlotSelectionActions,
}

#[hook]
pub fn use_slot_selection(city: City, today: NaiveDate) -> UseSlotSelectionResult {
    let store = use_reducer(|| SlotSelectionStore {
        selection: SlotSelection::new(city, today),
        generation: 0,
    });

    // The city lives in the app root. Follow it during this render so the
    // hero never shows the previous city's grid or selection.
    let switched = switched_selection(&store, city);
    if switched.is_some() {
        store.dispatch(SlotAction::CityChanged(city));
    }

    {
        let dispatcher = store.dispatcher();
        use_effect_with(store.generation, move |_| {
            dispatcher.dispatch(SlotAction::AutoSelect);
            || ()
        });
    }

    let select = {
        let dispatcher = store.dispatcher();
        use_callback((), move |id: SlotId, _| dispatcher.dispatch(SlotAction::Select(id)))
    };

    let reset = {
        let dispatcher = store.dispatcher();
        use_callback((), move |_: (), _| dispatcher.dispatch(SlotAction::Reset))
    };

    let new_day = {
        let dispatcher = store.dispatcher();
        use_callback((), move |today: NaiveDate, _| dispatcher.dispatch(SlotAction::NewDay(today)))
    };

    let selection = switched.as_ref().unwrap_or(&store.selection);
    let hidden_field = match selection.hidden_field_value() {
        Ok(value) => value,
        Err(e) => {
            log::error!("{}", e);
            None
        }
    };

    let state = SlotSelectionState {
        city: selection.city(),
        day_labels: selection.day_labels(),
        rows: selection.render(),
        selected: selection.selected_slot().cloned(),
        cta: selection.cta_label(),
        hidden_field,
    };

    let actions = SlotSelectionActions {
        select,
        reset,
        new_day,
    };

    UseSlotSelectionResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TimeBucket;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 18).unwrap()
    }

    fn id(day: usize, time: TimeBucket) -> SlotId {
        SlotId::new(day, time).unwrap()
    }

    fn store(city: City) -> Rc<SlotSelectionStore> {
        Rc::new(SlotSelectionStore {
            selection: SlotSelection::new(city, today()),
            generation: 0,
        })
    }

    #[test]
    fn test_select_replaces_selection() {
        let store = store(City::Almaty).reduce(SlotAction::Select(id(1, TimeBucket::Morning)));
        assert_eq!(store.selection.selected_id(), Some(id(1, TimeBucket::Morning)));

        let store = store.reduce(SlotAction::Select(id(0, TimeBucket::Afternoon)));
        assert_eq!(store.selection.selected_id(), Some(id(0, TimeBucket::Afternoon)));
        assert_eq!(store.generation, 0);
    }

    #[test]
    fn test_auto_select_only_fills_empty_selection() {
        let store = store(City::Almaty).reduce(SlotAction::AutoSelect);
        assert_eq!(store.selection.selected_id(), Some(id(0, TimeBucket::Afternoon)));

        let store = store.reduce(SlotAction::Select(id(2, TimeBucket::Evening)));
        let store = store.reduce(SlotAction::AutoSelect);
        assert_eq!(store.selection.selected_id(), Some(id(2, TimeBucket::Evening)));
    }

    #[test]
    fn test_city_change_clears_and_reruns_auto_select() {
        let store = store(City::Almaty).reduce(SlotAction::AutoSelect);
        let store = store.reduce(SlotAction::CityChanged(City::Astana));
        assert_eq!(store.selection.city(), City::Astana);
        assert_eq!(store.selection.selected_id(), None);
        assert_eq!(store.generation, 1);

        let store = store.reduce(SlotAction::AutoSelect);
        assert_eq!(store.selection.selected_id(), Some(id(0, TimeBucket::Morning)));
    }

    #[test]
    fn test_same_city_is_a_no_op() {
        let before = store(City::Almaty).reduce(SlotAction::Select(id(1, TimeBucket::Morning)));
        let after = Rc::clone(&before).reduce(SlotAction::CityChanged(City::Almaty));
        assert!(Rc::ptr_eq(&before, &after));
        assert_eq!(after.selection.selected_id(), Some(id(1, TimeBucket::Morning)));
        assert_eq!(after.generation, 0);
    }

    #[test]
    fn test_reset_clears_and_reruns_auto_select() {
        let store = store(City::Almaty).reduce(SlotAction::Select(id(2, TimeBucket::Evening)));
        let store = store.reduce(SlotAction::Reset);
        assert_eq!(store.selection.selected_id(), None);
        assert_eq!(store.generation, 1);

        let store = store.reduce(SlotAction::AutoSelect);
        assert_eq!(store.selection.selected_id(), Some(id(0, TimeBucket::Afternoon)));
    }

    #[test]
    fn test_new_day_clears_and_moves_dates() {
        let tomorrow = today().succ_opt().unwrap();
        let store = store(City::Almaty).reduce(SlotAction::AutoSelect);
        let store = store.reduce(SlotAction::NewDay(tomorrow));
        assert_eq!(store.selection.selected_id(), None);
        assert_eq!(store.selection.today(), tomorrow);
        assert_eq!(store.selection.day_labels()[0].date, tomorrow.succ_opt().unwrap());
        assert_eq!(store.generation, 1);

        let again = Rc::clone(&store).reduce(SlotAction::NewDay(tomorrow));
        assert!(Rc::ptr_eq(&store, &again));
    }

    #[test]
    fn test_switched_selection_shows_new_city_before_dispatch() {
        let store = store(City::Almaty).reduce(SlotAction::AutoSelect);
        assert!(switched_selection(&store, City::Almaty).is_none());

        let shown = switched_selection(&store, City::Astana).unwrap();
        assert_eq!(shown.city(), City::Astana);
        assert_eq!(shown.selected_id(), None);
        // the store itself only moves once the dispatch is reduced
        assert_eq!(store.selection.city(), City::Almaty);
    }
}
