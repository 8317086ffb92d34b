use crate::city::City;
use crate::schedule::{
    day_labels, CitySchedule, DayLabel, OccupancyStatus, ScheduleGenerator, Slot, SlotId,
    TimeBucket, DAY_COUNT,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Text on the hero call-to-action button
pub const CTA_BASE_LABEL: &str = "Беру слот";

/// The slot the visitor is about to book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSlot {
    pub day: usize,
    pub time: TimeBucket,
    /// Calendar date, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    pub discount: u8,
    /// Display form, e.g. "19 окт в 13-17"
    pub formatted: String,
}

impl SelectedSlot {
    pub fn id(&self) -> SlotId {
        SlotId {
            day: self.day,
            time: self.time,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to serialize selected slot: {0}")]
pub struct HiddenFieldError(#[from] serde_json::Error);

/// Call-to-action label, with the discount note split out for styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtaLabel {
    pub text: &'static str,
    pub discount_note: Option<String>,
}

impl CtaLabel {
    pub fn for_discount(discount: u8) -> Self {
        Self {
            text: CTA_BASE_LABEL,
            discount_note: (discount > 0).then(|| format!("(минус {}%)", discount)),
        }
    }

    pub fn plain_text(&self) -> String {
        match &self.discount_note {
            Some(note) => format!("{} {}", self.text, note),
            None => self.text.to_string(),
        }
    }
}

/// Everything the grid needs to paint one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub slot: Slot,
    pub selected: bool,
}

impl SlotView {
    pub fn css_class(&self) -> String {
        let mut class = format!("time-slot {}", self.slot.status.css_class());
        if self.selected {
            class.push_str(" selected");
        }
        class
    }

    pub fn caption(&self) -> &'static str {
        self.slot.status.caption()
    }

    pub fn badge(&self) -> Option<String> {
        self.slot.discount_badge()
    }

    /// Value for the element's `data-discount`; absent unless a badge is shown
    pub fn data_discount(&self) -> Option<String> {
        self.badge().map(|_| self.slot.discount.to_string())
    }
}

/// Selection state for the booking grid.
///
/// At most one slot is selected. The selection is scoped to the current city,
/// so switching city drops it before the new schedule is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSelection {
    city: City,
    today: NaiveDate,
    generator: ScheduleGenerator,
    schedule: CitySchedule,
    selected: Option<SelectedSlot>,
}

impl SlotSelection {
    pub fn new(city: City, today: NaiveDate) -> Self {
        let mut generator = ScheduleGenerator::new();
        let schedule = generator.schedule_for(city).clone();
        Self {
            city,
            today,
            generator,
            schedule,
            selected: None,
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn schedule(&self) -> &CitySchedule {
        &self.schedule
    }

    pub fn day_labels(&self) -> [DayLabel; DAY_COUNT] {
        day_labels(self.today)
    }

    /// Rows of cells for the current city, tomorrow first
    pub fn render(&self) -> Vec<Vec<SlotView>> {
        let selected_id = self.selected_id();
        (0..DAY_COUNT)
            .filter_map(|day| self.schedule.row(day))
            .map(|row| {
                row.iter()
                    .map(|slot| SlotView {
                        slot: *slot,
                        selected: selected_id == Some(slot.id),
                    })
                    .collect()
            })
            .collect()
    }

    /// Replace the current selection with `id`. Returns `None` for ids
    /// outside the grid, leaving the previous selection untouched.
    pub fn select(&mut self, id: SlotId) -> Option<&SelectedSlot> {
        let slot = *self.schedule.slot(id)?;
        let label = day_labels(self.today).into_iter().nth(id.day)?;

        let discount = if slot.status == OccupancyStatus::Available {
            slot.discount
        } else {
            0
        };

        let selected = SelectedSlot {
            day: id.day,
            time: id.time,
            date: label.date,
            discount,
            formatted: format!("{} в {}", label.text(), id.time.label()),
        };

        log::info!(
            "slot selected in {}: {} (discount {}%)",
            self.city.key(),
            selected.formatted,
            selected.discount
        );

        self.selected = Some(selected);
        self.selected.as_ref()
    }

    /// Pick the first slot with the top discount, but only when nothing is
    /// selected yet. Returns true if a selection was made.
    pub fn auto_select_best_discount(&mut self) -> bool {
        if self.selected.is_some() {
            return false;
        }

        match self.schedule.best_discount_slot() {
            Some(id) => self.select(id).is_some(),
            None => false,
        }
    }

    /// Switch to `city`. A different city clears the selection before the
    /// new schedule is applied. Returns true if a selection was dropped.
    pub fn on_city_changed(&mut self, city: City) -> bool {
        let mut cleared = false;
        if city != self.city {
            cleared = self.selected.take().is_some();
            if cleared {
                log::debug!("selection cleared by city switch to {}", city.key());
            }
        }

        self.city = city;
        self.schedule = self.generator.schedule_for(city).clone();
        cleared
    }

    /// Move the grid to a new day; the old selection points at stale dates
    pub fn refresh(&mut self, today: NaiveDate) {
        self.clear();
        self.today = today;
        self.schedule = self.generator.schedule_for(self.city).clone();
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_slot(&self) -> Option<&SelectedSlot> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<SlotId> {
        self.selected.as_ref().map(SelectedSlot::id)
    }

    pub fn cta_label(&self) -> CtaLabel {
        CtaLabel::for_discount(self.selected.as_ref().map_or(0, |slot| slot.discount))
    }

    /// Serialized selection for the hidden `selected_slot` form field
    pub fn hidden_field_value(&self) -> Result<Option<String>, HiddenFieldError> {
        self.selected
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(HiddenFieldError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 18).unwrap()
    }

    fn id(day: usize, time: TimeBucket) -> SlotId {
        SlotId::new(day, time).unwrap()
    }

    #[test]
    fn test_almaty_middle_slot_tomorrow() {
        let mut selection = SlotSelection::new(City::Almaty, today());
        selection.select(id(0, TimeBucket::Afternoon));

        let selected = selection.selected_slot().unwrap();
        assert_eq!(selected.discount, 25);
        assert_eq!(selected.date, NaiveDate::from_ymd_opt(2025, 10, 19).unwrap());
        assert!(selected.formatted.contains("19 окт"));
        assert_eq!(selected.formatted, "19 окт в 13-17");
    }

    #[test]
    fn test_new_selection_replaces_previous() {
        let mut selection = SlotSelection::new(City::Almaty, today());
        selection.select(id(0, TimeBucket::Afternoon));
        selection.select(id(2, TimeBucket::Evening));

        let selected = selection.selected_slot().unwrap();
        assert_eq!(selected.id(), id(2, TimeBucket::Evening));
        assert_eq!(selected.discount, 0);

        let selected_cells: usize = selection
            .render()
            .iter()
            .flatten()
            .filter(|view| view.selected)
            .count();
        assert_eq!(selected_cells, 1);
    }

    #[test]
    fn test_limited_slot_can_be_selected_without_discount() {
        let mut selection = SlotSelection::new(City::Almaty, today());
        let selected = selection.select(id(0, TimeBucket::Morning)).unwrap();
        assert_eq!(selected.discount, 0);
        assert_eq!(selection.cta_label().plain_text(), "Беру слот");
    }

    #[test]
    fn test_auto_select_picks_best_discount() {
        let mut selection = SlotSelection::new(City::Astana, today());
        assert!(selection.auto_select_best_discount());
        assert_eq!(selection.selected_id(), Some(id(0, TimeBucket::Morning)));
        assert_eq!(selection.cta_label().plain_text(), "Беру слот (минус 25%)");
    }

    #[test]
    fn test_auto_select_is_idempotent() {
        let mut selection = SlotSelection::new(City::Almaty, today());
        assert!(selection.auto_select_best_discount());
        let first = selection.selected_slot().cloned();
        assert!(!selection.auto_select_best_discount());
        assert_eq!(selection.selected_slot().cloned(), first);
    }

    #[test]
    fn test_auto_select_keeps_manual_choice() {
        let mut selection = SlotSelection::new(City::Almaty, today());
        selection.select(id(1, TimeBucket::Morning));
        assert!(!selection.auto_select_best_discount());
        assert_eq!(selection.selected_id(), Some(id(1, TimeBucket::Morning)));
    }

    #[test]
    fn test_city_switch_clears_selection() {
        let mut selection = SlotSelection::new(City::Almaty, today());
        selection.select(id(0, TimeBucket::Afternoon));
        assert!(selection.on_city_changed(City::Astana));
        assert!(selection.selected_slot().is_none());
        assert_eq!(selection.city(), City::Astana);
        assert_eq!(selection.schedule().city, City::Astana);
    }

    #[test]
    fn test_same_city_keeps_selection() {
        let mut selection = SlotSelection::new(City::Almaty, today());
        selection.select(id(0, TimeBucket::Afternoon));
        assert!(!selection.on_city_changed(City::Almaty));
        assert!(selection.selected_slot().is_some());
    }

    #[test]
    fn test_switching_back_reuses_schedule() {
        let mut selection = SlotSelection::new(City::Almaty, today());
        let first = selection.schedule().clone();
        selection.on_city_changed(City::Astana);
        selection.on_city_changed(City::Almaty);
        assert_eq!(selection.schedule(), &first);
    }

    #[test]
    fn test_hidden_field_serialization() {
        let mut selection = SlotSelection::new(City::Almaty, today());
        assert_eq!(selection.hidden_field_value().unwrap(), None);

        selection.select(id(0, TimeBucket::Afternoon));
        let json = selection.hidden_field_value().unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["time"], "13-17");
        assert_eq!(value["date"], "2025-10-19");
        assert_eq!(value["discount"], 25);
    }

    #[test]
    fn test_render_marks_badges_and_data_discount() {
        let selection = SlotSelection::new(City::Almaty, today());
        let rows = selection.render();
        assert_eq!(rows.len(), 3);

        let tomorrow_middle = &rows[0][1];
        assert_eq!(tomorrow_middle.badge().as_deref(), Some("-25%"));
        assert_eq!(tomorrow_middle.data_discount().as_deref(), Some("25"));
        assert_eq!(tomorrow_middle.caption(), "Есть слоты");

        let tomorrow_morning = &rows[0][0];
        assert_eq!(tomorrow_morning.data_discount(), None);
        assert_eq!(tomorrow_morning.css_class(), "time-slot limited");
    }

    #[test]
    fn test_refresh_moves_dates_and_clears() {
        let mut selection = SlotSelection::new(City::Almaty, today());
        selection.select(id(0, TimeBucket::Afternoon));
        selection.refresh(NaiveDate::from_ymd_opt(2025, 10, 19).unwrap());
        assert!(selection.selected_slot().is_none());
        assert_eq!(selection.day_labels()[0].text(), "20 окт");
    }
}
