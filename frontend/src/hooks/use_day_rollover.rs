use chrono::NaiveDate;
use gloo::timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::date_utils;

/// Emits the new date each time the visitor's local midnight passes, so a tab
/// left open overnight does not keep offering yesterday's "tomorrow"
#[hook]
pub fn use_day_rollover(on_new_day: Callback<NaiveDate>) {
    use_effect_with(on_new_day, |on_new_day| {
        let mounted = Rc::new(Cell::new(true));
        {
            let mounted = mounted.clone();
            let on_new_day = on_new_day.clone();
            spawn_local(async move {
                while mounted.get() {
                    TimeoutFuture::new(date_utils::millis_until_midnight()).await;
                    if !mounted.get() {
                        break;
                    }
                    let today = date_utils::today();
                    log::info!("day rolled over to {}", today);
                    on_new_day.emit(today);
                }
            });
        }
        move || mounted.set(false)
    });
}
