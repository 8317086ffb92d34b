use gloo::timers::future::TimeoutFuture;
use shared::discount::{self, DiscountTracker, BASE_DISCOUNT, TRANSITION_MS};
use shared::{CleaningType, DiscountQuote, DiscountTransition, PropertyType};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const FRAME_MS: u32 = 16;

pub struct UseDiscountResult {
    pub quote: DiscountQuote,
    /// Percentage currently on screen, trails `quote.percentage` while animating
    pub displayed: u8,
}

/// Progress values for each animation frame, ending exactly at 1.0
fn frame_progress(duration_ms: u32, frame_ms: u32) -> Vec<f64> {
    let frames = duration_ms.div_ceil(frame_ms.max(1)).max(1);
    (1..=frames)
        .map(|frame| f64::from(frame) / f64::from(frames))
        .collect()
}

#[hook]
pub fn use_discount(
    property_type: Option<PropertyType>,
    cleaning_type: Option<CleaningType>,
    services: usize,
) -> UseDiscountResult {
    let quote = use_memo((property_type, cleaning_type, services), |(property, cleaning, services)| {
        discount::compute(*property, *cleaning, *services)
    });
    let tracker = use_mut_ref(DiscountTracker::default);
    let animation = use_mut_ref(|| 0u32);
    let displayed = use_state(|| BASE_DISCOUNT);

    {
        let displayed = displayed.clone();
        let quote = quote.clone();
        use_effect_with(quote.percentage, move |_| {
            let transition: DiscountTransition = tracker.borrow_mut().update(&quote);
            if transition.is_change() {
                // A newer run bumps the counter and the older one stops at its next frame
                let run = {
                    let mut counter = animation.borrow_mut();
                    *counter = counter.wrapping_add(1);
                    *counter
                };
                log::debug!("discount {}% -> {}%", transition.from, transition.to);

                spawn_local(async move {
                    for progress in frame_progress(TRANSITION_MS, FRAME_MS) {
                        TimeoutFuture::new(FRAME_MS).await;
                        if *animation.borrow() != run {
                            return;
                        }
                        displayed.set(transition.value_at(progress));
                    }
                });
            } else {
                displayed.set(transition.to);
            }
            || ()
        });
    }

    UseDiscountResult {
        quote: (*quote).clone(),
        displayed: *displayed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_end_at_full_progress() {
        let frames = frame_progress(TRANSITION_MS, FRAME_MS);
        assert_eq!(frames.len(), 32);
        assert_eq!(frames.last().copied(), Some(1.0));
        assert!(frames.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_zero_duration_is_one_frame() {
        assert_eq!(frame_progress(0, FRAME_MS), vec![1.0]);
    }
}
