use gloo::timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

/// How long and how often to look for an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchBudget {
    pub interval_ms: u32,
    pub timeout_ms: u32,
}

impl WatchBudget {
    pub fn new(interval_ms: u32, timeout_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            timeout_ms,
        }
    }

    /// Whether another check fits after `waited_ms`
    pub fn allows(&self, waited_ms: u32) -> bool {
        waited_ms < self.timeout_ms
    }
}

/// Waits for an element that another script inserts later.
///
/// The selector is checked every interval until it matches, in which case
/// `on_found` runs once, or until the timeout passes. Dropping the handle or
/// calling `cancel` stops the watch.
pub struct ElementWatch {
    cancelled: Rc<Cell<bool>>,
}

impl ElementWatch {
    pub fn start<F>(selector: impl Into<String>, budget: WatchBudget, on_found: F) -> Self
    where
        F: FnOnce(Element) + 'static,
    {
        let cancelled = Rc::new(Cell::new(false));
        let flag = cancelled.clone();
        let selector = selector.into();

        spawn_local(async move {
            let mut waited_ms = 0u32;
            loop {
                if flag.get() {
                    return;
                }
                if let Some(element) = find(&selector) {
                    log::debug!("{} appeared after {}ms", selector, waited_ms);
                    flag.set(true);
                    on_found(element);
                    return;
                }
                if !budget.allows(waited_ms) {
                    log::debug!("gave up waiting for {}", selector);
                    flag.set(true);
                    return;
                }
                TimeoutFuture::new(budget.interval_ms).await;
                waited_ms = waited_ms.saturating_add(budget.interval_ms);
            }
        });

        Self { cancelled }
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// False once the element was found, the time ran out or the watch was cancelled
    pub fn is_active(&self) -> bool {
        !self.cancelled.get()
    }
}

impl Drop for ElementWatch {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn find(selector: &str) -> Option<Element> {
    web_sys::window()?
        .document()?
        .query_selector(selector)
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_bounds() {
        let budget = WatchBudget::new(500, 30_000);
        assert!(budget.allows(0));
        assert!(budget.allows(29_500));
        assert!(!budget.allows(30_000));
        assert_eq!(WatchBudget::new(0, 10).interval_ms, 1);
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_watch_finds_late_element() {
        let document = web_sys::window().unwrap().document().unwrap();
        let found = Rc::new(Cell::new(false));

        let watch = ElementWatch::start(".late-widget", WatchBudget::new(10, 1_000), {
            let found = found.clone();
            move |_| found.set(true)
        });

        TimeoutFuture::new(30).await;
        let element = document.create_element("div").unwrap();
        element.set_class_name("late-widget");
        document.body().unwrap().append_child(&element).unwrap();

        TimeoutFuture::new(50).await;
        assert!(found.get());
        assert!(!watch.is_active());
    }

    #[wasm_bindgen_test]
    async fn test_cancelled_watch_never_fires() {
        let found = Rc::new(Cell::new(false));
        let watch = ElementWatch::start(".never-inserted", WatchBudget::new(10, 1_000), {
            let found = found.clone();
            move |_| found.set(true)
        });
        watch.cancel();
        TimeoutFuture::new(30).await;
        assert!(!found.get());
    }
}
