use shared::City;
use wasm_bindgen::JsValue;
use web_sys::Url;

pub const CITY_PARAM: &str = "city";

fn current_href() -> Option<String> {
    web_sys::window().and_then(|window| window.location().href().ok())
}

/// City named by `?city=` in `href`, first city otherwise
pub fn city_from_href(href: &str) -> City {
    let key = Url::new(href)
        .ok()
        .and_then(|url| url.search_params().get(CITY_PARAM));
    City::from_key_or_default(key.as_deref())
}

/// `href` with the `city` parameter replaced, other parameters kept
pub fn href_with_city(href: &str, city: City) -> Option<String> {
    let url = Url::new(href).ok()?;
    url.search_params().set(CITY_PARAM, city.key());
    Some(url.href())
}

pub fn initial_city() -> City {
    current_href().map_or_else(City::default, |href| city_from_href(&href))
}

/// Record the city in the address bar without reloading
pub fn push_city(city: City) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(href) = current_href().and_then(|href| href_with_city(&href, city)) else {
        return;
    };
    let pushed = window
        .history()
        .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&href)));
    if let Err(e) = pushed {
        log::warn!("pushState failed: {:?}", e);
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_city_from_query() {
        assert_eq!(city_from_href("https://example.kz/?city=astana"), City::Astana);
        assert_eq!(city_from_href("https://example.kz/?city=paris"), City::Almaty);
        assert_eq!(city_from_href("https://example.kz/"), City::Almaty);
    }

    #[wasm_bindgen_test]
    fn test_city_written_back() {
        let href = href_with_city("https://example.kz/?utm=ads&city=almaty", City::Astana).unwrap();
        assert_eq!(href, "https://example.kz/?utm=ads&city=astana");
    }
}
