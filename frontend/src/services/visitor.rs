use gloo::storage::{SessionStorage, Storage};
use shared::lead::business_now;
use shared::visitor::{generate_visitor_id, DeviceKind, VISITOR_ID_KEY};

fn session_storage_available() -> bool {
    web_sys::window()
        .and_then(|window| window.session_storage().ok().flatten())
        .is_some()
}

fn device_kind() -> DeviceKind {
    web_sys::window()
        .and_then(|window| window.navigator().user_agent().ok())
        .map_or(DeviceKind::Desktop, |agent| DeviceKind::from_user_agent(&agent))
}

/// Id of this browser tab, created on first use and kept in session storage.
/// `None` when storage is unavailable; submissions then go out without it.
pub fn visitor_id() -> Option<String> {
    if !session_storage_available() {
        log::debug!("session storage unavailable, visitor id skipped");
        return None;
    }

    if let Ok(id) = SessionStorage::get::<String>(VISITOR_ID_KEY) {
        return Some(id);
    }

    let id = generate_visitor_id(business_now(), device_kind());
    match SessionStorage::set(VISITOR_ID_KEY, &id) {
        Ok(()) => {
            log::info!("new visitor {}", id);
            Some(id)
        }
        Err(e) => {
            log::warn!("could not store visitor id: {}", e);
            None
        }
    }
}
