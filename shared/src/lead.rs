//! Lead submission: validate what the visitor entered, compose the chat
//! message and hand it to the messaging sink.
//!
//! Validation failures and a missing slot are returned before anything is
//! sent, so a rejected lead never produces a partial message.

use crate::city::City;
use crate::discount::{self, AdditionalService, CleaningType, PropertyType};
use crate::phone_mask::is_complete_phone;
use crate::slot_selection::SelectedSlot;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};

/// The business runs on Almaty time as printed in messages
pub const BUSINESS_UTC_OFFSET_SECS: i32 = 6 * 3600;

const WEEKDAYS: [&str; 7] = [
    "понедельник",
    "вторник",
    "среда",
    "четверг",
    "пятница",
    "суббота",
    "воскресенье",
];

const MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
    "октября", "ноября", "декабря",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Phone number is incomplete")]
    InvalidPhone,
    #[error("No time slot selected")]
    NoSlotSelected,
    #[error("Area must be at least 1 square meter")]
    InvalidArea,
    #[error("Messaging sink did not accept the lead")]
    SinkRejected,
}

impl SubmissionError {
    /// Prompt shown to the visitor
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmissionError::InvalidPhone => "Пожалуйста, введите корректный номер телефона",
            SubmissionError::NoSlotSelected => "Пожалуйста, выберите удобное время для клининга",
            SubmissionError::InvalidArea => "Пожалуйста, укажите площадь помещения",
            SubmissionError::SinkRejected => {
                "Произошла ошибка при отправке заявки. Пожалуйста, попробуйте еще раз или свяжитесь с нами по телефону."
            }
        }
    }
}

/// Where leads are delivered. Implementations report failure as `false`
/// and never panic.
#[allow(async_fn_in_trait)]
pub trait MessagingSink {
    async fn send(&self, channel: &str, message: &str) -> bool;
}

pub fn business_offset() -> FixedOffset {
    FixedOffset::east_opt(BUSINESS_UTC_OFFSET_SECS).unwrap_or(Utc.fix())
}

pub fn business_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&business_offset())
}

/// e.g. "суббота, 19 октября"
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {}",
        WEEKDAYS[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS_GENITIVE[date.month0() as usize]
    )
}

pub fn format_submitted_at(at: DateTime<FixedOffset>) -> String {
    format!("{} (GMT+6)", at.format("%d.%m.%Y, %H:%M:%S"))
}

/// Minimal escaping for Telegram's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Hero form: phone plus the slot picked in the booking grid
#[derive(Debug, Clone, PartialEq)]
pub struct SlotBookingRequest<'a> {
    pub phone: &'a str,
    pub city: City,
    pub slot: Option<&'a SelectedSlot>,
    pub visitor_id: Option<&'a str>,
    pub submitted_at: DateTime<FixedOffset>,
}

/// "Custom package" form
#[derive(Debug, Clone, PartialEq)]
pub struct CustomPackageRequest<'a> {
    pub phone: &'a str,
    pub area: &'a str,
    pub property_type: Option<PropertyType>,
    pub cleaning_type: Option<CleaningType>,
    pub services: &'a [AdditionalService],
    pub visitor_id: Option<&'a str>,
    pub submitted_at: DateTime<FixedOffset>,
}

fn push_footer(message: &mut String, visitor_id: Option<&str>, submitted_at: DateTime<FixedOffset>, source: &str) {
    if let Some(visitor_id) = visitor_id {
        message.push_str(&format!(
            "\n🆔 <b>ID посетителя:</b> <code>{}</code>",
            escape_html(visitor_id)
        ));
    }
    message.push_str(&format!(
        "\n\n🕐 <b>Время заявки:</b> {}\n📝 <b>Источник:</b> Форма \"{}\"",
        format_submitted_at(submitted_at),
        source
    ));
}

pub fn compose_slot_booking(request: &SlotBookingRequest<'_>, slot: &SelectedSlot) -> String {
    let mut message = format!(
        "🆕 <b>НОВАЯ ЗАЯВКА НА КЛИНИНГ</b>\n\n\
         📍 <b>Город:</b> {}\n\
         📅 <b>Дата:</b> {}\n\
         ⏰ <b>Время:</b> {}\n\
         📱 <b>Телефон:</b> <code>{}</code>\n\
         💰 <b>Скидка:</b> {}%",
        request.city.display_name(),
        format_long_date(slot.date),
        slot.time.long_label(),
        escape_html(request.phone),
        slot.discount
    );
    push_footer(&mut message, request.visitor_id, request.submitted_at, "Беру слот");
    message
}

pub fn compose_custom_package(request: &CustomPackageRequest<'_>) -> String {
    let quote = discount::compute(request.property_type, request.cleaning_type, request.services.len());
    let services = if request.services.is_empty() {
        "не выбраны".to_string()
    } else {
        request
            .services
            .iter()
            .map(AdditionalService::name)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut message = format!(
        "📦 <b>ЗАЯВКА НА СВОЙ ПАКЕТ</b>\n\n\
         📱 <b>Телефон:</b> <code>{}</code>\n\
         📐 <b>Площадь:</b> {} кв.м\n\
         🏢 <b>Тип недвижимости:</b> {}\n\
         🧹 <b>Тип уборки:</b> {}\n\
         ➕ <b>Дополнительные услуги:</b> {}\n\
         💰 <b>Скидка:</b> {}%",
        escape_html(request.phone),
        escape_html(request.area.trim()),
        request.property_type.map_or("не выбран", |p| p.label()),
        request.cleaning_type.map_or("не выбран", |c| c.label()),
        services,
        quote.percentage
    );
    push_footer(&mut message, request.visitor_id, request.submitted_at, "Свой пакет");
    message
}

/// Checks run before anything is sent for the hero form
pub fn validate_slot_booking<'a>(request: &SlotBookingRequest<'a>) -> Result<&'a SelectedSlot, SubmissionError> {
    if !is_complete_phone(request.phone) {
        return Err(SubmissionError::InvalidPhone);
    }
    request.slot.ok_or(SubmissionError::NoSlotSelected)
}

pub fn validate_custom_package(request: &CustomPackageRequest<'_>) -> Result<(), SubmissionError> {
    if !is_complete_phone(request.phone) {
        return Err(SubmissionError::InvalidPhone);
    }
    match discount::leading_integer(request.area) {
        Some(area) if area >= 1 => Ok(()),
        _ => Err(SubmissionError::InvalidArea),
    }
}

/// Sends validated leads to one chat channel
#[derive(Debug, Clone, PartialEq)]
pub struct LeadSubmissionFlow<S> {
    sink: S,
    channel: String,
}

impl<S: MessagingSink> LeadSubmissionFlow<S> {
    pub fn new(sink: S, channel: impl Into<String>) -> Self {
        Self {
            sink,
            channel: channel.into(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub async fn submit_slot_booking(&self, request: &SlotBookingRequest<'_>) -> Result<(), SubmissionError> {
        let slot = validate_slot_booking(request)?;
        let message = compose_slot_booking(request, slot);
        self.deliver(&message, "slot booking").await
    }

    pub async fn submit_custom_package(&self, request: &CustomPackageRequest<'_>) -> Result<(), SubmissionError> {
        validate_custom_package(request)?;
        let message = compose_custom_package(request);
        self.deliver(&message, "custom package").await
    }

    async fn deliver(&self, message: &str, kind: &str) -> Result<(), SubmissionError> {
        if self.sink.send(&self.channel, message).await {
            log::info!("{} lead delivered", kind);
            Ok(())
        } else {
            log::warn!("{} lead was not delivered", kind);
            Err(SubmissionError::SinkRejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{SlotId, TimeBucket};
    use crate::slot_selection::SlotSelection;
    use chrono::TimeZone;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct RecordingSink {
        accept: bool,
        sent: RefCell<Vec<(String, String)>>,
    }

    impl RecordingSink {
        fn new(accept: bool) -> Self {
            Self {
                accept,
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl MessagingSink for RecordingSink {
        async fn send(&self, channel: &str, message: &str) -> bool {
            self.sent
                .borrow_mut()
                .push((channel.to_string(), message.to_string()));
            self.accept
        }
    }

    fn submitted_at() -> DateTime<FixedOffset> {
        business_offset().with_ymd_and_hms(2025, 10, 18, 14, 30, 0).unwrap()
    }

    fn selected_slot() -> SelectedSlot {
        let mut selection = SlotSelection::new(City::Almaty, NaiveDate::from_ymd_opt(2025, 10, 18).unwrap());
        selection
            .select(SlotId::new(0, TimeBucket::Afternoon).unwrap())
            .cloned()
            .unwrap()
    }

    fn booking<'a>(phone: &'a str, slot: Option<&'a SelectedSlot>) -> SlotBookingRequest<'a> {
        SlotBookingRequest {
            phone,
            city: City::Almaty,
            slot,
            visitor_id: Some("Авокадик-14:29:55:D"),
            submitted_at: submitted_at(),
        }
    }

    #[test]
    fn test_slot_booking_delivered() {
        let slot = selected_slot();
        let flow = LeadSubmissionFlow::new(RecordingSink::new(true), "-100123");
        let result = block_on(flow.submit_slot_booking(&booking("+7 (701) 555-12-34", Some(&slot))));
        assert_eq!(result, Ok(()));

        let sent = flow.sink().sent.borrow();
        assert_eq!(sent.len(), 1);
        let (channel, message) = &sent[0];
        assert_eq!(channel, "-100123");
        assert!(message.contains("Алматы"));
        assert!(message.contains("воскресенье, 19 октября"));
        assert!(message.contains("13:00 - 17:00"));
        assert!(message.contains("<code>+7 (701) 555-12-34</code>"));
        assert!(message.contains("25%"));
        assert!(message.contains("Авокадик-14:29:55:D"));
        assert!(message.contains("18.10.2025, 14:30:00 (GMT+6)"));
        assert!(message.contains("Форма \"Беру слот\""));
    }

    #[test]
    fn test_missing_slot_sends_nothing() {
        let flow = LeadSubmissionFlow::new(RecordingSink::new(true), "chat");
        let result = block_on(flow.submit_slot_booking(&booking("+7 (701) 555-12-34", None)));
        assert_eq!(result, Err(SubmissionError::NoSlotSelected));
        assert!(flow.sink().sent.borrow().is_empty());
    }

    #[test]
    fn test_incomplete_phone_checked_first() {
        let flow = LeadSubmissionFlow::new(RecordingSink::new(true), "chat");
        let result = block_on(flow.submit_slot_booking(&booking("+7 (701) 555-1_-__", None)));
        assert_eq!(result, Err(SubmissionError::InvalidPhone));
        assert!(flow.sink().sent.borrow().is_empty());
    }

    #[test]
    fn test_sink_failure_is_reported() {
        let slot = selected_slot();
        let flow = LeadSubmissionFlow::new(RecordingSink::new(false), "chat");
        let result = block_on(flow.submit_slot_booking(&booking("+7 (701) 555-12-34", Some(&slot))));
        assert_eq!(result, Err(SubmissionError::SinkRejected));
        assert_eq!(flow.sink().sent.borrow().len(), 1);
    }

    #[test]
    fn test_visitor_id_is_optional() {
        let slot = selected_slot();
        let request = SlotBookingRequest {
            visitor_id: None,
            ..booking("+7 (701) 555-12-34", Some(&slot))
        };
        let message = compose_slot_booking(&request, &slot);
        assert!(!message.contains("ID посетителя"));
    }

    #[test]
    fn test_custom_package_message() {
        let services = [AdditionalService::WindowCleaning, AdditionalService::OvenCleaning];
        let request = CustomPackageRequest {
            phone: "+7 (701) 555-12-34",
            area: "54<b>",
            property_type: Some(PropertyType::Apartment),
            cleaning_type: Some(CleaningType::Maintenance),
            services: &services,
            visitor_id: None,
            submitted_at: submitted_at(),
        };
        let flow = LeadSubmissionFlow::new(RecordingSink::new(true), "chat");
        assert_eq!(block_on(flow.submit_custom_package(&request)), Ok(()));

        let sent = flow.sink().sent.borrow();
        let message = &sent[0].1;
        assert!(message.contains("54&lt;b&gt; кв.м"));
        assert!(message.contains("Квартира"));
        assert!(message.contains("окна, духовка"));
        assert!(message.contains("💰 <b>Скидка:</b> 8%"));
        assert!(message.contains("Форма \"Свой пакет\""));
    }

    #[test]
    fn test_custom_package_validation() {
        let request = CustomPackageRequest {
            phone: "+7 (701) 555-12-34",
            area: "",
            property_type: None,
            cleaning_type: None,
            services: &[],
            visitor_id: None,
            submitted_at: submitted_at(),
        };
        assert_eq!(validate_custom_package(&request), Err(SubmissionError::InvalidArea));

        let request = CustomPackageRequest { area: "0", ..request };
        assert_eq!(validate_custom_package(&request), Err(SubmissionError::InvalidArea));

        let request = CustomPackageRequest { phone: "+7 (___) ___-__-__", area: "40", ..request };
        assert_eq!(validate_custom_package(&request), Err(SubmissionError::InvalidPhone));

        let message = compose_custom_package(&CustomPackageRequest { phone: "+7 (701) 555-12-34", ..request });
        assert!(message.contains("не выбран"));
        assert!(message.contains("не выбраны"));
    }

    #[test]
    fn test_long_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(format_long_date(date), "среда, 31 декабря");
    }
}
