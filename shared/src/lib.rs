//! Domain logic for the cleaning-service landing page: the booking grid,
//! the phone mask, the custom package discount and lead submission.
//!
//! Everything here is free of DOM access so it can be unit tested natively
//! and shared with the wasm frontend.

pub mod city;
pub mod discount;
pub mod lead;
pub mod phone_mask;
pub mod schedule;
pub mod slot_selection;
pub mod visitor;

pub use city::{City, OfficeInfo};
pub use discount::{
    AdditionalService, BreakdownItem, CleaningType, DiscountQuote, DiscountTier, DiscountTracker,
    DiscountTransition, PropertyType,
};
pub use lead::{
    CustomPackageRequest, LeadSubmissionFlow, MessagingSink, SlotBookingRequest, SubmissionError,
};
pub use phone_mask::{FieldStyle, KeyInput, KeyOutcome, PhoneField, Selection};
pub use schedule::{
    CitySchedule, DayLabel, OccupancyStatus, ScheduleGenerator, Slot, SlotId, TimeBucket,
};
pub use slot_selection::{CtaLabel, HiddenFieldError, SelectedSlot, SlotSelection, SlotView};
pub use visitor::DeviceKind;
