pub mod use_day_rollover;
pub mod use_discount;
pub mod use_slot_selection;
pub mod use_submission;

pub use use_day_rollover::use_day_rollover;
pub use use_discount::use_discount;
pub use use_slot_selection::use_slot_selection;
pub use use_submission::use_submission;
