pub mod city_toggle;
pub mod custom_package;
pub mod hero_booking;
pub mod location_section;
pub mod phone_input;
pub mod slot_grid;

pub use custom_package::CustomPackage;
pub use hero_booking::HeroBooking;
pub use location_section::LocationSection;
