pub mod address;
pub mod card_event;
pub mod student;
