pub mod layout;
pub mod quiz;
