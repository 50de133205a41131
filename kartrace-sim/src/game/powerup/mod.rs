pub mod action;
pub mod pickups;

pub use action::use_item;
pub use pickups::ItemBox;
