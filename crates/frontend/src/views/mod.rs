pub mod capabilities;
pub mod catalog;
pub mod column_sizing;
pub mod controller;
pub mod definition;

pub use controller::ViewController;
pub use definition::ViewDefinition;
