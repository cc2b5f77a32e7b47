pub mod display;
pub mod form_shell;
pub mod modal;
pub mod order_form;
pub mod role;
pub mod view_controller;
pub mod views;

pub use role::ContractorTab;
pub use role::Role;
pub use view_controller::ViewController;
pub use view_controller::ViewControllerError;
