pub mod calculator;
pub mod contact;
pub mod settings;
pub mod shipments;
pub mod tracking;

pub use calculator::CalculatorPage;
pub use contact::ContactPage;
pub use settings::SettingsPage;
pub use shipments::ShipmentsPage;
pub use tracking::TrackingPage;
