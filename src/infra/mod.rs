pub mod mailer;
pub mod report;
pub mod shipment_store;
pub mod tariff_feed;
