pub mod kpi_card;
pub mod shipment_form;
pub mod shipment_table;
pub mod status_badge;
pub mod toast;
