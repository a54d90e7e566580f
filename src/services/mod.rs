pub mod basket_service;
pub mod booking_service;
pub mod catalog_service;
pub mod contract_service;
pub mod pricing_service;
