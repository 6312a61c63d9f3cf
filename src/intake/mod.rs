//! Spare-part requests and help reports.
//!
//! Both variants share one aggregate distinguished by who is asking: a
//! technician for spare parts, a named contact for help. Each carries at
//! most one photo and a free-form status that starts as `"pending"`.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
