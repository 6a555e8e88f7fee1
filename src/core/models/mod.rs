pub mod certificate;
pub mod delete_report;
