pub mod serializers;
pub mod text_report;
