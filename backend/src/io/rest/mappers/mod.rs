pub mod report_mapper;

pub use report_mapper::ReportMapper;
