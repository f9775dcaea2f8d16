//! Objects used to read and write incomplete argumentation theories and stability results.

mod lp_reader;
pub use lp_reader::LpReader;

mod lp_writer;
pub use lp_writer::LpWriter;

mod result_writer;
pub use result_writer::ResultWriter;

mod specs;
pub use specs::InstanceReader;
pub use specs::WarningHandler;

mod warning_result;
