//! Job lifecycle: the store that owns every record, the dispatcher that
//! schedules work, and the updater that records how it ended.

pub mod dispatcher;
pub mod state;
pub mod store;
