mod status;

pub(crate) use status::StatusLog;
