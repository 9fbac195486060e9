mod utils;

mod test_format;
mod test_global_log;
