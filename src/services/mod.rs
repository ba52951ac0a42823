pub mod log_forwarder;
