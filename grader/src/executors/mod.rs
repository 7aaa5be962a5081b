pub mod remote_runner;
