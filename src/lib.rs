pub mod app;
pub mod logging;
pub mod poller;
pub mod track;
pub mod ui;
