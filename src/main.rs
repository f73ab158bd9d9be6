mod audio;
mod config;
mod controller;
mod error;
mod library;
mod playlist;
mod runtime;
mod slider;
mod time;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
