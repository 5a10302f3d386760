//! Opens a window and clears it to a teal color every frame.

use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use snowgl::{DemoWindow, WindowConfig};

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = WindowConfig::default();
    let (window, event_loop) = DemoWindow::new(&config)?;

    window.run(event_loop, || {})?;
    Ok(())
}
