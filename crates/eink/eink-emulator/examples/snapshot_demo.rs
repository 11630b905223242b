//! Snapshot Demo
//!
//! Drives a simulated 5.79" panel with a few solid frames and writes each one
//! to the current directory.
//!
//! Run with: cargo run --example snapshot_demo

use eink_emulator::{Emulator, EmulatorConfig};
use platform::{PanelDriver, PanelFrame};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let model = eink_specs::PanelRegistry::lookup("5in79g")?;
    let mut emulator = Emulator::for_model(model, EmulatorConfig::with_output_dir("."));
    emulator.init()?;

    for color in model.palette {
        println!("Showing {}", color.name);
        emulator.display(&PanelFrame::filled(model.width, model.height, color.rgb))?;
        if let Some(path) = emulator.last_snapshot() {
            println!("  -> {}", path.display());
        }
    }

    emulator.sleep()?;
    println!("Stats: {:?}", emulator.stats());
    Ok(())
}
