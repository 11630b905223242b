//! Panel Information Example
//!
//! Lists every registered panel model with its geometry and palette.
//!
//! Run with: cargo run --example display_info

use eink_specs::{PanelModel, PanelRegistry};

fn print_model_info(model: &PanelModel) {
    println!("\n{}", "=".repeat(60));
    println!("Panel: {} ({})", model.description, model.id);
    println!("{}", "=".repeat(60));

    println!("  Resolution: {}×{} pixels", model.width, model.height);
    println!("  Controller: {:?}", model.controller);
    println!("  Panel Type: {:?}", model.panel_type);
    println!("  Driver: {}", model.driver.as_str());
    println!("  Full Refresh: {}ms", model.full_refresh_ms);

    if model.is_full_rgb() {
        println!("  Colors: full RGB");
    } else {
        println!("  Colors:");
        for color in model.palette {
            let [r, g, b] = color.rgb;
            println!("    {:<8} #{r:02x}{g:02x}{b:02x}", color.name);
        }
    }
}

fn main() {
    for model in PanelRegistry::list() {
        print_model_info(model);
    }
}
