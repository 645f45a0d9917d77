#![allow(clippy::cast_precision_loss)]
//! Demo colorizing a synthetic cortical thickness overlay.
//!
//! Writes a continuous colorbar, a discrete colorbar and a preview strip of
//! the custom colormap to PNG files in the current directory, and prints the
//! histogram of the discrete map.
//!
//! Run with `RUST_LOG=debug cargo run --example colorbar_demo`.

use cortexvis::{Options, PixelBuffer, Result, Viewer};

const VERTEX_COUNT: usize = 2000;

/// Thickness-like values in millimetres, between roughly 1 and 4.5.
fn synthetic_thickness() -> Vec<f32> {
    (0..VERTEX_COUNT)
        .map(|i| {
            let x = i as f32 / VERTEX_COUNT as f32;
            2.75 + 1.5 * (x * 12.0).sin() * (x * 3.0).cos() + 0.25 * (x * 40.0).sin()
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let options = Options::default().with_colorbar_size(40, 300);
    let mut viewer = Viewer::new(options)?;

    viewer.load_scalars("thickness", synthetic_thickness(), VERTEX_COUNT)?;
    let vis = viewer.set_colormap("jet")?;
    vis.colorbar.save_png("colorbar_jet.png")?;
    println!("jet colorbar ticks:");
    for tick in &vis.legend.ticks {
        println!("  {:>8} at y={:.1}", tick.label, tick.position);
    }

    let mut editor = viewer.editor("thickness-bands");
    editor.set_background_hex("#202020")?;
    editor.add_range(1.0, 2.0, "#3b4cc0")?;
    editor.add_range(2.0, 3.0, "#8db0fe")?;
    editor.add_range(3.5, 4.5, "#b40426")?;

    let domain = viewer
        .overlay()
        .map(cortexvis::ScalarOverlay::true_range)
        .ok_or(cortexvis::CortexvisError::NoOverlay)?;
    let mut strip = PixelBuffer::new(300, 20);
    editor.render_preview(&mut strip, domain)?;
    strip.save_png("preview_strip.png")?;

    let vis = editor.commit(&mut viewer)?;
    vis.colorbar.save_png("colorbar_bands.png")?;
    println!("histogram of '{}':", editor.name());
    for bucket in &vis.histogram.buckets {
        println!("  {:>14}: {}", bucket.label, bucket.count);
    }

    Ok(())
}
