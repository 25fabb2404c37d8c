use giroscan::GlyphSet;
use std::env;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let text = args.get(1).map(String::as_str).unwrap_or("1234567890#41>");
    let output = args.get(2).map(String::as_str).unwrap_or("ocr_line.png");

    let glyphs = GlyphSet::builtin();
    let mut line = glyphs.render_line(text, 8, 20);

    // Camera frames are never pure black on white
    for pixel in line.pixels_mut() {
        pixel[0] = if pixel[0] == 0 { 40 } else { 215 };
    }

    line.save(output)?;
    println!(
        "Created {} ({}x{}) reading {:?}",
        output,
        line.width(),
        line.height(),
        text
    );
    Ok(())
}
