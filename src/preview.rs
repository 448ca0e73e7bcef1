use image::{imageops, Pixel, RgbaImage};

const LUMA_THRESHOLD: u8 = 128;

/// Render `image` as text `columns` characters wide.
///
/// Every character covers two pixel rows using half blocks. Dark pixels are
/// drawn as blocks, so the preview reads correctly on a light terminal.
pub fn render_terminal(image: &RgbaImage, columns: u32) -> String {
    if columns == 0 || image.width() == 0 || image.height() == 0 {
        return String::new();
    }

    let width = columns.min(image.width());
    let height = ((image.height() as u64 * width as u64) / image.width() as u64).max(1) as u32;
    let small = imageops::resize(image, width, height, imageops::FilterType::Nearest);

    let is_dark = |x: u32, y: u32| -> bool {
        y < small.height() && small.get_pixel(x, y).to_luma()[0] < LUMA_THRESHOLD
    };

    let mut out = String::with_capacity(((width + 1) * height.div_ceil(2)) as usize * 3);
    for row in (0..height).step_by(2) {
        for x in 0..width {
            let ch = match (is_dark(x, row), is_dark(x, row + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
