/// Compose a landscape document with styled text, a merged table and pictures.
///
/// This example demonstrates:
/// - Font and color registration
/// - Ratio-based cell widths and vertical merges
/// - Cyrillic text (written as Unicode escapes)
/// - Embedding a JPEG read from disk
///
/// Usage: compose_report [picture.jpg] [output.rtf]
use rtfdoc::rtf::{Alignment, Color, Document, ImageFormat, Orientation, RtfError};
use std::env;
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let picture_path = args.get(1).map(String::as_str).unwrap_or("pic.jpg");
    let output_path = args.get(2).map(String::as_str).unwrap_or("report.rtf");

    let mut doc = Document::new();
    doc.set_orientation(Orientation::Landscape).set_format("A4")?;

    let times = doc.add_font("Times New Roman");
    let arial = doc.add_font("Arial");
    let comic = doc.add_font("Comic Sans MS");
    let black = 0;
    let green = doc.add_color(Color::new(0, 128, 0));
    let blue = doc.add_color(Color::new(0, 0, 255));
    let red = doc.add_color(Color::new(255, 0, 0));

    doc.add_paragraph()
        .add_text("Green first string (Times New Roman)", 48, times, green);
    doc.add_paragraph()
        .add_text("Blue second string (Arial)", 48, arial, blue);
    doc.add_paragraph()
        .add_text("Red third string (Comic Sans)", 48, comic, red);

    let table = doc.add_table(10000);
    table
        .set_margin_left(50)
        .set_margin_right(50)
        .set_margin_top(50)
        .set_margin_bottom(50)
        .set_border_color(green);

    // First row: 1:3
    let widths = table.cell_widths_by_ratio(&[1.0, 3.0])?;
    let row = table.add_row();
    let cell = row.add_cell(widths[0]);
    cell.mark_merge_first();
    let p = cell.add_paragraph();
    p.set_alignment(Alignment::Justify);
    p.add_text("Blue text with cyrillic support with multiline", 16, comic, blue);
    p.add_new_line();
    p.add_text("Голубой кириллический текст с переносом строки внутри параграфа", 16, comic, blue);
    cell.add_paragraph()
        .set_indent(40, 0, 0)
        .set_alignment(Alignment::Center)
        .add_text("Another paragraph in vertical cell", 16, comic, blue);

    row.add_cell(widths[1])
        .add_paragraph()
        .set_alignment(Alignment::Center)
        .add_text("Green text in top right cell with center align", 16, comic, green);

    // Second row: 1:1.5:1.5, first cell continues the merge above
    let widths = table.cell_widths_by_ratio(&[1.0, 1.5, 1.5])?;
    let row = table.add_row();
    row.add_cell(widths[0]).mark_merge_next();
    row.add_cell(widths[1])
        .add_paragraph()
        .set_alignment(Alignment::Right)
        .add_text("Red text in bottom central cell with right align", 16, arial, red)
        .set_bold();

    let cell = row.add_cell(widths[2]);
    cell.add_paragraph()
        .set_alignment(Alignment::Left)
        .add_text("Black text in bottom right cell with left align", 16, comic, black)
        .set_italic();

    let p = cell.add_paragraph();
    p.set_alignment(Alignment::Center);
    let added = match File::open(picture_path) {
        Ok(file) => p.add_picture_from_reader(file, ImageFormat::Jpeg),
        Err(e) => Err(RtfError::ImageSourceUnreadable(e)),
    };
    match added {
        Ok(picture) => {
            picture.set_width(100).set_height(100);
        },
        Err(e) => eprintln!("Skipping picture: {}", e),
    }

    let rtf = doc.export()?;
    std::fs::write(output_path, &rtf)?;
    println!("Wrote {} bytes to {}", rtf.len(), output_path);

    Ok(())
}
