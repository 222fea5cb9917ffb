//! Render a small workbook to plain text and walk through a few commands.
//!
//! Run with: cargo run -p sheetview-core --example render_demo

use sheetview_core::{
    Cell, CellError, CellStyle, Color, HorizontalAlign, InputDispatcher, InputEvent, Key, Renderer,
    Session, Sheet, TerminalSize, TextSink, Workbook,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let header = CellStyle::new()
        .with_bold(true)
        .with_background_color(Color::rgb(30, 60, 120));

    let mut sales = Sheet::with_extents("Sales", 40, 6);
    for (col, title) in ["Region", "Product", "Units", "Price", "Total", "Shipped"]
        .iter()
        .enumerate()
    {
        sales = sales.with_cell(0, col, Cell::text(*title).with_style(header.clone()));
    }
    let rows = [
        ("North", "Widget", 120.0, 2.5),
        ("South", "Gadget with a long product name", 75.0, 12.0),
        ("東京", "ウィジェット", 300.0, 1.25),
    ];
    for (i, (region, product, units, price)) in rows.iter().enumerate() {
        let row = i + 1;
        sales = sales
            .with_cell(row, 0, Cell::text(*region))
            .with_cell(row, 1, Cell::text(*product))
            .with_cell(row, 2, Cell::number(*units))
            .with_cell(row, 3, Cell::number(*price))
            .with_cell(row, 4, Cell::number(units * price))
            .with_cell(row, 5, Cell::boolean(i % 2 == 0));
    }
    sales = sales.with_cell(
        4,
        4,
        Cell::error(CellError::DivisionByZero)
            .with_style(CellStyle::new().with_horizontal_align(HorizontalAlign::Right)),
    );

    let workbook = Workbook::from_sheets("Demo", vec![sales, Sheet::new("Notes")])?;

    let size = TerminalSize::new(60, 10);
    let mut session = Session::new(&workbook, Renderer::default(), InputDispatcher::default(), size);

    let events = vec![
        InputEvent::key(Key::ArrowDown),
        InputEvent::key(Key::ArrowDown),
        InputEvent::key(Key::End),
    ];
    let mut sink = TextSink::new();
    session.run(events.into_iter(), &mut sink)?;

    println!("{}", sink.screen());
    println!();
    println!("frames written: {}, full repaints: {}", sink.frames, sink.clears);
    Ok(())
}
