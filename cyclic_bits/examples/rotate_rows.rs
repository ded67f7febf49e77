use cyclic_bits::{BitMatrix, BitVector, BitsError, RotationScratch};

fn main() {
    println!("=== Cyclic Bits Examples ===\n");

    // Example 1: Rotating a short vector
    let _ = example_rotate_vector();

    // Example 2: Rotating part of a vector
    let _ = example_rotate_window();

    // Example 3: Scrolling a bit grid
    let _ = example_scroll_grid();
}

fn example_rotate_vector() -> Result<(), BitsError> {
    println!("Example 1: Rotating 17 bits");

    let mut bits = BitVector::<u32>::new(17);
    bits.set(0)?;
    bits.set(16)?;
    println!("  Start:      {}", bits);

    bits.rotate(1);
    println!("  Rotate 1:   {}", bits);

    bits.rotate(-2);
    println!("  Rotate -2:  {}", bits);

    // amounts wrap around the length
    bits.rotate(17 * 3 + 1);
    println!("  Rotate 52:  {}", bits);
    println!();

    Ok(())
}

fn example_rotate_window() -> Result<(), BitsError> {
    println!("Example 2: Rotating bits 4..12 only");

    let mut bits: BitVector = (0..16).map(|i| i % 4 == 0).collect();
    println!("  Start:      {}", bits);

    bits.rotate_window(3, 4, 12)?;
    println!("  Window +3:  {}", bits);

    bits.rotate_window(-3, 4, 12)?;
    println!("  Window -3:  {}", bits);
    println!();

    Ok(())
}

fn example_scroll_grid() -> Result<(), BitsError> {
    println!("Example 3: Scrolling a 12x5 grid sideways");

    let mut grid = BitMatrix::<u64>::new(12, 5)?;
    grid.set_region(1, 1, 3, 3)?;
    print!("{}", grid);

    // one scratch buffer for every frame
    let mut scratch = RotationScratch::new();
    for frame in 1..=3 {
        for y in 0..grid.height() {
            let mut row = grid.row(y)?;
            row.rotate_with(&mut scratch, 4);
            grid.set_row(y, &row)?;
        }
        println!("  Frame {}:", frame);
        print!("{}", grid);
    }

    grid.rotate_180()?;
    println!("  Upside down:");
    print!("{}", grid);

    Ok(())
}
