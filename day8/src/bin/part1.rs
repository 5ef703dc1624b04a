use day8::get_lit_pixels;

use std::env;

use anyhow::Result;

const WIDTH: usize = 50;
const HEIGHT: usize = 6;

fn main() -> Result<()> {
    util::init_logging();

    let input = util::read_input_as_string(env::args().nth(1))?;

    let lit = get_lit_pixels(input.lines(), WIDTH, HEIGHT).map_err(|e| {
        eprintln!("{}", e.report());
        e
    })?;

    println!("Pixels lit: {lit}");

    Ok(())
}
