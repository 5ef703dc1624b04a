use day8::{prettify, run_commands};

use std::env;

use anyhow::Result;

const WIDTH: usize = 50;
const HEIGHT: usize = 6;

fn main() -> Result<()> {
    util::init_logging();

    let input = util::read_input_as_string(env::args().nth(1))?;

    let screen = run_commands(input.lines(), WIDTH, HEIGHT).map_err(|e| {
        eprintln!("{}", e.report());
        e
    })?;

    println!("Pixels lit: {}", screen.lit_count());
    println!("Screen:");
    println!("{}", screen.bordered());
    println!();
    print!("{}", prettify(&screen.render()));

    Ok(())
}
