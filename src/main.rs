mod ast_printer;
mod driver;
mod expr;
mod parser;
mod scanner;
mod token;
mod token_type;

use crate::driver::Driver;
use std::env;
use std::process;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let mut driver = Driver::new();
    if args.len() > 2 {
        println!("Usage: astprint [script]");
        process::exit(64);
    } else if args.len() == 2 {
        driver.run_file(&args[1])?;
    } else {
        driver.run_prompt()?;
    }
    Ok(())
}
