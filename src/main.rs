use std::env;
use std::error::Error;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    rowpick::driver::run_cli(env::args().skip(1), &mut stdin.lock(), &mut stdout.lock())
}
