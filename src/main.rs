use clap::Parser;
use csr_toolbox::cli::{Args, Run};
use std::error::Error;

#[termination::display]
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    args.init_logging();
    args.run()
}
