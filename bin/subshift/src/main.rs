use clap::Parser;

use crate::cli::Subshift;

mod cli;
mod logging;

fn main() -> anyhow::Result<()> {
  let args = Subshift::parse();
  logging::init(args.verbose);

  args.execute()
}
