use anyhow::Result;
use clap::Parser;
use scratch_ast::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    scratch_ast::cli::run_cli(&args)
}
