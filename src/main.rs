use anyhow::Result;
use quad_wordle::cli::{parse_cli, run};
use quad_wordle::logging;

fn main() -> Result<()> {
    let cli = parse_cli();
    logging::init(cli.verbose);
    run(&cli)
}
