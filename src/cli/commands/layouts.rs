//! Layouts command - List the built-in mazes

use anyhow::Result;
use clap::Parser;

use crate::maze::layouts;

#[derive(Parser, Debug)]
#[command(about = "List built-in maze layouts")]
pub struct LayoutsArgs {
    /// Also render each layout's grid
    #[arg(long)]
    pub render: bool,
}

pub fn execute(args: LayoutsArgs) -> Result<()> {
    for (name, description) in layouts::catalog() {
        println!("{name:10} {description}");
        if args.render {
            let maze = layouts::builtin(name)?;
            for line in maze.render().lines() {
                println!("    {line}");
            }
        }
    }
    Ok(())
}
