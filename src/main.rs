pub mod cli;
pub mod codegen;
pub mod inference;
pub mod ir;
pub mod jq_exec;
pub mod naming;
pub mod path_de;
pub mod registry;

use colored::Colorize;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
