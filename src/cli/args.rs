use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct FractalRendererArgs {
    #[command(subcommand)]
    pub command: Option<CommandsEnum>,
}

#[derive(Debug, Subcommand)]
pub enum CommandsEnum {
    /// Render the fractal described by a parameter file to a PNG image.
    Render(ParameterFilePath),
    /// Open a window with the selection menu and render interactively.
    Explore(ParameterFilePath),
    /// Write a PNG preview of a gradient and its palette.
    ColorSwatch(ParameterFilePath),
}

#[derive(Debug, Args)]
pub struct ParameterFilePath {
    pub params_path: String,

    /// Write output files into a time-stamped sub-directory.
    #[clap(long, short)]
    pub date_time_out: bool,
}
