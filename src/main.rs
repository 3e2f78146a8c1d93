use clap::Parser;
use env_logger::Env;

use escape_time_fractals::{
    cli::{
        args::{CommandsEnum, FractalRendererArgs},
        color_swatch::generate_color_swatch,
        explore::explore_fractal,
        render::render_fractal,
    },
    core::file_io::FilePrefix,
    errors::Result,
    fractals::common::FractalParams,
};

fn run(args: FractalRendererArgs) -> Result<()> {
    match &args.command {
        Some(CommandsEnum::Render(params)) => {
            let fractal_params = FractalParams::from_file(&params.params_path)?;
            let file_prefix = FilePrefix::new(&params.params_path, "render", params.date_time_out)?;
            let outcome = render_fractal(&fractal_params, file_prefix)?;
            log::debug!("Render finished: {:?}", outcome);
        }

        Some(CommandsEnum::Explore(params)) => {
            let fractal_params = FractalParams::from_file(&params.params_path)?;
            let file_prefix = FilePrefix::new(&params.params_path, "explore", params.date_time_out)?;
            explore_fractal(fractal_params, file_prefix)?;
        }

        Some(CommandsEnum::ColorSwatch(params)) => {
            let file_prefix =
                FilePrefix::new(&params.params_path, "color_swatch", params.date_time_out)?;
            generate_color_swatch(&params.params_path, file_prefix)?;
        }
        None => {
            log::warn!("Default command (nothing specified!). Try `--help`.");
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(error) = run(FractalRendererArgs::parse()) {
        log::error!("{}", error);
        std::process::exit(1);
    }
}
