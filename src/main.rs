use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use trussviz::report::render_summary;
use trussviz::{render, svg_export, AnalysisResults, RenderOptions, Truss};

/// Render a truss model, and optionally its analysis results, as an annotated diagram.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Model file (joints, members, supports and loads)
    model: PathBuf,
    /// Analysis result file written by the solver
    results: Option<PathBuf>,
    /// Write the diagram as SVG to this path
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Rendering options file
    #[arg(long)]
    options: Option<PathBuf>,
}

/// Load inputs, print the report and write the diagram.
fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    // Rendering options, or the defaults when no file is given.
    let options = match &args.options {
        Some(path) => RenderOptions::load(path)?,
        None => RenderOptions::default(),
    };

    // The model is required: without it there is nothing to draw.
    let truss = Truss::load(&args.model)?;
    info!(
        "loaded {} joints and {} members from {}",
        truss.joint_count(),
        truss.member_count(),
        args.model.display()
    );

    // Bad results degrade the diagram to a draft instead of aborting.
    let results = args.results.as_ref().and_then(AnalysisResults::load_or_warn);

    // The text report needs solver output, so it is only printed for analysed models.
    if let Some(results) = &results {
        println!("{}", render_summary(&truss, results));
    }

    // Build the scene and, when asked, export it at the recommended height.
    let rendering = render(&truss, results.as_ref(), &options);
    if let Some(path) = &args.svg {
        svg_export::save(&rendering, &options, path)?;
        info!(
            "wrote {} ({}x{} px)",
            path.display(),
            options.canvas_width,
            rendering.recommended_height
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    // Log at info level unless RUST_LOG asks for something else.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("trussviz: {error}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("trussviz").chain(list.iter().copied()))
    }

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn positional_and_flags() {
        let parsed = args(&["model.json", "--svg", "out.svg", "results.json"]).expect("valid");
        assert_eq!(parsed.model, PathBuf::from("model.json"));
        assert_eq!(parsed.results, Some(PathBuf::from("results.json")));
        assert_eq!(parsed.svg, Some(PathBuf::from("out.svg")));
        assert_eq!(parsed.options, None);

        let parsed = args(&["model.json", "--options", "opts.json"]).expect("valid");
        assert_eq!(parsed.results, None);
        assert_eq!(parsed.options, Some(PathBuf::from("opts.json")));
    }

    #[test]
    fn rejects_bad_command_lines() {
        assert!(args(&[]).is_err());
        assert!(args(&["model.json", "--svg"]).is_err());
        assert!(args(&["model.json", "--fast"]).is_err());
        assert!(args(&["a.json", "b.json", "c.json"]).is_err());
    }
}
