use anyhow::{Context, Result};
use audiso::logging::{Logging, TracingSink};
use audiso::{cli, config, report, Converter, Parameters};

fn main() -> Result<()> {
    let args = cli::parse();

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let params = Parameters::resolve(&args, &cwd)?;
    let logging = Logging::init(&config::log_config(&args))?;

    let result = Converter::new(&TracingSink)
        .with_locate_mode(config::locate_mode(&args))
        .run(&params);

    logging.finish()?;
    let issues = result.context("convert failed")?;

    if !args.quiet {
        report::print_summary(&issues, &params.output_file_path.to_string_lossy());
        println!("\n{}", "✅ Conversion complete!");
    }

    Ok(())
}
