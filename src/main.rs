use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use updatecraft::app::Updater;
use updatecraft::browser::SystemBrowser;
use updatecraft::config::{self, Config};
use updatecraft::logging;
use updatecraft::registry::ModrinthRegistry;

#[derive(Parser)]
#[command(name = "updatecraft")]
#[command(version, about = "Scan a mods folder and suggest updates to the newest common game version")]
struct Cli {
    /// Directory holding the mod archives
    #[arg(value_name = "MOD_DIR", num_args = 0..)]
    paths: Vec<PathBuf>,
}

/// What the command line asks for
#[derive(Debug)]
enum Invocation {
    /// Run the pipeline over this mods directory
    Run(PathBuf),
    /// Wrong arguments: show usage
    Usage,
    /// `--help` or `--version`, rendered by clap
    Info(clap::Error),
}

fn invocation<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => match <[PathBuf; 1]>::try_from(cli.paths) {
            Ok([mod_dir]) => Invocation::Run(mod_dir),
            Err(_) => Invocation::Usage,
        },
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Info(e)
        }
        Err(_) => Invocation::Usage,
    }
}

fn main() -> anyhow::Result<ExitCode> {
    println!("{}", config::banner());

    let mod_dir = match invocation(std::env::args_os()) {
        Invocation::Run(mod_dir) => mod_dir,
        Invocation::Usage => {
            Cli::command().print_help()?;
            println!();
            return Ok(ExitCode::SUCCESS);
        }
        Invocation::Info(e) => {
            e.print()?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    let config = Config::load()?;
    logging::init_logger(config.debug);

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(mod_dir, config))
}

async fn run(mod_dir: PathBuf, config: Config) -> anyhow::Result<ExitCode> {
    let registry = ModrinthRegistry::from_config(&config);
    let browser = SystemBrowser;
    let updater = Updater::new(&registry, &browser, &config);

    if let Err(e) = updater.check_api().await {
        println!("ERROR: {e}");
        return Ok(ExitCode::FAILURE);
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout().lock();
    let report = updater.run(&mod_dir, &mut input, &mut output).await?;

    let code = report.outcome.exit_code();
    if code == 0 {
        println!("Done");
    }
    Ok(ExitCode::from(code as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn single_path_runs_pipeline() {
        let result = invocation(["updatecraft", "mods"]);

        assert!(matches!(result, Invocation::Run(ref dir) if dir == &PathBuf::from("mods")));
    }

    #[rstest]
    #[case(vec!["updatecraft"])]
    #[case(vec!["updatecraft", "a", "b"])]
    #[case(vec!["updatecraft", "-x"])]
    #[case(vec!["updatecraft", "--unknown", "mods"])]
    fn wrong_arguments_show_usage(#[case] args: Vec<&str>) {
        assert!(matches!(invocation(args), Invocation::Usage));
    }

    #[rstest]
    #[case("--help")]
    #[case("--version")]
    fn help_and_version_are_rendered_by_clap(#[case] flag: &str) {
        assert!(matches!(invocation(["updatecraft", flag]), Invocation::Info(_)));
    }
}
