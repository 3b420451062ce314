//! Parseo mínimo de argumentos:
//! `raspa-converge run --input <FILE> [--output <FILE>] [--scratch <DIR>] [--max-iterations <N>] [-v|-vv]`
use std::path::PathBuf;

pub const USAGE: &str = "Uso: raspa-converge run --input <inputs.json> [--output <out.json>] [--scratch <dir>] [--max-iterations <n>] [-v|-vv]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub scratch: Option<PathBuf>,
    pub max_iterations: Option<String>,
    pub verbosity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunArgs),
    Help,
}

pub fn parse(args: &[String]) -> Result<Command, String> {
    match args.get(1).map(String::as_str) {
        Some("run") => parse_run(&args[2..]).map(Command::Run),
        Some("help") | Some("--help") | Some("-h") | None => Ok(Command::Help),
        Some(other) => Err(format!("subcomando desconocido: {other}")),
    }
}

fn parse_run(args: &[String]) -> Result<RunArgs, String> {
    let mut input: Option<PathBuf> = None;
    let mut output = None;
    let mut scratch = None;
    let mut max_iterations = None;
    let mut verbosity = 0u8;
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--input" | "--output" | "--scratch" | "--max-iterations" => {
                i += 1;
                let value = args.get(i).ok_or_else(|| format!("falta el valor de {flag}"))?.clone();
                match flag {
                    "--input" => input = Some(PathBuf::from(value)),
                    "--output" => output = Some(PathBuf::from(value)),
                    "--scratch" => scratch = Some(PathBuf::from(value)),
                    _ => max_iterations = Some(value),
                }
            }
            "-v" => verbosity = verbosity.saturating_add(1),
            "-vv" => verbosity = verbosity.saturating_add(2),
            other => return Err(format!("argumento desconocido: {other}")),
        }
        i += 1;
    }
    let input = input.ok_or_else(|| "--input es obligatorio".to_string())?;
    Ok(RunArgs { input,
                 output,
                 scratch,
                 max_iterations,
                 verbosity })
}
