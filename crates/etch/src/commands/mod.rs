pub mod inspect;
pub mod render;

use std::io::Read;
use std::path::{Path, PathBuf};

use etch::config::{load_config, EtchConfig};
use etch::source::TemplateSource;
use etch::{CliError, CliResult};

/// Read a template file, or stdin for `-`.
pub fn read_source(path: &Path) -> CliResult<TemplateSource> {
    let content = if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        content
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?
    };
    TemplateSource::parse(&content)
}

pub fn config(path: Option<&PathBuf>) -> CliResult<EtchConfig> {
    load_config(path.map(PathBuf::as_path))
}

/// Write `output` to `path`, or stdout when there is none.
pub fn write_output(path: Option<&PathBuf>, output: &str) -> CliResult<()> {
    match path {
        Some(path) => std::fs::write(path, output).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            println!("{output}");
            Ok(())
        }
    }
}
